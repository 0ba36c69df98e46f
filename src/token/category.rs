//! Token categories and their behavior descriptors
//!
//! One generic [`TokenStore`](super::store::TokenStore) serves every
//! category; the differences between categories live in a static
//! [`CategoryBehavior`] table instead of a type hierarchy.

/// The nine token categories of a theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Color,
    Spacing,
    Radius,
    FontFamily,
    FontWeight,
    LineHeight,
    FontSize,
    LetterSpacing,
    Typography,
}

impl Category {
    /// All categories in load and emission order. The composite typography
    /// store comes last so its fields can reference every other category.
    pub const ALL: [Category; 9] = [
        Category::Color,
        Category::Spacing,
        Category::Radius,
        Category::FontFamily,
        Category::FontWeight,
        Category::LineHeight,
        Category::FontSize,
        Category::LetterSpacing,
        Category::Typography,
    ];

    pub fn behavior(self) -> &'static CategoryBehavior {
        &BEHAVIORS[self as usize]
    }

    /// Reference tag as written in `{tag.path}` placeholders
    pub fn tag(self) -> &'static str {
        self.behavior().tag
    }

    /// Segment used in emitted CSS variable names
    pub fn var_segment(self) -> &'static str {
        self.behavior().var_segment
    }

    /// Key of the category's section in the Tailwind theme config
    pub fn tailwind_key(self) -> &'static str {
        self.behavior().tailwind_key
    }

    pub fn from_tag(tag: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-category strategy: naming, calculator participation, default tokens
pub struct CategoryBehavior {
    pub tag: &'static str,
    pub var_segment: &'static str,
    /// Key under which the category lands in the Tailwind theme config
    pub tailwind_key: &'static str,
    /// Whether loaded values run through the expression calculator
    pub calculate: bool,
    /// Tokens present in every store of this category, without CSS bindings
    pub defaults: &'static [(&'static str, &'static str)],
}

const NO_DEFAULTS: &[(&str, &str)] = &[];

/// Keyword colors every color store carries, never bound to variables
const COLOR_DEFAULTS: &[(&str, &str)] = &[
    ("inherit", "inherit"),
    ("current", "currentColor"),
    ("transparent", "transparent"),
];

// Indexed by `Category as usize`; order must match the enum.
const BEHAVIORS: [CategoryBehavior; 9] = [
    CategoryBehavior {
        tag: "color",
        var_segment: "color",
        tailwind_key: "colors",
        calculate: false,
        defaults: COLOR_DEFAULTS,
    },
    CategoryBehavior {
        tag: "spacing",
        var_segment: "spacing",
        tailwind_key: "spacing",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "radius",
        var_segment: "radius",
        tailwind_key: "borderRadius",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "fontFamily",
        var_segment: "font-family",
        tailwind_key: "fontFamily",
        calculate: false,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "fontWeight",
        var_segment: "font-weight",
        tailwind_key: "fontWeight",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "lineHeight",
        var_segment: "line-height",
        tailwind_key: "lineHeight",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "fontSize",
        var_segment: "font-size",
        tailwind_key: "fontSize",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "letterSpacing",
        var_segment: "letter-spacing",
        tailwind_key: "letterSpacing",
        calculate: true,
        defaults: NO_DEFAULTS,
    },
    CategoryBehavior {
        tag: "typography",
        var_segment: "typography",
        tailwind_key: "typography",
        calculate: false,
        defaults: NO_DEFAULTS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_table_matches_enum_order() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
    }

    #[test]
    fn test_camel_case_tags() {
        assert_eq!(Category::FontSize.tag(), "fontSize");
        assert_eq!(Category::FontSize.var_segment(), "font-size");
        assert_eq!(Category::Radius.behavior().tailwind_key, "borderRadius");
    }
}
