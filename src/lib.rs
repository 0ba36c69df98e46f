//! themeforge - design token resolution and color generation
//!
//! Turns declarative theme configurations into resolved design tokens:
//! `{category.path}` references become CSS `var(...)` expressions,
//! arithmetic is normalized to `rem`, color seeds expand into graded
//! HSL scales, and themes compose through a dependency graph. Projections
//! emit CSS custom-property blocks and Tailwind configuration fragments.
//!
//! ```no_run
//! use themeforge::{Engine, ThemeConfig};
//!
//! let configs: Vec<ThemeConfig> = serde_json::from_str("[]").unwrap();
//! let engine = Engine::new(configs);
//! for theme in engine.themes().unwrap() {
//!     println!("{}", theme.css());
//! }
//! ```

#[macro_use]
extern crate lalrpop_util;

pub mod color;
pub mod emit;
pub mod error;
pub mod expr;
pub mod theme;
pub mod token;

pub use color::{BrandConfig, Rgb, TonalPaletteError, TonalPaletteProvider};
pub use emit::PluginApi;
pub use error::{EngineError, TokenError};
pub use theme::{ThemeCompositionGraph, ThemeConfig, ThemeTokenManager};
pub use token::{Category, Token};

/// Entry point tying the composition graph to an optional tonal palette
/// provider
pub struct Engine {
    graph: ThemeCompositionGraph,
    tonal: Option<Box<dyn TonalPaletteProvider>>,
}

impl Engine {
    pub fn new(configs: impl IntoIterator<Item = ThemeConfig>) -> Self {
        Self {
            graph: ThemeCompositionGraph::new(configs),
            tonal: None,
        }
    }

    /// Inject the provider that fills in `brand` color entries
    pub fn with_tonal_provider(mut self, provider: Box<dyn TonalPaletteProvider>) -> Self {
        self.tonal = Some(provider);
        self
    }

    /// Load one theme with its dependency subtree
    pub fn theme(&self, name: &str) -> Result<ThemeTokenManager, EngineError> {
        self.graph.load(name, self.tonal.as_deref())
    }

    /// Load every configured theme, dependencies ordered first
    pub fn themes(&self) -> Result<Vec<ThemeTokenManager>, EngineError> {
        self.graph.load_all(self.tonal.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_engine_end_to_end() {
        let configs: Vec<ThemeConfig> = serde_json::from_str(
            r##"[
                {
                    "name": "light",
                    "colors": [
                        {"type": "literal", "name": "ink", "value": "#111827"}
                    ],
                    "spacing": [
                        {"type": "range", "min": 1, "max": 2, "factor": 4}
                    ]
                },
                {
                    "name": "dark",
                    "selectors": [".dark"],
                    "dependencies": ["light"],
                    "colors": [
                        {"type": "literal", "name": "paper", "value": "{color.ink}"}
                    ]
                }
            ]"##,
        )
        .unwrap();

        let engine = Engine::new(configs);
        let dark = engine.theme("dark").unwrap();
        assert_eq!(
            dark.tokens(Category::Color)
                .iter()
                .find(|t| t.name == "paper")
                .unwrap()
                .value,
            "var(--color-ink)"
        );
        assert!(dark.css().starts_with(".dark {"));

        let all = engine.themes().unwrap();
        let names: Vec<&str> = all.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["light", "dark"]);
    }
}
