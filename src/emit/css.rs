//! CSS custom-property output

use crate::theme::manager::ThemeTokenManager;
use crate::token::Category;

/// Ordered `--name: value;` declarations across all categories. Tokens
/// without a variable binding are resolution-only and never emitted.
pub fn lines(manager: &ThemeTokenManager) -> Vec<String> {
    let mut out = Vec::new();
    for category in Category::ALL {
        for token in manager.tokens(category) {
            if let Some(css) = &token.css {
                out.push(format!("{}: {};", css.variable_name, token.value));
            }
        }
    }
    out
}

/// Complete rule block under the theme's selectors
pub fn rule(manager: &ThemeTokenManager) -> String {
    let mut out = manager.selectors().join(",\n");
    out.push_str(" {\n");
    for line in lines(manager) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::config::{LiteralEntry, ScaleEntry, ThemeConfig};

    fn manager() -> ThemeTokenManager {
        let config = ThemeConfig {
            name: "test".to_string(),
            selectors: vec![":root".to_string(), ".light".to_string()],
            spacing: vec![
                ScaleEntry::Literal(LiteralEntry::new("1", "4px")),
                ScaleEntry::Literal(LiteralEntry::new("2", "8px")),
            ],
            ..ThemeConfig::default()
        };
        ThemeTokenManager::load(&config, None, None).unwrap()
    }

    #[test]
    fn test_lines_carry_bindings_only() {
        // The color keyword defaults have no bindings and stay out.
        assert_eq!(
            lines(&manager()),
            vec!["--spacing-1: 0.25rem;", "--spacing-2: 0.5rem;"]
        );
    }

    #[test]
    fn test_rule_joins_selectors() {
        let css = rule(&manager());
        assert_eq!(
            css,
            ":root,\n.light {\n  --spacing-1: 0.25rem;\n  --spacing-2: 0.5rem;\n}\n"
        );
    }

    #[test]
    fn test_default_selector_is_root() {
        let config = ThemeConfig {
            name: "test".to_string(),
            ..ThemeConfig::default()
        };
        let manager = ThemeTokenManager::load(&config, None, None).unwrap();
        assert!(rule(&manager).starts_with(":root {"));
    }
}
