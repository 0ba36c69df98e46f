//! Tailwind projection: theme configuration fragments and typography
//! utility classes

use serde_json::{Map, Value};

use crate::theme::manager::ThemeTokenManager;
use crate::token::{Category, Token};

/// Host-side registration hook for generated utility classes. Mirrors the
/// `addUtilities` surface of a Tailwind plugin.
pub trait PluginApi {
    fn add_utilities(&mut self, utilities: Value);
}

/// Theme configuration fragment keyed the way Tailwind expects
/// (`colors`, `spacing`, `borderRadius`, ...). Generated color scales nest
/// one object per scale with their step suffixes as keys; everything else
/// is flat. With `absolute`, values are the resolved literals instead of
/// `var(...)` expressions.
pub fn config(manager: &ThemeTokenManager, absolute: bool) -> Value {
    let mut root = Map::new();
    for category in Category::ALL {
        // Typography is projected as utility classes, not config.
        if category == Category::Typography {
            continue;
        }
        let section = if category == Category::Color {
            colors_section(manager, absolute)
        } else {
            flat_section(manager, category, absolute)
        };
        if !section.is_empty() {
            root.insert(category.tailwind_key().to_string(), Value::Object(section));
        }
    }
    Value::Object(root)
}

fn flat_section(
    manager: &ThemeTokenManager,
    category: Category,
    absolute: bool,
) -> Map<String, Value> {
    manager
        .tokens(category)
        .iter()
        .map(|token| {
            (
                token.name.clone(),
                Value::String(value_of(manager, token, absolute)),
            )
        })
        .collect()
}

/// Color section: one nested object per generated scale, remaining tokens
/// flat
fn colors_section(manager: &ThemeTokenManager, absolute: bool) -> Map<String, Value> {
    let tokens = manager.tokens(Category::Color);
    let mut section = Map::new();
    let mut consumed = std::collections::HashSet::new();

    for outline in manager.scales() {
        let mut nested = Map::new();
        for suffix in &outline.steps {
            let token_name = if suffix == "DEFAULT" {
                outline.name.clone()
            } else {
                format!("{}-{}", outline.name, suffix)
            };
            if let Some(token) = tokens.iter().find(|t| t.name == token_name) {
                nested.insert(
                    suffix.clone(),
                    Value::String(value_of(manager, token, absolute)),
                );
                consumed.insert(token_name);
            }
        }
        section.insert(outline.name.clone(), Value::Object(nested));
    }

    for token in &tokens {
        if !consumed.contains(&token.name) {
            section.insert(
                token.name.clone(),
                Value::String(value_of(manager, token, absolute)),
            );
        }
    }
    section
}

/// `.typography-{name}` utility classes, one property per configured field
pub fn typography_utilities(manager: &ThemeTokenManager) -> Value {
    let tokens = manager.tokens(Category::Typography);
    let mut utilities = Map::new();
    for outline in manager.typography() {
        let mut properties = Map::new();
        for (property, token_name) in &outline.fields {
            if let Some(token) = tokens.iter().find(|t| &t.name == token_name) {
                properties.insert(
                    (*property).to_string(),
                    Value::String(token.reference_value().to_string()),
                );
            }
        }
        utilities.insert(
            format!(".typography-{}", outline.name),
            Value::Object(properties),
        );
    }
    Value::Object(utilities)
}

pub fn apply(manager: &ThemeTokenManager, api: &mut dyn PluginApi) {
    api.add_utilities(typography_utilities(manager));
}

fn value_of(manager: &ThemeTokenManager, token: &Token, absolute: bool) -> String {
    if absolute {
        manager.resolve_absolute_value(&token.value)
    } else {
        token.reference_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::color::{ModifierRange, ScaleMode};
    use crate::theme::config::{
        ColorEntry, LiteralEntry, ScaleEntry, SeedEntry, ThemeConfig, TypographyStyle,
    };

    fn manager() -> ThemeTokenManager {
        let config = ThemeConfig {
            name: "test".to_string(),
            colors: vec![
                ColorEntry::Literal(LiteralEntry::new("ink", "#111827")),
                ColorEntry::Seed(SeedEntry {
                    name: "brand".to_string(),
                    value: "#ffffff".to_string(),
                    mode: ScaleMode::Alpha,
                    solid_light: None,
                    solid_dark: None,
                    range: ModifierRange {
                        min: 50,
                        max: 100,
                        step: 50,
                    },
                }),
            ],
            spacing: vec![ScaleEntry::Literal(LiteralEntry::new("1", "4px"))],
            typography: vec![TypographyStyle {
                name: "body".to_string(),
                font_size: Some("16px".to_string()),
                line_height: Some("1.5".to_string()),
                ..TypographyStyle::default()
            }],
            ..ThemeConfig::default()
        };
        ThemeTokenManager::load(&config, None, None).unwrap()
    }

    #[test]
    fn test_scales_nest_with_default_key() {
        let config = config(&manager(), false);
        let brand = &config["colors"]["brand"];
        assert_eq!(brand["50"], json!("var(--color-brand-50)"));
        assert_eq!(brand["100"], json!("var(--color-brand-100)"));
        assert_eq!(brand["DEFAULT"], json!("var(--color-brand)"));
    }

    #[test]
    fn test_flat_tokens_and_keyword_defaults() {
        let config = config(&manager(), false);
        assert_eq!(config["colors"]["ink"], json!("var(--color-ink)"));
        assert_eq!(config["colors"]["current"], json!("currentColor"));
        assert_eq!(config["spacing"]["1"], json!("var(--spacing-1)"));
    }

    #[test]
    fn test_absolute_mode_resolves_literals() {
        let config = config(&manager(), true);
        assert_eq!(config["spacing"]["1"], json!("0.25rem"));
        assert_eq!(config["colors"]["ink"], json!("#111827"));
    }

    #[test]
    fn test_typography_excluded_from_config() {
        let config = config(&manager(), false);
        assert!(config.get("typography").is_none());
    }

    #[test]
    fn test_typography_utilities_shape() {
        assert_eq!(
            typography_utilities(&manager()),
            json!({
                ".typography-body": {
                    "fontSize": "var(--typography-body-font-size)",
                    "lineHeight": "var(--typography-body-line-height)",
                }
            })
        );
    }

    struct Recorder(Vec<Value>);

    impl PluginApi for Recorder {
        fn add_utilities(&mut self, utilities: Value) {
            self.0.push(utilities);
        }
    }

    #[test]
    fn test_apply_registers_utilities() {
        let mut recorder = Recorder(Vec::new());
        apply(&manager(), &mut recorder);
        assert_eq!(recorder.0.len(), 1);
        assert!(recorder.0[0]
            .as_object()
            .unwrap()
            .contains_key(".typography-body"));
    }
}
