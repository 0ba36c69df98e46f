//! ThemeCompositionGraph: dependency ordering and cycle detection
//!
//! Themes may depend on other themes. Loading a theme first loads its
//! dependency subtree depth-first into one shared scope (a global store per
//! category), then loads the theme itself into private stores that delegate
//! to the scope. Visibility is one-directional: a dependency never sees the
//! tokens of the themes above it.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::color::TonalPaletteProvider;
use crate::error::EngineError;
use crate::theme::config::ThemeConfig;
use crate::theme::manager::{Scope, ThemeTokenManager};

pub struct ThemeCompositionGraph {
    configs: HashMap<String, ThemeConfig>,
    /// Declaration order, the baseline for batch output
    order: Vec<String>,
}

impl ThemeCompositionGraph {
    pub fn new(configs: impl IntoIterator<Item = ThemeConfig>) -> Self {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for config in configs {
            if !map.contains_key(&config.name) {
                order.push(config.name.clone());
            }
            map.insert(config.name.clone(), config);
        }
        Self {
            configs: map,
            order,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// Load one theme and its dependency subtree
    pub fn load(
        &self,
        name: &str,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<ThemeTokenManager, EngineError> {
        let config = self
            .configs
            .get(name)
            .ok_or_else(|| EngineError::UnknownTheme(name.to_string()))?;

        let scope = ThemeTokenManager::new_scope(&config.prefix);
        let mut chain = vec![name.to_string()];
        let mut on_stack = HashSet::from([name.to_string()]);
        let mut loaded = HashSet::new();
        self.load_dependencies(config, &scope, &mut chain, &mut on_stack, &mut loaded, tonal)?;

        ThemeTokenManager::load(config, Some(&scope), tonal)
    }

    /// Depth-first load of the dependency subtree into the shared scope.
    /// `chain`/`on_stack` track the path currently being loaded: a name
    /// reappearing on the stack is a cycle, reported with the full chain.
    fn load_dependencies(
        &self,
        config: &ThemeConfig,
        scope: &Scope,
        chain: &mut Vec<String>,
        on_stack: &mut HashSet<String>,
        loaded: &mut HashSet<String>,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<(), EngineError> {
        for dependency in &config.dependencies {
            if on_stack.contains(dependency) {
                chain.push(dependency.clone());
                return Err(EngineError::DependencyCycle {
                    chain: chain.join(" -> "),
                });
            }
            if loaded.contains(dependency) {
                // Diamond: already written into the scope by a sibling.
                continue;
            }
            let dep_config =
                self.configs
                    .get(dependency)
                    .ok_or_else(|| EngineError::MissingDependency {
                        name: dependency.clone(),
                        required_by: config.name.clone(),
                    })?;

            chain.push(dependency.clone());
            on_stack.insert(dependency.clone());
            self.load_dependencies(dep_config, scope, chain, on_stack, loaded, tonal)?;
            debug!("loading dependency `{dependency}` into shared scope");
            ThemeTokenManager::load_into_scope(dep_config, scope, tonal)?;
            chain.pop();
            on_stack.remove(dependency);
            loaded.insert(dependency.clone());
        }
        Ok(())
    }

    /// Load every theme, ordered so a theme sorts before any theme that
    /// directly depends on it. Placement is a pairwise insertion pass over
    /// declaration order, not a full topological sort; unrelated themes
    /// keep their declaration order.
    pub fn load_all(
        &self,
        tonal: Option<&dyn TonalPaletteProvider>,
    ) -> Result<Vec<ThemeTokenManager>, EngineError> {
        let mut names: Vec<&String> = Vec::with_capacity(self.order.len());
        for name in &self.order {
            let pos = names
                .iter()
                .position(|placed| self.configs[*placed].dependencies.contains(name))
                .unwrap_or(names.len());
            names.insert(pos, name);
        }

        names
            .into_iter()
            .map(|name| self.load(name, tonal))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::config::{ColorEntry, LiteralEntry};
    use crate::token::Category;

    fn theme(name: &str, dependencies: &[&str]) -> ThemeConfig {
        ThemeConfig {
            name: name.to_string(),
            dependencies: dependencies.iter().map(|d| (*d).to_string()).collect(),
            ..ThemeConfig::default()
        }
    }

    fn with_color(mut config: ThemeConfig, name: &str, value: &str) -> ThemeConfig {
        config
            .colors
            .push(ColorEntry::Literal(LiteralEntry::new(name, value)));
        config
    }

    #[test]
    fn test_two_theme_cycle_reports_chain() {
        let graph = ThemeCompositionGraph::new([theme("a", &["b"]), theme("b", &["a"])]);
        let err = graph.load("a", None).unwrap_err();
        match err {
            EngineError::DependencyCycle { chain } => assert_eq!(chain, "a -> b -> a"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_self_cycle_reports_chain() {
        let graph = ThemeCompositionGraph::new([theme("a", &["a"])]);
        let err = graph.load("a", None).unwrap_err();
        match err {
            EngineError::DependencyCycle { chain } => assert_eq!(chain, "a -> a"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_missing_dependency_named() {
        let graph = ThemeCompositionGraph::new([theme("a", &["ghost"])]);
        let err = graph.load("a", None).unwrap_err();
        match err {
            EngineError::MissingDependency { name, required_by } => {
                assert_eq!(name, "ghost");
                assert_eq!(required_by, "a");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_dependency_tokens_visible_upward() {
        let base = with_color(theme("b", &[]), "brand", "#1e40af");
        let graph = ThemeCompositionGraph::new([base, theme("a", &["b"])]);

        let a = graph.load("a", None).unwrap();
        assert_eq!(
            a.resolve_references("{color.brand}"),
            "var(--color-brand)"
        );
    }

    #[test]
    fn test_unrelated_theme_does_not_see_tokens() {
        let base = with_color(theme("b", &[]), "brand", "#1e40af");
        let graph =
            ThemeCompositionGraph::new([base, theme("a", &["b"]), theme("c", &[])]);

        let c = graph.load("c", None).unwrap();
        assert_eq!(c.resolve_references("{color.brand}"), "{color.brand}");
    }

    #[test]
    fn test_dependency_does_not_see_dependent_tokens() {
        // b is loaded before a's own tokens exist; references in b to a's
        // tokens stay verbatim.
        let base = with_color(theme("b", &[]), "accent", "{color.own}");
        let top = with_color(theme("a", &["b"]), "own", "#111827");
        let graph = ThemeCompositionGraph::new([base, top]);

        let a = graph.load("a", None).unwrap();
        // b's token kept the unresolved reference.
        assert_eq!(
            a.resolve_references("{color.accent}"),
            "var(--color-accent)"
        );
        assert_eq!(
            a.resolve_absolute_value("var(--color-accent)"),
            "{color.own}"
        );
    }

    #[test]
    fn test_transitive_dependencies_share_scope() {
        let c = with_color(theme("c", &[]), "base", "#000000");
        let b = with_color(theme("b", &["c"]), "mid", "{color.base}");
        let a = theme("a", &["b"]);
        let graph = ThemeCompositionGraph::new([a, b, c]);

        let a = graph.load("a", None).unwrap();
        assert_eq!(
            a.resolve_references("{color.base}"),
            "var(--color-base)"
        );
        assert_eq!(
            a.resolve_absolute_value("var(--color-mid)"),
            "var(--color-base)"
        );
    }

    #[test]
    fn test_dependency_redeclaration_replaces() {
        let c = with_color(theme("c", &[]), "brand", "#000000");
        let b = with_color(theme("b", &["c"]), "brand", "#ffffff");
        let graph = ThemeCompositionGraph::new([theme("a", &["b"]), b, c]);

        let a = graph.load("a", None).unwrap();
        let shared: Vec<String> = a
            .tokens(Category::Color)
            .iter()
            .map(|t| t.name.clone())
            .collect();
        // Own store holds only the defaults; the shared brand resolves to
        // b's replacement value.
        assert!(!shared.contains(&"brand".to_string()));
        assert_eq!(a.resolve_absolute_value("var(--color-brand)"), "#ffffff");
    }

    #[test]
    fn test_batch_order_dependencies_first() {
        let light = theme("light", &[]);
        let dark = theme("dark", &["light"]);
        let graph = ThemeCompositionGraph::new([dark, light]);

        let managers = graph.load_all(None).unwrap();
        let names: Vec<&str> = managers.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["light", "dark"]);
    }

    #[test]
    fn test_batch_order_stable_for_unrelated_themes() {
        // a is declared last but c depends on it; b is unrelated and keeps
        // its declaration position after c.
        let graph = ThemeCompositionGraph::new([
            theme("c", &["a"]),
            theme("b", &[]),
            theme("a", &[]),
        ]);
        let managers = graph.load_all(None).unwrap();
        let names: Vec<&str> = managers.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_unknown_theme() {
        let graph = ThemeCompositionGraph::new([theme("a", &[])]);
        assert!(matches!(
            graph.load("ghost", None),
            Err(EngineError::UnknownTheme(_))
        ));
    }
}
