//! TokenStore: ordered per-category token storage with delegate chaining
//!
//! A store owns the tokens of one category for one theme. Lookup falls back
//! to an optional delegate store of the same category; that chain is how a
//! dependent theme sees a dependency's tokens. The delegate is only ever a
//! lookup target, never written through.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};

use crate::token::category::Category;
use crate::token::reference::{normalize_name, tokenize, Segment};
use crate::token::{CssBinding, Token};

pub type SharedStore = Rc<RefCell<TokenStore>>;

#[derive(Debug)]
pub struct TokenStore {
    category: Category,
    prefix: String,
    tokens: Vec<Token>,
    /// Normalized name -> position in `tokens`
    index: HashMap<String, usize>,
    delegate: Option<SharedStore>,
}

impl TokenStore {
    pub fn new(category: Category, prefix: &str) -> Self {
        let mut store = Self {
            category,
            prefix: prefix.to_string(),
            tokens: Vec::new(),
            index: HashMap::new(),
            delegate: None,
        };
        for (name, value) in category.behavior().defaults {
            store.insert_plain(name, (*value).to_string());
        }
        store
    }

    pub fn with_delegate(category: Category, prefix: &str, delegate: SharedStore) -> Self {
        let mut store = Self::new(category, prefix);
        store.delegate = Some(delegate);
        store
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Tokens in insertion order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Change the prefix applied to subsequently inserted variable names.
    /// Shared scope stores receive tokens from several themes in turn; each
    /// theme sets its own prefix before writing.
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    /// Insert a token with a CSS variable binding. Re-inserting a name
    /// replaces the previous entry in place, never duplicates.
    pub fn insert(&mut self, name: &str, value: String) {
        let variable_name = self.variable_name(name);
        let css = Some(CssBinding {
            variable_expression: format!("var({variable_name})"),
            variable_name,
        });
        self.insert_token(Token {
            name: name.to_string(),
            value,
            css,
        });
    }

    /// Insert a token without a CSS binding; references to it resolve to
    /// the literal value
    pub fn insert_plain(&mut self, name: &str, value: String) {
        self.insert_token(Token {
            name: name.to_string(),
            value,
            css: None,
        });
    }

    fn insert_token(&mut self, token: Token) {
        let key = normalize_name(&token.name);
        match self.index.get(&key) {
            Some(&pos) => self.tokens[pos] = token,
            None => {
                self.index.insert(key, self.tokens.len());
                self.tokens.push(token);
            }
        }
    }

    fn variable_name(&self, name: &str) -> String {
        let name = normalize_name(name);
        let segment = self.category.var_segment();
        if self.prefix.is_empty() {
            format!("--{segment}-{name}")
        } else {
            format!("--{}-{segment}-{name}", self.prefix)
        }
    }

    /// Look up a token by reference path, local first, then down the
    /// delegate chain
    pub fn get(&self, path: &str) -> Option<Token> {
        let key = normalize_name(path);
        if let Some(&pos) = self.index.get(&key) {
            return Some(self.tokens[pos].clone());
        }
        self.delegate
            .as_ref()
            .and_then(|delegate| delegate.borrow().get(path))
    }

    /// Replace every `{tag.path}` reference of this store's category with
    /// the referenced token's `var(...)` form (or literal value when it has
    /// no binding). Unmatched references stay verbatim; `${...}` system
    /// placeholders always stay verbatim. Lookup recurses through the
    /// delegate chain.
    pub fn resolve_references(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for segment in tokenize(text) {
            match segment {
                Segment::Text(t) | Segment::System(t) => out.push_str(t),
                Segment::Reference {
                    category,
                    path,
                    raw,
                } => {
                    if category != self.category.tag() {
                        out.push_str(raw);
                        continue;
                    }
                    match self.get(path) {
                        Some(token) => out.push_str(token.reference_value()),
                        None => {
                            warn!(
                                "unresolved {} reference `{raw}` left verbatim",
                                self.category
                            );
                            out.push_str(raw);
                        }
                    }
                }
            }
        }
        out
    }

    /// Given `var(--x)` or `var(--x, fallback)`, return the value of the
    /// token bound to `--x`, searching the delegate chain. Returns the
    /// input unchanged when nothing matches (fail-open: a miss here may be
    /// a foreign variable the host defines elsewhere).
    pub fn resolve_absolute(&self, expr: &str) -> String {
        let Some(variable) = variable_of(expr) else {
            return expr.to_string();
        };
        match self.find_by_variable(variable) {
            Some(value) => value,
            None => {
                debug!(
                    "no {} token bound to `{variable}`, leaving `{expr}` unchanged",
                    self.category
                );
                expr.to_string()
            }
        }
    }

    fn find_by_variable(&self, variable: &str) -> Option<String> {
        let local = self.tokens.iter().find_map(|token| {
            token
                .css
                .as_ref()
                .filter(|css| css.variable_name == variable)
                .map(|_| token.value.clone())
        });
        local.or_else(|| {
            self.delegate
                .as_ref()
                .and_then(|delegate| delegate.borrow().find_by_variable(variable))
        })
    }
}

/// Extract the variable name out of `var(--x)` / `var(--x, fallback)`
fn variable_of(expr: &str) -> Option<&str> {
    let inner = expr.trim().strip_prefix("var(")?.strip_suffix(')')?;
    let name = match inner.split_once(',') {
        Some((name, _fallback)) => name,
        None => inner,
    };
    let name = name.trim();
    name.starts_with("--").then_some(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store(category: Category) -> TokenStore {
        TokenStore::new(category, "")
    }

    #[test]
    fn test_insert_builds_binding() {
        let mut colors = store(Category::Color);
        colors.insert("brand", "hsl(221 73% 40%)".to_string());

        let token = colors.get("brand").unwrap();
        let css = token.css.unwrap();
        assert_eq!(css.variable_name, "--color-brand");
        assert_eq!(css.variable_expression, "var(--color-brand)");
    }

    #[test]
    fn test_prefix_in_variable_name() {
        let mut spacing = TokenStore::new(Category::Spacing, "tf");
        spacing.insert("2", "0.5rem".to_string());
        let css = spacing.get("2").unwrap().css.unwrap();
        assert_eq!(css.variable_name, "--tf-spacing-2");
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut spacing = store(Category::Spacing);
        spacing.insert("1", "0.25rem".to_string());
        spacing.insert("2", "0.5rem".to_string());
        spacing.insert("1", "0.3rem".to_string());

        let names: Vec<&str> = spacing.tokens().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2"]);
        assert_eq!(spacing.get("1").unwrap().value, "0.3rem");
    }

    #[test]
    fn test_dotted_name_addressable() {
        let mut spacing = store(Category::Spacing);
        spacing.insert("0.5", "0.125rem".to_string());

        let css = spacing.get("0.5").unwrap().css.unwrap();
        assert_eq!(css.variable_name, "--spacing-0-5");
        assert_eq!(
            spacing.resolve_references("{spacing.0.5}"),
            "var(--spacing-0-5)"
        );
    }

    #[test]
    fn test_resolve_references_substitutes_own_category() {
        let mut spacing = store(Category::Spacing);
        spacing.insert("2", "0.5rem".to_string());

        assert_eq!(
            spacing.resolve_references("{spacing.2} + 1rem"),
            "var(--spacing-2) + 1rem"
        );
        // Foreign category left for that category's store.
        assert_eq!(
            spacing.resolve_references("{color.brand}"),
            "{color.brand}"
        );
    }

    #[test]
    fn test_unmatched_reference_verbatim() {
        let spacing = store(Category::Spacing);
        assert_eq!(
            spacing.resolve_references("{spacing.missing}"),
            "{spacing.missing}"
        );
    }

    #[test]
    fn test_plain_token_resolves_to_literal() {
        let mut colors = store(Category::Color);
        colors.insert_plain("ink", "hsl(0 0% 10%)".to_string());
        assert_eq!(colors.resolve_references("{color.ink}"), "hsl(0 0% 10%)");
    }

    #[test]
    fn test_default_color_keywords() {
        let colors = store(Category::Color);
        assert_eq!(
            colors.resolve_references("{color.transparent}"),
            "transparent"
        );
        assert_eq!(colors.resolve_references("{color.current}"), "currentColor");
    }

    #[test]
    fn test_delegate_chain_lookup() {
        let mut base = store(Category::Color);
        base.insert("brand", "hsl(221 73% 40%)".to_string());
        let base = Rc::new(RefCell::new(base));

        let dependent = TokenStore::with_delegate(Category::Color, "", Rc::clone(&base));
        assert_eq!(
            dependent.resolve_references("{color.brand}"),
            "var(--color-brand)"
        );
    }

    #[test]
    fn test_local_wins_over_delegate() {
        let mut base = store(Category::Color);
        base.insert_plain("brand", "base".to_string());
        let base = Rc::new(RefCell::new(base));

        let mut dependent = TokenStore::with_delegate(Category::Color, "", base);
        dependent.insert_plain("brand", "local".to_string());
        assert_eq!(dependent.resolve_references("{color.brand}"), "local");
    }

    #[test]
    fn test_resolve_absolute_round_trip() {
        let mut colors = store(Category::Color);
        colors.insert("brand", "hsl(221 73% 40%)".to_string());

        let resolved = colors.resolve_references("{color.brand}");
        assert_eq!(resolved, "var(--color-brand)");
        assert_eq!(colors.resolve_absolute(&resolved), "hsl(221 73% 40%)");
    }

    #[test]
    fn test_resolve_absolute_with_fallback_syntax() {
        let mut colors = store(Category::Color);
        colors.insert("brand", "hsl(221 73% 40%)".to_string());
        assert_eq!(
            colors.resolve_absolute("var(--color-brand, #fff)"),
            "hsl(221 73% 40%)"
        );
    }

    #[test]
    fn test_resolve_absolute_fail_open() {
        let colors = store(Category::Color);
        assert_eq!(
            colors.resolve_absolute("var(--color-nope)"),
            "var(--color-nope)"
        );
        assert_eq!(colors.resolve_absolute("not-a-var"), "not-a-var");
    }

    #[test]
    fn test_resolve_absolute_through_delegate() {
        let mut base = store(Category::Color);
        base.insert("brand", "hsl(221 73% 40%)".to_string());
        let base = Rc::new(RefCell::new(base));

        let dependent = TokenStore::with_delegate(Category::Color, "", base);
        assert_eq!(
            dependent.resolve_absolute("var(--color-brand)"),
            "hsl(221 73% 40%)"
        );
    }

    #[test]
    fn test_system_placeholder_untouched() {
        let colors = store(Category::Color);
        assert_eq!(
            colors.resolve_references("${light.color.brand}"),
            "${light.color.brand}"
        );
    }
}
