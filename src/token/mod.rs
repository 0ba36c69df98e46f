//! Tokens, categories and the per-category store

pub mod category;
pub mod reference;
pub mod store;

pub use category::{Category, CategoryBehavior};
pub use store::TokenStore;

/// CSS custom-property binding of a token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssBinding {
    /// `--prefix-category-name`
    pub variable_name: String,
    /// `var(--prefix-category-name)`
    pub variable_expression: String,
}

/// A named, fully resolved design value.
///
/// After its theme finishes loading, `value` is reference-free: every
/// `{category.path}` placeholder the engine could resolve has been replaced
/// by either a `var(...)` expression or a literal value.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub name: String,
    pub value: String,
    pub css: Option<CssBinding>,
}

impl Token {
    /// The text a reference to this token resolves to: the `var(...)` form
    /// when a binding exists, the literal value otherwise
    pub fn reference_value(&self) -> &str {
        match &self.css {
            Some(binding) => &binding.variable_expression,
            None => &self.value,
        }
    }
}
