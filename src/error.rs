//! Engine error types
//!
//! All fatal errors raised during theme loading. Unresolved references are
//! deliberately not here: they are non-fatal and only logged.

use thiserror::Error;

use crate::color::ColorError;
use crate::expr::CalcError;

/// Top-level fatal error for a generation run
#[derive(Error, Debug)]
pub enum EngineError {
    /// Theme dependency graph contains a cycle. The chain lists every theme
    /// on the path, e.g. `a -> b -> a`.
    #[error("theme dependency cycle: {chain}")]
    DependencyCycle { chain: String },

    /// A declared dependency names a theme that does not exist
    #[error("missing theme dependency `{name}` (required by `{required_by}`)")]
    MissingDependency { name: String, required_by: String },

    /// A theme name was requested that no configuration defines
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    /// A token failed to load; the whole theme is aborted
    #[error("failed to load {category} token `{token}` in theme `{theme}`: {source}")]
    TokenLoad {
        theme: String,
        category: &'static str,
        token: String,
        #[source]
        source: TokenError,
    },
}

/// Per-token failure cause, wrapped into [`EngineError::TokenLoad`]
#[derive(Error, Debug)]
pub enum TokenError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Color(#[from] ColorError),

    /// Brand palette requested but no tonal provider was injected
    #[error("no tonal palette provider configured")]
    MissingTonalProvider,

    /// The injected tonal provider failed
    #[error("tonal palette provider failed: {0}")]
    TonalProvider(String),
}
