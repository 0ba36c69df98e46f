//! Theme configuration, composition and loading

pub mod config;
pub mod graph;
pub mod manager;

pub use config::ThemeConfig;
pub use graph::ThemeCompositionGraph;
pub use manager::ThemeTokenManager;
