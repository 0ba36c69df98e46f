//! Brand palette seam
//!
//! Tonal (Material-style) brand palettes are an external capability: the
//! engine hands a source color and role configuration to an injected
//! provider and gets back an ordered `role -> color` map. Each role is then
//! fed through the regular seed/scale path, so the provider's internals
//! never leak into token emission.

use serde::Deserialize;
use thiserror::Error;

use crate::color::space::Rgb;

/// Roles a provider is expected to fill when none are disabled
pub const DEFAULT_ROLES: [&str; 6] = [
    "primary",
    "secondary",
    "tertiary",
    "neutral",
    "neutral-variant",
    "error",
];

/// Brand palette request from the theme configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    /// Source color (hex) the roles derive from
    pub source: String,

    /// Per-role adjustments; roles not listed use provider defaults
    #[serde(default)]
    pub roles: Vec<RoleConfig>,

    /// Additional custom colors, optionally blended toward the source
    #[serde(default)]
    pub custom: Vec<CustomColor>,
}

/// Per-role disable/override
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfig {
    pub name: String,

    #[serde(default)]
    pub disabled: bool,

    /// Replacement source color (hex) for this role only
    #[serde(default)]
    pub source: Option<String>,
}

/// A named custom color carried alongside the generated roles
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomColor {
    pub name: String,
    pub value: String,

    /// Blend the color toward the brand source before emission
    #[serde(default)]
    pub blend: bool,
}

#[derive(Error, Debug)]
#[error("{0}")]
pub struct TonalPaletteError(pub String);

/// External tonal-palette capability.
///
/// Implementations receive the parsed source color and the full brand
/// request and return the ordered `role -> color` map; the engine treats
/// each entry as a scale seed named after the role.
pub trait TonalPaletteProvider {
    fn generate(
        &self,
        source: Rgb,
        config: &BrandConfig,
    ) -> Result<Vec<(String, Rgb)>, TonalPaletteError>;
}
