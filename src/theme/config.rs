//! Validated theme configuration, the input seam of the engine
//!
//! Hosts deserialize and schema-check their YAML/JSON upstream; the engine
//! only ever sees these already-typed structures. Entry lists are ordered:
//! later entries may reference earlier ones, and re-declaring a name
//! replaces the earlier token.

use serde::Deserialize;

use crate::color::{BrandConfig, ModifierRange, ScaleMode};

/// Complete configuration of one theme
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub name: String,

    /// CSS selectors the theme's variable block is emitted under;
    /// empty means `:root`
    #[serde(default)]
    pub selectors: Vec<String>,

    /// Names of themes whose tokens this theme can reference
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Prefix for every emitted variable name (`--prefix-category-name`)
    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub colors: Vec<ColorEntry>,

    #[serde(default)]
    pub spacing: Vec<ScaleEntry>,

    #[serde(default)]
    pub radius: Vec<ScaleEntry>,

    #[serde(default)]
    pub font_family: Vec<LiteralEntry>,

    #[serde(default)]
    pub font_weight: Vec<LiteralEntry>,

    #[serde(default)]
    pub line_height: Vec<LiteralEntry>,

    #[serde(default)]
    pub font_size: Vec<ScaleEntry>,

    #[serde(default)]
    pub letter_spacing: Vec<LiteralEntry>,

    #[serde(default)]
    pub typography: Vec<TypographyStyle>,
}

/// A literal token declaration
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralEntry {
    pub name: String,

    /// Raw value; may contain `{category.path}` references and arithmetic
    pub value: String,

    /// Emit a CSS variable binding (references then resolve to `var(...)`);
    /// when false the token stays a plain value
    #[serde(default = "default_true")]
    pub var: bool,
}

/// Color category entry
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorEntry {
    /// A single color value (hex, hsl, reference)
    Literal(LiteralEntry),
    /// A seed expanded into a graded scale
    Seed(SeedEntry),
    /// A brand palette filled in by the injected tonal provider
    Brand(BrandConfig),
}

/// Scale-category entry (spacing, radius, font-size)
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScaleEntry {
    Literal(LiteralEntry),
    Range(RangeEntry),
}

/// Generates one token per step: names come from the step value, values
/// are `step * factor` in `unit`, normalized by the calculator
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeEntry {
    pub min: f64,
    pub max: f64,

    #[serde(default = "default_step")]
    pub step: f64,

    #[serde(default = "default_factor")]
    pub factor: f64,

    #[serde(default = "default_unit")]
    pub unit: String,
}

/// Color seed declaration
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub name: String,

    /// Seed color as hex
    pub value: String,

    #[serde(default)]
    pub mode: ScaleMode,

    /// Opaque background (hex) for additional `-sl` composite steps
    #[serde(default)]
    pub solid_light: Option<String>,

    /// Opaque background (hex) for additional `-sd` composite steps
    #[serde(default)]
    pub solid_dark: Option<String>,

    #[serde(default)]
    pub range: ModifierRange,
}

/// A composite typography style; absent fields are simply not emitted
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub name: String,

    #[serde(default)]
    pub font_family: Option<String>,

    #[serde(default)]
    pub font_size: Option<String>,

    #[serde(default)]
    pub font_weight: Option<String>,

    #[serde(default)]
    pub line_height: Option<String>,

    #[serde(default)]
    pub letter_spacing: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_step() -> f64 {
    1.0
}

fn default_factor() -> f64 {
    1.0
}

fn default_unit() -> String {
    "px".to_string()
}

impl LiteralEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            var: true,
        }
    }
}
