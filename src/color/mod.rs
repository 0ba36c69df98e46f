//! Color subsystem: value types, easing, scale generation, brand seam

pub mod brand;
pub mod easing;
pub mod scale;
pub mod space;

pub use brand::{BrandConfig, CustomColor, RoleConfig, TonalPaletteError, TonalPaletteProvider};
pub use scale::{generate as generate_scale, ColorSeed, ModifierRange, ScaleMode, ScaleStep};
pub use space::{format_hsl, ColorError, Rgb};
