//! Color value types and conversions: hex parsing, RGB/HSB/HSL, formatting
//!
//! Everything here is deterministic: the same input color always produces
//! the same output string. Formatting rounds components to two decimals and
//! strips trailing zeros, which is the single rounding rule of the engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Opaque sRGB color (0-255 per channel)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (#RGB or #RRGGBB)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');

        if !digits.is_ascii() {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        match digits.len() {
            3 => {
                let r = parse_hex_byte(&digits[0..1], hex)? * 17;
                let g = parse_hex_byte(&digits[1..2], hex)? * 17;
                let b = parse_hex_byte(&digits[2..3], hex)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = parse_hex_byte(&digits[0..2], hex)?;
                let g = parse_hex_byte(&digits[2..4], hex)?;
                let b = parse_hex_byte(&digits[4..6], hex)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Decompose into hue (degrees), saturation and brightness (both 0..1)
    pub fn to_hsb(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = hue_degrees(r, g, b, max, delta);
        let s = if max == 0.0 { 0.0 } else { delta / max };

        (h, s, max)
    }

    /// Exact HSL of the color, formatted without an alpha term
    pub fn to_hsl_string(self) -> String {
        let (h, s, l) = rgb_to_hsl(f64::from(self.r), f64::from(self.g), f64::from(self.b));
        format_hsl(h, s, l, None)
    }
}

fn parse_hex_byte(s: &str, full: &str) -> Result<u8, ColorError> {
    u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(full.to_string()))
}

fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0).rem_euclid(360.0)
}

/// Recompose floating-point RGB channels (0..255) from hue (degrees),
/// saturation and brightness (0..1)
pub fn hsb_to_rgb(h: f64, s: f64, b: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = b * s;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = b - c;

    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    ((r1 + m) * 255.0, (g1 + m) * 255.0, (b1 + m) * 255.0)
}

/// HSL of floating-point RGB channels (0..255): hue in degrees, saturation
/// and lightness as percentages
pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    let h = hue_degrees(r, g, b, max, delta);

    (h, s * 100.0, l * 100.0)
}

/// Format an `hsl()` value. Components round to two decimals with trailing
/// zeros stripped; `alpha` of `None` omits the ` / A` term.
pub fn format_hsl(h: f64, s: f64, l: f64, alpha: Option<f64>) -> String {
    match alpha {
        Some(a) => format!(
            "hsl({} {}% {}% / {})",
            fmt2(h),
            fmt2(s),
            fmt2(l),
            fmt2(a)
        ),
        None => format!("hsl({} {}% {}%)", fmt2(h), fmt2(s), fmt2(l)),
    }
}

/// Two-decimal rounding with trailing zeros stripped: `1.00` -> `1`,
/// `0.030` -> `0.03`
pub fn fmt2(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
