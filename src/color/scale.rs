//! Color-scale generation: seed color to graded HSL ramp
//!
//! A seed color expands into one token per modifier step. Alpha mode fades
//! the seed in through an eased opacity ramp; HSB mode walks independent
//! saturation/brightness axes and re-expresses each tonal step as a
//! transparent overlay whose composite over white reproduces it. Either
//! mode can additionally emit opaque composites over configured solid
//! backgrounds, and always emits a `DEFAULT` step with the seed itself.

use serde::Deserialize;

use crate::color::easing::{cubic_bezier, ease_in_quint, ease_in_sine, remap};
use crate::color::space::{format_hsl, hsb_to_rgb, rgb_to_hsl, Rgb};

/// Modifier index range of a generated scale
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModifierRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for ModifierRange {
    fn default() -> Self {
        Self {
            min: 50,
            max: 1000,
            step: 50,
        }
    }
}

/// How a seed expands into its ramp
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Hsb,
    Alpha,
}

/// A fully specified scale seed
#[derive(Clone, Debug)]
pub struct ColorSeed {
    pub name: String,
    pub rgb: Rgb,
    pub mode: ScaleMode,
    pub solid_light: Option<Rgb>,
    pub solid_dark: Option<Rgb>,
    pub range: ModifierRange,
}

/// One emitted step of a scale. `suffix` is the token-name suffix relative
/// to the seed name (`"500"`, `"500-sd"`, `"DEFAULT"`).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleStep {
    pub suffix: String,
    pub value: String,
}

/// Expand a seed into its ordered list of steps. Deterministic: identical
/// seeds produce byte-identical value strings.
pub fn generate(seed: &ColorSeed) -> Vec<ScaleStep> {
    let range = seed.range;
    let mut steps = Vec::new();

    let mut m = range.min;
    while m <= range.max {
        let (overlay, alpha) = match seed.mode {
            ScaleMode::Alpha => alpha_step(seed.rgb, m, range),
            ScaleMode::Hsb => hsb_step(seed.rgb, m, range),
        };

        steps.push(ScaleStep {
            suffix: m.to_string(),
            value: overlay_to_hsl(overlay, alpha),
        });

        if let Some(bg) = seed.solid_dark {
            steps.push(ScaleStep {
                suffix: format!("{m}-sd"),
                value: composite_to_hsl(overlay, alpha, bg),
            });
        }
        if let Some(bg) = seed.solid_light {
            steps.push(ScaleStep {
                suffix: format!("{m}-sl"),
                value: composite_to_hsl(overlay, alpha, bg),
            });
        }

        m += range.step;
    }

    steps.push(ScaleStep {
        suffix: "DEFAULT".to_string(),
        value: seed.rgb.to_hsl_string(),
    });

    steps
}

type Channels = (f64, f64, f64);

/// Alpha mode: the seed itself, faded in along an eased opacity ramp
fn alpha_step(rgb: Rgb, m: u32, range: ModifierRange) -> (Channels, f64) {
    let t = remap(
        f64::from(m),
        f64::from(range.min),
        f64::from(range.max),
        0.15,
        1.0,
    );
    let alpha = ease_in_sine(t);
    let overlay = (f64::from(rgb.r), f64::from(rgb.g), f64::from(rgb.b));
    (overlay, alpha)
}

/// HSB mode: independent saturation and brightness axes, re-expressed as a
/// transparent overlay
fn hsb_step(rgb: Rgb, m: u32, range: ModifierRange) -> (Channels, f64) {
    let (hue, _, _) = rgb.to_hsb();
    let (min, max) = (f64::from(range.min), f64::from(range.max));
    let m = f64::from(m);

    let saturation =
        cubic_bezier(remap(m, min, max, 0.05, 1.0), 0.0, 0.8, 0.2, 1.0).clamp(0.0, 1.0);
    let brightness = 1.0 - ease_in_quint(remap(m, min, max, 0.05, 0.98));

    let tonal = hsb_to_rgb(hue, saturation, brightness);
    solid_to_transparent(tonal)
}

/// Derive a transparent overlay equivalent of an opaque tonal step: the
/// overlay composited over white reproduces the input. Alpha comes from the
/// darkest channel; a fully white input degenerates to transparent black.
fn solid_to_transparent((r, g, b): Channels) -> (Channels, f64) {
    let alpha = 1.0 - r.min(g).min(b) / 255.0;
    if alpha <= 0.0 {
        return ((0.0, 0.0, 0.0), 0.0);
    }
    let lift = |ch: f64| ((ch - (1.0 - alpha) * 255.0) / alpha).clamp(0.0, 255.0);
    ((lift(r), lift(g), lift(b)), alpha)
}

fn overlay_to_hsl((r, g, b): Channels, alpha: f64) -> String {
    let (h, s, l) = rgb_to_hsl(r, g, b);
    format_hsl(h, s, l, Some(alpha))
}

/// Composite the overlay onto an opaque background and force full opacity
fn composite_to_hsl((r, g, b): Channels, alpha: f64, bg: Rgb) -> String {
    let blend = |fg: f64, bg: u8| ((1.0 - alpha) * f64::from(bg) + alpha * fg).round();
    let (h, s, l) = rgb_to_hsl(blend(r, bg.r), blend(g, bg.g), blend(b, bg.b));
    format_hsl(h, s, l, Some(1.0))
}
