//! Easing curves for color-scale interpolation
//!
//! The scale generator shapes its saturation and brightness axes with these
//! curves so the perceptual steps between modifiers stay even. The cubic
//! bezier solver is the CSS `cubic-bezier()` formulation.

/// Remap `value` from `[in_min, in_max]` onto `[out_min, out_max]` linearly
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return out_min;
    }
    let t = (value - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Sine ease-in: slow start, used for the alpha ramp
pub fn ease_in_sine(t: f64) -> f64 {
    1.0 - (t * std::f64::consts::FRAC_PI_2).cos()
}

/// Quintic ease-in: very slow start, used for the brightness axis
pub fn ease_in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

/// Cubic bezier interpolation with CSS-style control points (x1,y1,x2,y2).
/// Based on WebKit's implementation: Newton-Raphson solves the curve
/// parameter for a given progress, then the y value is sampled there.
pub fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);

    let mut s = t; // Initial guess

    for _ in 0..8 {
        let x = bezier_sample(s, x1, x2) - t;
        if x.abs() < 1e-6 {
            break;
        }
        let dx = bezier_derivative(s, x1, x2);
        if dx.abs() < 1e-6 {
            break;
        }
        s -= x / dx;
    }

    s = s.clamp(0.0, 1.0);

    bezier_sample(s, y1, y2)
}

/// Sample a 1D bezier curve at parameter s
#[inline]
fn bezier_sample(s: f64, p1: f64, p2: f64) -> f64 {
    // B(s) = 3(1-s)^2 s p1 + 3(1-s) s^2 p2 + s^3
    let s2 = s * s;
    let s3 = s2 * s;
    let one_minus_s = 1.0 - s;
    3.0 * one_minus_s * one_minus_s * s * p1 + 3.0 * one_minus_s * s2 * p2 + s3
}

/// Derivative of the 1D bezier curve at parameter s
#[inline]
fn bezier_derivative(s: f64, p1: f64, p2: f64) -> f64 {
    let one_minus_s = 1.0 - s;
    3.0 * one_minus_s * one_minus_s * p1
        + 6.0 * one_minus_s * s * (p2 - p1)
        + 3.0 * s * s * (1.0 - p2)
}
