//! sRGB to CIE Lab conversion, perceptual distance and hex formatting.
//!
//! The conversion is written out by hand rather than going through
//! `palette`'s `FromColor`: clustering thresholds are tuned against this
//! exact transform (the rounded sRGB matrix and the `0.008856` / `7.787`
//! breakpoint), which differs slightly from the exact CIE constants.

use palette::Lab;
use palette::white_point::D65;

/// A CIE L*a*b* color under the D65 white point.
pub type LabColor = Lab<D65, f64>;

/// D65 reference white in XYZ.
const WHITE_POINT: [f64; 3] = [0.95047, 1.0, 1.08883];

const EPSILON: f64 = 0.008856;
const KAPPA_SLOPE: f64 = 7.787;

#[inline]
fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

/// Convert 8-bit sRGB to Lab.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> LabColor {
    let r = srgb_to_linear(r as f64 / 255.0);
    let g = srgb_to_linear(g as f64 / 255.0);
    let b = srgb_to_linear(b as f64 / 255.0);

    let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / WHITE_POINT[0];
    let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / WHITE_POINT[1];
    let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / WHITE_POINT[2];

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    LabColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Euclidean distance between two Lab colors (CIE76 ΔE).
#[inline]
pub fn lab_distance(a: &LabColor, b: &LabColor) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Format an RGB triple as lowercase `#rrggbb`.
///
/// Channels are rounded to the nearest integer and clamped to `0..=255`.
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|v| v.round().clamp(0.0, 255.0) as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}
