//! Device color-space conversions.
//!
//! # Conversion graph
//!
//! ```text
//! Oklch ↔ Oklab ↔ LMS ↔ linear sRGB ↔ XYZ (D65) ↔ linear Display P3
//!                              ↕                         ↕
//!                        encoded sRGB            encoded Display P3
//! ```
//!
//! Every export format the engine emits is derived by walking this graph in
//! one direction from the canonical OKLCH value; nothing is independently
//! sourced, so repeated runs are byte-identical.
//!
//! # Why OKLab/OKLCH?
//!
//! OKLab is a perceptually uniform space: equal numeric distances correspond
//! to roughly equal perceived differences, and the lightness axis matches
//! perceived tone. That makes the tonal-ramp arithmetic in the engine
//! (lightness anchoring, chroma tapering, hue drift) meaningful, where the
//! same arithmetic on raw sRGB channels would produce muddy, uneven ramps.
//!
//! # Matrix provenance
//!
//! - OKLab matrices: Björn Ottosson, "A perceptual color space for image
//!   processing" (2020). Numerically optimized, definitional.
//! - sRGB ↔ XYZ: derived from the BT.709 primaries and D65 white point
//!   (IEC 61966-2-1).
//! - Display P3 ↔ XYZ: DCI-P3 primaries with D65 white point, as used by
//!   CSS Color Module 4.
//! - Both sRGB and Display P3 share the IEC 61966-2-1 piecewise transfer
//!   function.

use crate::model::{Oklch, Rgb};

// ─── Matrix constants ───────────────────────────────────────────────────────

/// M1: linear sRGB → LMS (cone response approximation). Row-major.
const OKLAB_M1: [[f64; 3]; 3] = [
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
];

/// M2: LMS' (cube-rooted LMS) → OKLab opponent channels.
const OKLAB_M2: [[f64; 3]; 3] = [
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
];

/// Inverse of `OKLAB_M1`: LMS → linear sRGB.
const OKLAB_M1_INV: [[f64; 3]; 3] = [
    [4.0767416621, -3.3077115913, 0.2309699292],
    [-1.2684380046, 2.6097574011, -0.3413193965],
    [-0.0041960863, -0.7034186147, 1.7076147010],
];

/// Inverse of `OKLAB_M2`: OKLab → LMS'.
const OKLAB_M2_INV: [[f64; 3]; 3] = [
    [1.0000000000, 0.3963377774, 0.2158037573],
    [1.0000000000, -0.1055613458, -0.0638541728],
    [1.0000000000, -0.0894841775, -1.2914855480],
];

/// Linear sRGB → CIE XYZ (D65).
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41239079926595934, 0.357584339383878, 0.1804807884018343],
    [0.21263900587151027, 0.715168678767756, 0.07219231536073371],
    [0.01933081871559182, 0.11919477979462598, 0.9505321522496607],
];

/// CIE XYZ (D65) → linear sRGB.
const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2409699419045226, -1.537383177570094, -0.4986107602930034],
    [-0.9692436362808796, 1.8759675015077202, 0.04155505740717559],
    [0.05563007969699366, -0.20397695888897652, 1.0569715142428786],
];

/// Linear Display P3 → CIE XYZ (D65).
const P3_TO_XYZ: [[f64; 3]; 3] = [
    [0.4865709486482162, 0.26566769316909306, 0.19821728523436247],
    [0.2289745640697488, 0.6917385218365064, 0.079286914093745],
    [0.0, 0.04511338185890264, 1.043944368900976],
];

/// CIE XYZ (D65) → linear Display P3.
const XYZ_TO_P3: [[f64; 3]; 3] = [
    [2.493496911941425, -0.9313836179191239, -0.40271078445071684],
    [-0.8294889695615747, 1.7626640603183463, 0.023624685841943577],
    [0.03584583024378447, -0.07617238926804182, 0.9568845240076872],
];

/// Multiplies a row-major 3x3 matrix by a column vector.
fn mat3_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

// ─── Oklab ──────────────────────────────────────────────────────────────────

/// A color in the rectangular OKLab space.
///
/// This is the space where perceptual mixing happens (straight-line
/// interpolation between two OKLab values is a perceptually smooth blend);
/// [`Oklch`] is its cylindrical form used everywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Perceptual lightness (0-1).
    pub l: f64,
    /// Green-red opponent axis.
    pub a: f64,
    /// Blue-yellow opponent axis.
    pub b: f64,
}

/// Converts cylindrical OKLCH to rectangular OKLab.
pub fn oklch_to_oklab(color: Oklch) -> Oklab {
    let hue_rad = color.h.to_radians();
    Oklab {
        l: color.l,
        a: color.c * hue_rad.cos(),
        b: color.c * hue_rad.sin(),
    }
}

/// Converts rectangular OKLab to cylindrical OKLCH.
pub fn oklab_to_oklch(lab: Oklab) -> Oklch {
    let c = lab.a.hypot(lab.b);
    let h = if c < 1e-12 {
        // Hue is undefined on the gray axis; pin it for determinism.
        0.0
    } else {
        lab.b.atan2(lab.a).to_degrees()
    };
    Oklch::new(lab.l, c, h)
}

/// Linearly interpolates between two OKLab colors.
pub fn oklab_lerp(t: f64, from: Oklab, to: Oklab) -> Oklab {
    Oklab {
        l: from.l + t * (to.l - from.l),
        a: from.a + t * (to.a - from.a),
        b: from.b + t * (to.b - from.b),
    }
}

// ─── OKLab ↔ linear sRGB ────────────────────────────────────────────────────

/// Converts OKLab to linear sRGB. Out-of-gamut inputs produce channels
/// outside `[0, 1]`; callers decide whether that matters.
pub fn oklab_to_linear_srgb(lab: Oklab) -> [f64; 3] {
    let lms_prime = mat3_mul(&OKLAB_M2_INV, [lab.l, lab.a, lab.b]);
    let lms = [
        lms_prime[0] * lms_prime[0] * lms_prime[0],
        lms_prime[1] * lms_prime[1] * lms_prime[1],
        lms_prime[2] * lms_prime[2] * lms_prime[2],
    ];
    mat3_mul(&OKLAB_M1_INV, lms)
}

/// Converts linear sRGB to OKLab.
pub fn linear_srgb_to_oklab(rgb: [f64; 3]) -> Oklab {
    let lms = mat3_mul(&OKLAB_M1, rgb);
    // cbrt is defined for negative inputs, so slightly out-of-gamut
    // channels pass through without producing NaN.
    let lms_prime = [lms[0].cbrt(), lms[1].cbrt(), lms[2].cbrt()];
    let lab = mat3_mul(&OKLAB_M2, lms_prime);
    Oklab {
        l: lab[0],
        a: lab[1],
        b: lab[2],
    }
}

/// Converts OKLCH straight to linear sRGB.
pub fn oklch_to_linear_srgb(color: Oklch) -> [f64; 3] {
    oklab_to_linear_srgb(oklch_to_oklab(color))
}

// ─── XYZ bridge to Display P3 ───────────────────────────────────────────────

/// Converts linear sRGB to linear Display P3 via XYZ.
pub fn linear_srgb_to_linear_p3(rgb: [f64; 3]) -> [f64; 3] {
    mat3_mul(&XYZ_TO_P3, mat3_mul(&SRGB_TO_XYZ, rgb))
}

/// Converts linear Display P3 to linear sRGB via XYZ.
pub fn linear_p3_to_linear_srgb(p3: [f64; 3]) -> [f64; 3] {
    mat3_mul(&XYZ_TO_SRGB, mat3_mul(&P3_TO_XYZ, p3))
}

/// Converts OKLCH to linear Display P3.
pub fn oklch_to_linear_p3(color: Oklch) -> [f64; 3] {
    linear_srgb_to_linear_p3(oklch_to_linear_srgb(color))
}

// ─── Transfer function ──────────────────────────────────────────────────────

/// Decodes an sRGB/Display P3 encoded channel (0-1) to linear light.
pub fn decode_channel(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Encodes a linear-light channel (0-1) to the sRGB/Display P3 curve.
pub fn encode_channel(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

// ─── Encoded export forms ───────────────────────────────────────────────────

/// Converts OKLCH to encoded sRGB channels, clamped to `[0, 1]`.
pub fn oklch_to_srgb(color: Oklch) -> [f64; 3] {
    let linear = oklch_to_linear_srgb(color);
    [
        encode_channel(linear[0].clamp(0.0, 1.0)),
        encode_channel(linear[1].clamp(0.0, 1.0)),
        encode_channel(linear[2].clamp(0.0, 1.0)),
    ]
}

/// Converts OKLCH to encoded Display P3 channels, clamped to `[0, 1]`.
pub fn oklch_to_p3(color: Oklch) -> [f64; 3] {
    let linear = oklch_to_linear_p3(color);
    [
        encode_channel(linear[0].clamp(0.0, 1.0)),
        encode_channel(linear[1].clamp(0.0, 1.0)),
        encode_channel(linear[2].clamp(0.0, 1.0)),
    ]
}

/// Quantizes OKLCH to an 8-bit sRGB triple (round half away from zero).
pub fn quantize_srgb(color: Oklch) -> Rgb {
    let encoded = oklch_to_srgb(color);
    Rgb(
        (encoded[0] * 255.0).round() as u8,
        (encoded[1] * 255.0).round() as u8,
        (encoded[2] * 255.0).round() as u8,
    )
}

/// Converts an 8-bit sRGB triple to OKLCH (for hex seed shorthand and
/// round-trip verification).
pub fn srgb_to_oklch(rgb: Rgb) -> Oklch {
    let linear = [
        decode_channel(rgb.0 as f64 / 255.0),
        decode_channel(rgb.1 as f64 / 255.0),
        decode_channel(rgb.2 as f64 / 255.0),
    ];
    oklab_to_oklch(linear_srgb_to_oklab(linear))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
