//! Canonical color types: the perceptual [`Oklch`] value, the device
//! [`Rgb`] triple, and the authored [`ColorSeed`] input form.
//!
//! All ramp arithmetic in the engine happens on [`Oklch`] values. Device
//! triples only appear at the edges: hex seed shorthand on the way in, and
//! quantized export forms on the way out.

use serde::{Deserialize, Serialize};

// ─── Oklch ──────────────────────────────────────────────────────────────────

/// A color in the OKLCH perceptual space.
///
/// - `l`: lightness, `0.0` (black) to `1.0` (white)
/// - `c`: chroma, `0.0` (achromatic) and up; display gamuts top out well
///   below `0.4`
/// - `h`: hue angle in degrees, stored normalized to `[0, 360)`
///
/// Constructors normalize the hue, so two values describing the same angle
/// compare equal:
///
/// ```rust
/// use huecraft_color::Oklch;
///
/// assert_eq!(Oklch::new(0.5, 0.1, 370.0), Oklch::new(0.5, 0.1, 10.0));
/// assert_eq!(Oklch::new(0.5, 0.1, -90.0), Oklch::new(0.5, 0.1, 270.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    /// Perceptual lightness (0-1).
    pub l: f64,
    /// Chroma (0+).
    pub c: f64,
    /// Hue angle in degrees, normalized to `[0, 360)`.
    pub h: f64,
}

impl Oklch {
    /// Creates a new OKLCH color, normalizing the hue into `[0, 360)`.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h: normalize_hue(h),
        }
    }

    /// Returns a copy with the lightness replaced.
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Returns a copy with the chroma replaced.
    pub fn with_chroma(self, c: f64) -> Self {
        Self { c, ..self }
    }

    /// Returns a copy with the hue replaced (normalized).
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// True when the chroma is effectively zero (gray axis).
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-9
    }
}

/// Normalizes a hue angle in degrees into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let n = h.rem_euclid(360.0);
    // rem_euclid(360.0) can return 360.0 for tiny negative inputs.
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

// ─── Rgb ────────────────────────────────────────────────────────────────────

/// An 8-bit device RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Formats this triple as a lowercase `#rrggbb` hex string.
    ///
    /// ```rust
    /// use huecraft_color::Rgb;
    ///
    /// assert_eq!(Rgb(255, 107, 53).to_hex(), "#ff6b35");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Formats this triple plus an alpha byte as `#rrggbbaa`.
    pub fn to_hex_alpha(self, alpha: u8) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.0, self.1, self.2, alpha)
    }

    /// Parses a hex color code, with or without a leading `#`.
    ///
    /// Accepts 3-digit (`#f80`), 6-digit (`#ff8800`), and 8-digit
    /// (`#ff8800cc`, trailing alpha byte) forms. Returns the triple and the
    /// alpha byte when one was present.
    pub fn from_hex(s: &str) -> Result<(Self, Option<u8>), ColorParseError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let invalid = || ColorParseError::InvalidHex {
            value: s.to_string(),
        };
        // Byte-indexed slicing below requires single-byte characters.
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let byte = |range: &str| u8::from_str_radix(range, 16).map_err(|_| invalid());

        match hex.len() {
            // #rgb -> #rrggbb
            3 => {
                let r = byte(&hex[0..1])? * 17;
                let g = byte(&hex[1..2])? * 17;
                let b = byte(&hex[2..3])? * 17;
                Ok((Rgb(r, g, b), None))
            }
            6 => {
                let r = byte(&hex[0..2])?;
                let g = byte(&hex[2..4])?;
                let b = byte(&hex[4..6])?;
                Ok((Rgb(r, g, b), None))
            }
            8 => {
                let r = byte(&hex[0..2])?;
                let g = byte(&hex[2..4])?;
                let b = byte(&hex[4..6])?;
                let a = byte(&hex[6..8])?;
                Ok((Rgb(r, g, b), Some(a)))
            }
            _ => Err(invalid()),
        }
    }
}

/// Error type for color string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string is not a valid 3/6/8-digit hex color.
    InvalidHex {
        /// The offending input.
        value: String,
    },
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorParseError::InvalidHex { value } => {
                write!(f, "invalid hex color '{}' (must be 3, 6 or 8 digits)", value)
            }
        }
    }
}

impl std::error::Error for ColorParseError {}

// ─── ColorSeed ──────────────────────────────────────────────────────────────

/// Declared seed ranges. Values outside these bounds are rejected before
/// ramp generation begins.
pub const SEED_LIGHTNESS_RANGE: (f64, f64) = (0.0, 1.0);
/// Upper chroma bound for authored seeds; display gamuts cannot hold more.
pub const SEED_CHROMA_MAX: f64 = 0.5;
/// Hue is accepted on the closed interval so `360.0` round-trips from specs.
pub const SEED_HUE_RANGE: (f64, f64) = (0.0, 360.0);

/// An authored seed color: the single color that anchors a role's tonal ramp.
///
/// Seeds are plain OKLCH components plus an optional alpha, matching the
/// theme-spec authoring format. They are immutable once authored and must
/// pass [`validate`](ColorSeed::validate) before entering the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSeed {
    /// Perceptual lightness (0-1).
    pub l: f64,
    /// Chroma (0 to [`SEED_CHROMA_MAX`]).
    pub c: f64,
    /// Hue angle in degrees (0-360).
    pub h: f64,
    /// Optional alpha (0-1); omitted means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl ColorSeed {
    /// Creates an opaque seed from OKLCH components.
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h,
            alpha: None,
        }
    }

    /// Returns a copy with the alpha set.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Checks every component against the declared seed ranges.
    ///
    /// Non-finite values are rejected alongside out-of-range ones, so a
    /// `NaN` smuggled through deserialization never reaches the ramp math.
    pub fn validate(&self) -> Result<(), SeedError> {
        let (l_min, l_max) = SEED_LIGHTNESS_RANGE;
        if !self.l.is_finite() || self.l < l_min || self.l > l_max {
            return Err(SeedError::LightnessOutOfRange(self.l));
        }
        if !self.c.is_finite() || self.c < 0.0 || self.c > SEED_CHROMA_MAX {
            return Err(SeedError::ChromaOutOfRange(self.c));
        }
        let (h_min, h_max) = SEED_HUE_RANGE;
        if !self.h.is_finite() || self.h < h_min || self.h > h_max {
            return Err(SeedError::HueOutOfRange(self.h));
        }
        if let Some(a) = self.alpha {
            if !a.is_finite() || !(0.0..=1.0).contains(&a) {
                return Err(SeedError::AlphaOutOfRange(a));
            }
        }
        Ok(())
    }

    /// The seed as a perceptual color value (alpha dropped).
    pub fn color(&self) -> Oklch {
        Oklch::new(self.l, self.c, self.h)
    }
}

/// Error returned when a seed component lies outside its declared range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedError {
    /// Lightness outside `[0, 1]` or not finite.
    LightnessOutOfRange(f64),
    /// Chroma negative, above [`SEED_CHROMA_MAX`], or not finite.
    ChromaOutOfRange(f64),
    /// Hue outside `[0, 360]` or not finite.
    HueOutOfRange(f64),
    /// Alpha outside `[0, 1]` or not finite.
    AlphaOutOfRange(f64),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::LightnessOutOfRange(v) => {
                write!(f, "lightness {} outside [0, 1]", v)
            }
            SeedError::ChromaOutOfRange(v) => {
                write!(f, "chroma {} outside [0, {}]", v, SEED_CHROMA_MAX)
            }
            SeedError::HueOutOfRange(v) => write!(f, "hue {} outside [0, 360]", v),
            SeedError::AlphaOutOfRange(v) => write!(f, "alpha {} outside [0, 1]", v),
        }
    }
}

impl std::error::Error for SeedError {}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Hue normalization
    // =====================================================================

    #[test]
    fn hue_already_normalized_unchanged() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(359.9), 359.9);
    }

    #[test]
    fn hue_wraps_positive_overflow() {
        assert!((normalize_hue(360.0)).abs() < 1e-12);
        assert!((normalize_hue(450.0) - 90.0).abs() < 1e-12);
        assert!((normalize_hue(725.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn hue_wraps_negative() {
        assert!((normalize_hue(-90.0) - 270.0).abs() < 1e-12);
        assert!((normalize_hue(-360.0)).abs() < 1e-12);
    }

    #[test]
    fn oklch_constructor_normalizes() {
        let a = Oklch::new(0.5, 0.1, 370.0);
        let b = Oklch::new(0.5, 0.1, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn oklch_with_hue_normalizes() {
        let c = Oklch::new(0.5, 0.1, 0.0).with_hue(-10.0);
        assert!((c.h - 350.0).abs() < 1e-12);
    }

    #[test]
    fn achromatic_detection() {
        assert!(Oklch::new(0.5, 0.0, 0.0).is_achromatic());
        assert!(!Oklch::new(0.5, 0.01, 0.0).is_achromatic());
    }

    // =====================================================================
    // Hex formatting and parsing
    // =====================================================================

    #[test]
    fn hex_format_basic() {
        assert_eq!(Rgb(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb(255, 255, 255).to_hex(), "#ffffff");
        assert_eq!(Rgb(255, 107, 53).to_hex(), "#ff6b35");
    }

    #[test]
    fn hex_format_with_alpha() {
        assert_eq!(Rgb(255, 107, 53).to_hex_alpha(204), "#ff6b35cc");
    }

    #[test]
    fn hex_parse_6_digit() {
        assert_eq!(Rgb::from_hex("#ff6b35").unwrap(), (Rgb(255, 107, 53), None));
        assert_eq!(Rgb::from_hex("000000").unwrap(), (Rgb(0, 0, 0), None));
    }

    #[test]
    fn hex_parse_3_digit_expands() {
        assert_eq!(Rgb::from_hex("#fff").unwrap(), (Rgb(255, 255, 255), None));
        assert_eq!(Rgb::from_hex("#f80").unwrap(), (Rgb(255, 136, 0), None));
    }

    #[test]
    fn hex_parse_8_digit_has_alpha() {
        assert_eq!(
            Rgb::from_hex("#ff6b35cc").unwrap(),
            (Rgb(255, 107, 53), Some(204))
        );
    }

    #[test]
    fn hex_parse_rejects_bad_lengths() {
        assert!(Rgb::from_hex("#ff").is_err());
        assert!(Rgb::from_hex("#fffff").is_err());
        assert!(Rgb::from_hex("#fffffff").is_err());
    }

    #[test]
    fn hex_parse_rejects_non_hex_digits() {
        assert!(Rgb::from_hex("#gggggg").is_err());
    }

    #[test]
    fn hex_parse_rejects_non_ascii() {
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn hex_roundtrip() {
        let rgb = Rgb(18, 52, 86);
        let (parsed, alpha) = Rgb::from_hex(&rgb.to_hex()).unwrap();
        assert_eq!(parsed, rgb);
        assert_eq!(alpha, None);
    }

    // =====================================================================
    // Seed validation
    // =====================================================================

    #[test]
    fn seed_valid_in_range() {
        assert!(ColorSeed::new(0.62, 0.10, 270.0).validate().is_ok());
        assert!(ColorSeed::new(0.0, 0.0, 0.0).validate().is_ok());
        assert!(ColorSeed::new(1.0, 0.5, 360.0).validate().is_ok());
    }

    #[test]
    fn seed_rejects_lightness_out_of_range() {
        assert_eq!(
            ColorSeed::new(1.2, 0.1, 0.0).validate(),
            Err(SeedError::LightnessOutOfRange(1.2))
        );
        assert!(ColorSeed::new(-0.1, 0.1, 0.0).validate().is_err());
    }

    #[test]
    fn seed_rejects_chroma_out_of_range() {
        assert!(ColorSeed::new(0.5, -0.01, 0.0).validate().is_err());
        assert!(ColorSeed::new(0.5, 0.51, 0.0).validate().is_err());
    }

    #[test]
    fn seed_rejects_hue_out_of_range() {
        assert!(ColorSeed::new(0.5, 0.1, 361.0).validate().is_err());
        assert!(ColorSeed::new(0.5, 0.1, -1.0).validate().is_err());
    }

    #[test]
    fn seed_rejects_bad_alpha() {
        assert!(ColorSeed::new(0.5, 0.1, 0.0)
            .with_alpha(1.5)
            .validate()
            .is_err());
        assert!(ColorSeed::new(0.5, 0.1, 0.0)
            .with_alpha(0.5)
            .validate()
            .is_ok());
    }

    #[test]
    fn seed_rejects_non_finite() {
        assert!(ColorSeed::new(f64::NAN, 0.1, 0.0).validate().is_err());
        assert!(ColorSeed::new(0.5, f64::INFINITY, 0.0).validate().is_err());
        assert!(ColorSeed::new(0.5, 0.1, f64::NAN).validate().is_err());
    }

    #[test]
    fn seed_error_display_names_component() {
        let msg = SeedError::ChromaOutOfRange(0.7).to_string();
        assert!(msg.contains("chroma"));
        assert!(msg.contains("0.7"));
    }

    #[test]
    fn seed_color_drops_alpha_and_normalizes() {
        let seed = ColorSeed::new(0.62, 0.10, 360.0).with_alpha(0.5);
        let color = seed.color();
        assert_eq!(color, Oklch::new(0.62, 0.10, 0.0));
    }
}
