//! The format exporter: interchange forms of a canonical color.
//!
//! Consumers rarely want raw OKLCH. The exporter expands one canonical
//! value into the forms downstream tooling expects - a quantized hex
//! string, the same triple as bytes, and a wide-gamut Display P3 triple -
//! all derived from the single canonical value by one-directional
//! conversion, with fixed rounding so repeated runs are byte-identical.
//!
//! Colors outside a form's gamut are snapped into it first (hue and
//! lightness preserved), so a wide-gamut token still gets a faithful sRGB
//! rendition rather than a channel-clipped one.

use serde::Serialize;

use huecraft_color::{oklch_to_p3, quantize_srgb, Gamut, Oklch};

/// Display P3 channels are published to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The interchange forms of one canonical color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedColor {
    /// Quantized 24-bit form, `#rrggbb` (`#rrggbbaa` when translucent).
    pub hex: String,
    /// The same quantized device-sRGB triple as bytes.
    pub rgb: [u8; 3],
    /// Encoded Display P3 channels, rounded to four decimals.
    pub p3: [f64; 3],
    /// Alpha, when the source carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl ExportedColor {
    /// The CSS-style wide-gamut form, `color(display-p3 r g b)`.
    pub fn p3_string(&self) -> String {
        match self.alpha {
            Some(alpha) if alpha < 1.0 => format!(
                "color(display-p3 {} {} {} / {})",
                self.p3[0],
                self.p3[1],
                self.p3[2],
                round4(alpha)
            ),
            _ => format!("color(display-p3 {} {} {})", self.p3[0], self.p3[1], self.p3[2]),
        }
    }
}

/// Exports an opaque canonical color.
pub fn export(color: Oklch) -> ExportedColor {
    export_with_alpha(color, None)
}

/// Exports a canonical color with an optional alpha.
pub fn export_with_alpha(color: Oklch, alpha: Option<f64>) -> ExportedColor {
    // Both quantized forms come from the color's best sRGB rendition;
    // snapping is a no-op for colors already inside sRGB.
    let srgb_rendition = Gamut::Standard.snap(color).color;
    let rgb = quantize_srgb(srgb_rendition);

    let hex = match alpha {
        Some(a) if a < 1.0 => rgb.to_hex_alpha((a * 255.0).round() as u8),
        _ => rgb.to_hex(),
    };

    let p3_rendition = Gamut::Wide.snap(color).color;
    let p3_encoded = oklch_to_p3(p3_rendition);

    ExportedColor {
        hex,
        rgb: [rgb.0, rgb.1, rgb.2],
        p3: [
            round4(p3_encoded[0]),
            round4(p3_encoded[1]),
            round4(p3_encoded[2]),
        ],
        alpha,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
