//! # Huecraft Color - Perceptual Color Primitives
//!
//! `huecraft-color` provides the color foundation for the `huecraft` token
//! engine: a canonical perceptual color type ([`Oklch`]), conversions to and
//! from device color spaces (sRGB and Display P3), and hue/lightness
//! preserving gamut mapping.
//!
//! This crate is deliberately self-contained: it knows nothing about ramps,
//! themes, or tokens, only about colors and the displays that reproduce them.
//!
//! ## Core Concepts
//!
//! - [`Oklch`]: the canonical perceptual representation (lightness, chroma,
//!   hue). Equal numeric steps approximate equal perceived steps, which is
//!   what makes tonal ramp arithmetic meaningful.
//! - [`ColorSeed`]: the authored input form - an `Oklch` value plus an
//!   optional alpha, with validation against the declared seed ranges.
//! - [`Rgb`]: an 8-bit device triple with hex formatting and parsing.
//! - [`Gamut`]: a target display gamut ([`Gamut::Standard`] = sRGB,
//!   [`Gamut::Wide`] = Display P3) with membership testing and boundary
//!   snapping.
//!
//! ## Quick Start
//!
//! ```rust
//! use huecraft_color::{Gamut, Oklch};
//!
//! // A mid-tone violet, comfortably inside sRGB.
//! let color = Oklch::new(0.62, 0.10, 270.0);
//! assert!(Gamut::Standard.contains(color));
//!
//! // A near-white with the same chroma is not reproducible in sRGB;
//! // snapping reduces chroma while holding lightness and hue fixed.
//! let pastel = Oklch::new(0.97, 0.10, 270.0);
//! let snapped = Gamut::Standard.snap(pastel);
//! assert!(Gamut::Standard.contains(snapped.color));
//! assert!(snapped.color.c < pastel.c);
//! assert_eq!(snapped.color.l, pastel.l);
//! ```

pub mod convert;
pub mod gamut;
pub mod model;

pub use convert::{
    oklab_lerp, oklab_to_oklch, oklch_to_oklab, oklch_to_p3, oklch_to_srgb, quantize_srgb,
    srgb_to_oklch, Oklab,
};
pub use gamut::{Gamut, SnapOutcome};
pub use model::{ColorParseError, ColorSeed, Oklch, Rgb, SeedError};
