//! Target display gamuts and hue/lightness preserving gamut snapping.
//!
//! A gamut is the set of colors a display technology can reproduce. Tonal
//! ramps are computed in OKLCH without regard for any display, so a
//! generated color can land outside the target gamut - most often a light
//! step asked to carry more chroma than a near-white can hold.
//!
//! Snapping maps such a color to the gamut boundary by reducing chroma while
//! holding lightness and hue fixed. This trades saturation for fidelity of
//! tone and hue, which is the right trade for tonal ramps: per-channel
//! clipping would shift the hue and break the ramp's perceptual ordering.

use serde::{Deserialize, Serialize};

use crate::convert::{oklch_to_linear_p3, oklch_to_linear_srgb};
use crate::model::Oklch;

/// Channel tolerance for the membership test. Colors within this distance
/// of the boundary count as inside, so snapped results always re-test as
/// contained.
const GAMUT_EPSILON: f64 = 1e-6;

/// Bisection steps for the boundary search. 24 halvings of a chroma
/// interval no wider than 0.5 locate the boundary to ~3e-8.
const SNAP_ITERATIONS: u32 = 24;

/// A target display gamut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gamut {
    /// sRGB - the baseline assumption for any display.
    Standard,
    /// Display P3 - the common wide-gamut target.
    Wide,
}

impl Gamut {
    /// The configuration-file name of this gamut.
    pub fn as_str(self) -> &'static str {
        match self {
            Gamut::Standard => "standard",
            Gamut::Wide => "wide",
        }
    }

    /// The color's linear channels in this gamut's RGB space.
    fn linear_channels(self, color: Oklch) -> [f64; 3] {
        match self {
            Gamut::Standard => oklch_to_linear_srgb(color),
            Gamut::Wide => oklch_to_linear_p3(color),
        }
    }

    /// True when the color is reproducible in this gamut.
    pub fn contains(self, color: Oklch) -> bool {
        self.linear_channels(color)
            .iter()
            .all(|&ch| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&ch))
    }

    /// Snaps a color into this gamut.
    ///
    /// In-gamut colors are returned unchanged (bit-identical). Out-of-gamut
    /// colors are moved to the boundary by a bounded binary search on
    /// chroma; lightness and hue are never touched.
    ///
    /// If even the fully desaturated color is outside the gamut (possible
    /// only for lightness outside `[0, 1]`), the achromatic color is
    /// returned anyway and [`SnapOutcome::fell_back`] is set so the caller
    /// can report a diagnostic. Snapping never fails.
    pub fn snap(self, color: Oklch) -> SnapOutcome {
        if self.contains(color) {
            return SnapOutcome {
                color,
                fell_back: false,
            };
        }

        let achromatic = color.with_chroma(0.0);
        if !self.contains(achromatic) {
            return SnapOutcome {
                color: achromatic,
                fell_back: true,
            };
        }

        // Invariant: `lo` is always in gamut, `hi` always out.
        let mut lo = 0.0;
        let mut hi = color.c;
        for _ in 0..SNAP_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if self.contains(color.with_chroma(mid)) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        SnapOutcome {
            color: color.with_chroma(lo),
            fell_back: false,
        }
    }
}

/// The result of a gamut snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    /// The in-gamut color.
    pub color: Oklch,
    /// True when the boundary search could not apply and the color was
    /// desaturated outright. Callers surface this as a diagnostic.
    pub fell_back: bool,
}

// ─── Tests ──────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn snap_always_lands_in_gamut(
            l in 0.0f64..=1.0,
            c in 0.0f64..=0.5,
            h in 0.0f64..360.0,
        ) {
            let color = Oklch::new(l, c, h);
            for gamut in [Gamut::Standard, Gamut::Wide] {
                let outcome = gamut.snap(color);
                prop_assert!(gamut.contains(outcome.color));
                prop_assert!(!outcome.fell_back);
                prop_assert_eq!(outcome.color.l, color.l);
                prop_assert_eq!(outcome.color.h, color.h);
                prop_assert!(outcome.color.c <= color.c);
            }
        }

        #[test]
        fn snap_is_deterministic(
            l in 0.0f64..=1.0,
            c in 0.0f64..=0.5,
            h in 0.0f64..360.0,
        ) {
            let color = Oklch::new(l, c, h);
            let first = Gamut::Standard.snap(color);
            let second = Gamut::Standard.snap(color);
            prop_assert_eq!(first, second);
        }
    }
}
