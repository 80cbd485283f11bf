//! Ramp generation: one seed in, eleven gamut-safe tonal colors out.
//!
//! # Anchoring
//!
//! The shape table positions every step on an absolute lightness axis, but
//! authors pick seeds at whatever lightness suits the brand color. Rather
//! than forcing the seed to the table, the generator moves the table to the
//! seed: the anchor step is defined to reproduce the seed's own lightness,
//! and every other step is offset from there, with the offsets scaled down
//! for seeds far from the anchor's nominal position so the ramp never
//! slams into the black/white ends.
//!
//! # Dark mode
//!
//! A dark ramp is not re-derived - it is the light ramp with the step
//! bindings reversed ([`GeneratedRamp::flipped`]). A surface using step
//! `500` in both modes then draws from comparably weighted ends of the same
//! perceptual ramp, and the color science exists in exactly one place.

use huecraft_color::{ColorSeed, Gamut, Oklch, SeedError};

use crate::shape::{shape_of, StepLabel, SHAPE_TABLE, STEP_COUNT, TAPER_START};

// Anchoring envelope: how strongly seed lightness stretches the ramp, and
// the hard lightness bounds no step may leave.
const SCALE_BASE: f64 = 0.9;
const SCALE_GAIN: f64 = 0.8;
const SCALE_MIN: f64 = 0.7;
const SCALE_MAX: f64 = 1.1;
const LIGHTNESS_FLOOR: f64 = 0.02;
const LIGHTNESS_CEILING: f64 = 0.98;

/// An immutable, gamut-mapped tonal ramp for one role in one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRamp {
    colors: [Oklch; STEP_COUNT],
    alpha: Option<f64>,
}

impl GeneratedRamp {
    /// The color bound to a step label.
    pub fn get(&self, step: StepLabel) -> Oklch {
        self.colors[step.index()]
    }

    /// The seed's alpha, shared by every step.
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// All colors in label order.
    pub fn colors(&self) -> &[Oklch; STEP_COUNT] {
        &self.colors
    }

    /// Iterates `(label, color)` pairs, light to dark.
    pub fn iter(&self) -> impl Iterator<Item = (StepLabel, Oklch)> + '_ {
        StepLabel::ALL.into_iter().map(|step| (step, self.get(step)))
    }

    /// Derives the companion ramp for the opposite mode.
    ///
    /// This is a pure rebinding: the color at light-end step *i* moves to
    /// dark-end step *i* (see [`StepLabel::mirror`]). No color math runs,
    /// so the two ramps hold the identical multiset of colors.
    pub fn flipped(&self) -> GeneratedRamp {
        let mut colors = self.colors;
        colors.reverse();
        GeneratedRamp {
            colors,
            alpha: self.alpha,
        }
    }
}

/// A generated ramp plus the steps (if any) where gamut snapping had to
/// fall back to full desaturation.
#[derive(Debug, Clone, PartialEq)]
pub struct RampOutcome {
    /// The gamut-mapped ramp.
    pub ramp: GeneratedRamp,
    /// Steps where the boundary search could not apply. Empty for every
    /// well-formed seed; the caller reports these as diagnostics.
    pub fallback_steps: Vec<StepLabel>,
}

/// Generates the light-mode ramp for one seed.
///
/// Pure function of its inputs: the same seed, anchor, and gamut always
/// produce the identical ramp. The seed is validated first; an out-of-range
/// seed fails here and never reaches the color math.
pub fn generate(
    seed: &ColorSeed,
    anchor: StepLabel,
    gamut: Gamut,
) -> Result<RampOutcome, SeedError> {
    seed.validate()?;

    let anchor_lightness = shape_of(anchor).target_lightness;
    let scale = (SCALE_BASE + (seed.l - anchor_lightness) * SCALE_GAIN).clamp(SCALE_MIN, SCALE_MAX);

    let mut colors = [Oklch::new(0.0, 0.0, 0.0); STEP_COUNT];
    let mut fallback_steps = Vec::new();

    for (i, shape) in SHAPE_TABLE.iter().enumerate() {
        let l = (seed.l + (shape.target_lightness - anchor_lightness) * scale)
            .clamp(LIGHTNESS_FLOOR, LIGHTNESS_CEILING);
        let c = seed.c * shape.chroma_taper_ratio;
        let h = seed.h + shape.hue_drift_degrees;

        let snapped = gamut.snap(Oklch::new(l, c, h));
        if snapped.fell_back {
            fallback_steps.push(StepLabel::ALL[i]);
        }
        colors[i] = snapped.color;
    }

    // Snapping reduces chroma per step in isolation, which can reorder the
    // taper locally (a mid-tone loses more chroma than its darker
    // neighbor). Restore the non-increasing taper; lowering chroma at
    // fixed lightness/hue stays in gamut.
    for i in TAPER_START.index() + 1..STEP_COUNT {
        if colors[i].c > colors[i - 1].c {
            colors[i] = colors[i].with_chroma(colors[i - 1].c);
        }
    }

    Ok(RampOutcome {
        ramp: GeneratedRamp {
            colors,
            alpha: seed.alpha,
        },
        fallback_steps,
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_seed() -> impl Strategy<Value = ColorSeed> {
        (0.02f64..=0.98, 0.0f64..=0.4, 0.0f64..360.0)
            .prop_map(|(l, c, h)| ColorSeed::new(l, c, h))
    }

    proptest! {
        #[test]
        fn every_valid_seed_yields_a_gamut_safe_ramp(seed in valid_seed()) {
            for gamut in [Gamut::Standard, Gamut::Wide] {
                let outcome = generate(&seed, StepLabel::Step500, gamut).unwrap();
                prop_assert!(outcome.fallback_steps.is_empty());
                for (_, color) in outcome.ramp.iter() {
                    prop_assert!(gamut.contains(color));
                }
            }
        }

        #[test]
        fn lightness_and_taper_monotonicity(seed in valid_seed()) {
            let ramp = generate(&seed, StepLabel::Step500, Gamut::Standard)
                .unwrap()
                .ramp;
            let colors = ramp.colors();
            for pair in colors.windows(2) {
                prop_assert!(pair[1].l <= pair[0].l + 1e-12);
            }
            for i in TAPER_START.index()..STEP_COUNT - 1 {
                prop_assert!(colors[i + 1].c <= colors[i].c + 1e-12);
            }
            prop_assert!(colors[STEP_COUNT - 1].c.abs() < 1e-12);
        }

        #[test]
        fn anchor_reproduces_seed_lightness(seed in valid_seed()) {
            let ramp = generate(&seed, StepLabel::Step500, Gamut::Standard)
                .unwrap()
                .ramp;
            prop_assert!((ramp.get(StepLabel::Step500).l - seed.l).abs() < 1e-9);
        }

        #[test]
        fn dark_ramp_is_a_permutation(seed in valid_seed()) {
            let light = generate(&seed, StepLabel::Step500, Gamut::Standard)
                .unwrap()
                .ramp;
            let dark = light.flipped();
            for step in StepLabel::ALL {
                prop_assert_eq!(dark.get(step), light.get(step.mirror()));
            }
        }
    }
}
