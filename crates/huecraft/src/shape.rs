//! The ramp shape table: eleven fixed tonal steps shared by every theme.
//!
//! A ramp's *shape* - how lightness falls off, where chroma starts tapering,
//! how much the hue drifts toward the dark end - is a design decision made
//! once for the whole system, not per theme. Seeds only move the ramp up or
//! down the lightness axis and set its chroma and hue; the shape below is
//! never mutated at runtime.

use serde::{Deserialize, Serialize};

/// One of the eleven tonal step labels, ordered light to dark.
///
/// The numbering follows the convention used by most design systems: `50`
/// is the lightest wash, `500` the mid-tone workhorse, `950` the darkest
/// ink. Declaration order gives the light-to-dark ordering, so the labels
/// sort correctly as map keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StepLabel {
    #[serde(rename = "50")]
    Step50,
    #[serde(rename = "100")]
    Step100,
    #[serde(rename = "200")]
    Step200,
    #[serde(rename = "300")]
    Step300,
    #[serde(rename = "400")]
    Step400,
    #[serde(rename = "500")]
    Step500,
    #[serde(rename = "600")]
    Step600,
    #[serde(rename = "700")]
    Step700,
    #[serde(rename = "800")]
    Step800,
    #[serde(rename = "900")]
    Step900,
    #[serde(rename = "950")]
    Step950,
}

/// Number of steps in every ramp.
pub const STEP_COUNT: usize = 11;

impl StepLabel {
    /// All labels, light to dark.
    pub const ALL: [StepLabel; STEP_COUNT] = [
        StepLabel::Step50,
        StepLabel::Step100,
        StepLabel::Step200,
        StepLabel::Step300,
        StepLabel::Step400,
        StepLabel::Step500,
        StepLabel::Step600,
        StepLabel::Step700,
        StepLabel::Step800,
        StepLabel::Step900,
        StepLabel::Step950,
    ];

    /// This label's position in the light-to-dark ordering (0-10).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The label at a given position, if within range.
    pub fn from_index(index: usize) -> Option<StepLabel> {
        StepLabel::ALL.get(index).copied()
    }

    /// The label equally far from the opposite end of the ramp.
    ///
    /// `50` mirrors to `950`, `100` to `900`, and so on; the center step
    /// `500` mirrors to itself. This is the rebinding rule dark-mode
    /// derivation uses.
    pub const fn mirror(self) -> StepLabel {
        StepLabel::ALL[STEP_COUNT - 1 - self.index()]
    }

    /// The label's display name ("50" through "950").
    pub const fn as_str(self) -> &'static str {
        match self {
            StepLabel::Step50 => "50",
            StepLabel::Step100 => "100",
            StepLabel::Step200 => "200",
            StepLabel::Step300 => "300",
            StepLabel::Step400 => "400",
            StepLabel::Step500 => "500",
            StepLabel::Step600 => "600",
            StepLabel::Step700 => "700",
            StepLabel::Step800 => "800",
            StepLabel::Step900 => "900",
            StepLabel::Step950 => "950",
        }
    }

    /// Parses a display name back into a label.
    pub fn parse(name: &str) -> Option<StepLabel> {
        StepLabel::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for StepLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Shape table ────────────────────────────────────────────────────────────

/// The shape parameters for one tonal step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStep {
    /// Where this step sits on the lightness axis before seed anchoring.
    pub target_lightness: f64,
    /// Fraction of the seed chroma this step keeps (1.0 = full chroma).
    pub chroma_taper_ratio: f64,
    /// Degrees of hue drift applied at this step.
    pub hue_drift_degrees: f64,
}

/// The step where chroma tapering begins; from here to the dark end the
/// taper ratios are non-increasing, reaching zero at the darkest step.
pub const TAPER_START: StepLabel = StepLabel::Step500;

/// The process-wide ramp shape, indexed by [`StepLabel::index`].
///
/// Light steps cool slightly (negative drift), dark steps warm slightly;
/// the mid-tones hold the seed hue. Chroma rides at full strength through
/// the mid-tone and collapses toward the ink end, fully desaturating at
/// `950` so the darkest step is usable as near-black text on any ramp.
pub const SHAPE_TABLE: [ShapeStep; STEP_COUNT] = [
    ShapeStep {
        target_lightness: 0.97,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: -4.0,
    },
    ShapeStep {
        target_lightness: 0.93,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: -3.0,
    },
    ShapeStep {
        target_lightness: 0.88,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: -2.0,
    },
    ShapeStep {
        target_lightness: 0.80,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: -1.0,
    },
    ShapeStep {
        target_lightness: 0.71,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: 0.0,
    },
    ShapeStep {
        target_lightness: 0.62,
        chroma_taper_ratio: 1.00,
        hue_drift_degrees: 0.0,
    },
    ShapeStep {
        target_lightness: 0.53,
        chroma_taper_ratio: 0.95,
        hue_drift_degrees: 1.0,
    },
    ShapeStep {
        target_lightness: 0.44,
        chroma_taper_ratio: 0.85,
        hue_drift_degrees: 2.0,
    },
    ShapeStep {
        target_lightness: 0.35,
        chroma_taper_ratio: 0.65,
        hue_drift_degrees: 3.0,
    },
    ShapeStep {
        target_lightness: 0.26,
        chroma_taper_ratio: 0.40,
        hue_drift_degrees: 4.0,
    },
    ShapeStep {
        target_lightness: 0.18,
        chroma_taper_ratio: 0.00,
        hue_drift_degrees: 5.0,
    },
];

/// The shape parameters for a step label.
pub fn shape_of(step: StepLabel) -> &'static ShapeStep {
    &SHAPE_TABLE[step.index()]
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleven_steps() {
        assert_eq!(StepLabel::ALL.len(), 11);
        assert_eq!(SHAPE_TABLE.len(), 11);
    }

    #[test]
    fn indices_match_declaration_order() {
        for (i, step) in StepLabel::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(StepLabel::from_index(i), Some(*step));
        }
        assert_eq!(StepLabel::from_index(11), None);
    }

    #[test]
    fn mirror_reverses_the_ordering() {
        assert_eq!(StepLabel::Step50.mirror(), StepLabel::Step950);
        assert_eq!(StepLabel::Step100.mirror(), StepLabel::Step900);
        assert_eq!(StepLabel::Step500.mirror(), StepLabel::Step500);
        for step in StepLabel::ALL {
            assert_eq!(step.mirror().mirror(), step);
        }
    }

    #[test]
    fn names_roundtrip() {
        for step in StepLabel::ALL {
            assert_eq!(StepLabel::parse(step.as_str()), Some(step));
        }
        assert_eq!(StepLabel::parse("5000"), None);
    }

    #[test]
    fn labels_sort_light_to_dark() {
        let mut sorted = StepLabel::ALL;
        sorted.sort();
        assert_eq!(sorted, StepLabel::ALL);
    }

    #[test]
    fn target_lightness_strictly_decreases() {
        for pair in SHAPE_TABLE.windows(2) {
            assert!(
                pair[1].target_lightness < pair[0].target_lightness,
                "lightness anchors must strictly decrease"
            );
        }
    }

    #[test]
    fn taper_non_increasing_from_taper_start() {
        let start = TAPER_START.index();
        for i in start..STEP_COUNT - 1 {
            assert!(
                SHAPE_TABLE[i + 1].chroma_taper_ratio <= SHAPE_TABLE[i].chroma_taper_ratio,
                "taper must be non-increasing from step {}",
                StepLabel::ALL[i]
            );
        }
    }

    #[test]
    fn darkest_step_fully_desaturates() {
        assert_eq!(SHAPE_TABLE[StepLabel::Step950.index()].chroma_taper_ratio, 0.0);
    }

    #[test]
    fn lightest_step_keeps_full_chroma() {
        assert_eq!(SHAPE_TABLE[StepLabel::Step50.index()].chroma_taper_ratio, 1.0);
    }

    #[test]
    fn serde_uses_numeric_names() {
        let yaml = serde_yaml::to_string(&StepLabel::Step500).unwrap();
        assert_eq!(yaml.trim(), "'500'");
        let parsed: StepLabel = serde_yaml::from_str("'950'").unwrap();
        assert_eq!(parsed, StepLabel::Step950);
    }
}
