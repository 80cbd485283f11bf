//! The delta compiler: deferred contrast and vision adjustments.
//!
//! Baked ramp values are final, but accessibility adjustments are not -
//! the user picks a contrast level and a vision profile at runtime, long
//! after the build. Rather than baking one variant per combination, the
//! compiler emits a small *expression* per ramp entry describing how to
//! adjust it, and the consuming layer evaluates those expressions against
//! the current [`ModeState`].
//!
//! The expression language is deliberately tiny - three variants, no
//! styling-format vocabulary - so any output target can carry it:
//!
//! - [`DeltaExpr::Identity`]: pass through unchanged.
//! - [`DeltaExpr::MixTowardPole`]: blend toward black (light mode) or
//!   white (dark mode) by a fraction derived from the runtime contrast
//!   factor.
//! - [`DeltaExpr::PerceptualOffset`]: a fixed lightness/chroma/hue nudge,
//!   used for the vision-profile layer.
//!
//! Every ramp entry compiles to three linked handles: the baked base, a
//! contrast expression reading the base, and a vision expression reading
//! the contrast-adjusted value. [`evaluate`] applies them in that order.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use huecraft_color::{oklab_to_oklch, oklch_to_oklab, oklab_lerp, Oklab, Oklch};

use crate::ramp::GeneratedRamp;
use crate::shape::StepLabel;
use crate::theme::Role;

// ─── Mode and runtime state ─────────────────────────────────────────────────

/// Light or dark rendering mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Light backgrounds, dark text.
    #[default]
    Light,
    /// Dark backgrounds, light text.
    Dark,
}

impl Mode {
    /// The mode's configuration-file name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the supported color-vision-deficiency profiles. At most one is
/// active at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VisionProfile {
    /// Reduced sensitivity to red light.
    Protanopia,
    /// Reduced sensitivity to green light (the most common deficiency).
    Deuteranopia,
    /// Reduced sensitivity to blue light.
    Tritanopia,
    /// Little or no color perception; differences must survive in tone.
    Monochromacy,
}

impl VisionProfile {
    /// All profiles.
    pub const ALL: [VisionProfile; 4] = [
        VisionProfile::Protanopia,
        VisionProfile::Deuteranopia,
        VisionProfile::Tritanopia,
        VisionProfile::Monochromacy,
    ];

    /// The profile's configuration-file name.
    pub fn as_str(self) -> &'static str {
        match self {
            VisionProfile::Protanopia => "protanopia",
            VisionProfile::Deuteranopia => "deuteranopia",
            VisionProfile::Tritanopia => "tritanopia",
            VisionProfile::Monochromacy => "monochromacy",
        }
    }

    /// The authored corrective offsets for this profile.
    ///
    /// The dichromacies rotate hue away from the confusable axis and trade
    /// a little chroma for lightness separation; monochromacy collapses
    /// chroma and leans entirely on lightness.
    fn offset(self) -> (f64, f64, f64) {
        match self {
            VisionProfile::Protanopia => (0.03, -0.010, 12.0),
            VisionProfile::Deuteranopia => (0.03, -0.005, -10.0),
            VisionProfile::Tritanopia => (0.02, -0.010, -15.0),
            VisionProfile::Monochromacy => (0.05, -0.080, 0.0),
        }
    }
}

impl std::fmt::Display for VisionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime-selected state a consumer evaluates expressions against.
///
/// This is an immutable value the consuming layer constructs and passes
/// in; the engine never stores one. [`ModeState::default`] is the identity
/// state: light mode, no vision profile, contrast at 1.0, under which every
/// expression evaluates to its unmodified base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeState {
    /// The active theme's name.
    #[serde(default)]
    pub theme: String,
    /// Light or dark.
    #[serde(default)]
    pub mode: Mode,
    /// The active vision profile, if any.
    #[serde(default)]
    pub vision: Option<VisionProfile>,
    /// The contrast factor, [`CONTRAST_IDENTITY`] to [`CONTRAST_MAX`].
    #[serde(default = "identity_contrast")]
    pub contrast: f64,
}

fn identity_contrast() -> f64 {
    CONTRAST_IDENTITY
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            theme: String::new(),
            mode: Mode::Light,
            vision: None,
            contrast: CONTRAST_IDENTITY,
        }
    }
}

impl ModeState {
    /// The identity state for a named theme.
    pub fn for_theme(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with the mode replaced.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the vision profile replaced.
    pub fn with_vision(mut self, vision: Option<VisionProfile>) -> Self {
        self.vision = vision;
        self
    }

    /// Returns a copy with the contrast factor replaced.
    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.contrast = contrast;
        self
    }
}

/// A named mode preset as authored in a theme spec: a [`ModeState`] minus
/// the theme name, which the spec supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModePreset {
    /// Light or dark.
    #[serde(default)]
    pub mode: Mode,
    /// The vision profile to activate, if any.
    #[serde(default)]
    pub vision: Option<VisionProfile>,
    /// The contrast factor.
    #[serde(default = "identity_contrast")]
    pub contrast: f64,
}

impl ModePreset {
    /// Expands this preset into a full [`ModeState`] for a theme.
    pub fn state_for(&self, theme: String) -> ModeState {
        ModeState {
            theme,
            mode: self.mode,
            vision: self.vision,
            contrast: self.contrast,
        }
    }
}

// ─── Contrast mapping ───────────────────────────────────────────────────────

/// The contrast factor value at which adjustments vanish.
pub const CONTRAST_IDENTITY: f64 = 1.0;
/// The largest contrast factor with any additional effect.
pub const CONTRAST_MAX: f64 = 2.0;
/// The mixing ceiling: no contrast setting ever moves a color more than
/// this fraction of the way to its pole.
pub const CONTRAST_MIX_CEILING: f64 = 0.25;

/// Maps the runtime contrast factor to a pole-mix fraction.
///
/// Monotonic and bounded: exactly `0.0` at [`CONTRAST_IDENTITY`], rising
/// linearly to [`CONTRAST_MIX_CEILING`] at [`CONTRAST_MAX`], and flat
/// beyond it no matter how far the factor is pushed. Non-finite input is
/// treated as the identity.
pub fn contrast_mix_fraction(factor: f64) -> f64 {
    if !factor.is_finite() {
        return 0.0;
    }
    let clamped = factor.clamp(CONTRAST_IDENTITY, CONTRAST_MAX);
    (clamped - CONTRAST_IDENTITY) / (CONTRAST_MAX - CONTRAST_IDENTITY) * CONTRAST_MIX_CEILING
}

/// The contrast target: which end of the tonal axis a mix pulls toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pole {
    /// Pull toward black (used by light-mode ramps).
    Black,
    /// Pull toward white (used by dark-mode ramps).
    White,
}

impl Pole {
    /// The pole a ramp in the given mode mixes toward.
    pub fn for_mode(mode: Mode) -> Pole {
        match mode {
            Mode::Light => Pole::Black,
            Mode::Dark => Pole::White,
        }
    }

    /// The pole as an OKLab mixing target.
    fn target(self) -> Oklab {
        match self {
            Pole::Black => Oklab {
                l: 0.0,
                a: 0.0,
                b: 0.0,
            },
            Pole::White => Oklab {
                l: 1.0,
                a: 0.0,
                b: 0.0,
            },
        }
    }
}

// ─── Expression language ────────────────────────────────────────────────────

/// A deferred color transform, evaluated against a [`ModeState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeltaExpr {
    /// Pass the input through unchanged.
    Identity,
    /// Blend toward a pole by the fraction
    /// [`contrast_mix_fraction`] derives from the runtime contrast factor.
    MixTowardPole {
        /// The mixing target.
        pole: Pole,
    },
    /// Nudge the input by fixed perceptual offsets.
    PerceptualOffset {
        /// Lightness delta.
        dl: f64,
        /// Chroma delta.
        dc: f64,
        /// Hue delta in degrees.
        dh: f64,
    },
}

impl DeltaExpr {
    /// The authored corrective expression for a vision profile.
    fn for_profile(profile: VisionProfile) -> DeltaExpr {
        let (dl, dc, dh) = profile.offset();
        DeltaExpr::PerceptualOffset { dl, dc, dh }
    }
}

/// Applies a single expression to a color under the given state.
pub fn apply(expr: &DeltaExpr, input: Oklch, state: &ModeState) -> Oklch {
    match expr {
        DeltaExpr::Identity => input,
        DeltaExpr::MixTowardPole { pole } => {
            let fraction = contrast_mix_fraction(state.contrast);
            if fraction == 0.0 {
                // The no-op contract is exact: at the identity factor the
                // input passes through bit-identical, not merely close.
                return input;
            }
            let mixed = oklab_lerp(fraction, oklch_to_oklab(input), pole.target());
            oklab_to_oklch(mixed)
        }
        DeltaExpr::PerceptualOffset { dl, dc, dh } => Oklch::new(
            (input.l + dl).clamp(0.0, 1.0),
            (input.c + dc).max(0.0),
            input.h + dh,
        ),
    }
}

// ─── Compilation ────────────────────────────────────────────────────────────

/// The steps that receive vision deltas on the curated roles.
pub const VISION_STEPS: [StepLabel; 3] =
    [StepLabel::Step400, StepLabel::Step500, StepLabel::Step600];

/// The curated (role, step) pairs carrying vision deltas: the primary role
/// plus the four status roles, at the mid-range steps interfaces lean on
/// for meaning. Everything else passes through.
static VISION_ENTRIES: Lazy<BTreeSet<(Role, StepLabel)>> = Lazy::new(|| {
    let mut entries = BTreeSet::new();
    for role in Role::ALL {
        if role == Role::Primary || role.is_status() {
            for step in VISION_STEPS {
                entries.insert((role, step));
            }
        }
    }
    entries
});

/// True when the given ramp entry carries authored vision deltas.
pub fn has_vision_delta(role: Role, step: StepLabel) -> bool {
    VISION_ENTRIES.contains(&(role, step))
}

/// One compiled ramp entry: the baked base value and its two deferred
/// adjustment handles. The vision expression reads the contrast-adjusted
/// value, which reads the base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepToken {
    /// The baked, gamut-mapped value.
    pub base: Oklch,
    /// The contrast-adjustment expression.
    pub contrast: DeltaExpr,
    /// Per-profile vision expressions; empty for non-curated entries.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vision: BTreeMap<VisionProfile, DeltaExpr>,
}

/// Compiles a ramp into per-step tokens for the given role and mode.
///
/// Every entry gets a contrast expression toward the mode's pole; curated
/// entries additionally get one vision expression per profile. Nothing is
/// evaluated here - evaluation belongs to the consumer.
pub fn compile(ramp: &GeneratedRamp, role: Role, mode: Mode) -> BTreeMap<StepLabel, StepToken> {
    let pole = Pole::for_mode(mode);

    ramp.iter()
        .map(|(step, base)| {
            let vision = if has_vision_delta(role, step) {
                VisionProfile::ALL
                    .into_iter()
                    .map(|profile| (profile, DeltaExpr::for_profile(profile)))
                    .collect()
            } else {
                BTreeMap::new()
            };

            let token = StepToken {
                base,
                contrast: DeltaExpr::MixTowardPole { pole },
                vision,
            };
            (step, token)
        })
        .collect()
}

/// Evaluates a compiled entry under a runtime state.
///
/// Order is fixed: base, then contrast, then vision. With no active
/// profile, or for entries without authored deltas, the vision layer is a
/// pass-through.
pub fn evaluate(token: &StepToken, state: &ModeState) -> Oklch {
    let contrast_adjusted = apply(&token.contrast, token.base, state);
    match state.vision.and_then(|profile| token.vision.get(&profile)) {
        Some(expr) => apply(expr, contrast_adjusted, state),
        None => contrast_adjusted,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
