//! # Huecraft - Perceptual Color-Ramp and Design-Token Engine
//!
//! `huecraft` turns one seed color per semantic role into a complete,
//! display-safe design-token set: an eleven-step tonal ramp per role, a
//! derived dark-mode companion, deferred accessibility adjustments, and
//! deterministic interchange formats.
//!
//! ## Core Concepts
//!
//! - **Seed**: the single authored color that anchors a role's ramp
//!   ([`ColorSeed`], one per [`Role`] per theme).
//! - **Shape table**: the fixed, theme-independent definition of the eleven
//!   tonal steps ([`shape::SHAPE_TABLE`]) - lightness anchors, chroma
//!   taper, hue drift.
//! - **Ramp**: eleven gamut-mapped perceptual colors generated from a seed
//!   ([`ramp::generate`]), with the anchor step reproducing the seed's own
//!   lightness.
//! - **Dark derivation**: the dark ramp is the light ramp with its step
//!   bindings reversed - same colors, mirrored labels.
//! - **Deltas**: contrast and vision adjustments are compiled as deferred
//!   expressions ([`DeltaExpr`]) parametrized by the runtime [`ModeState`],
//!   never baked in.
//! - **Registry**: [`build`] drives a batch of [`ThemeSpec`]s through the
//!   whole pipeline with role-scoped failure isolation.
//!
//! ## Quick Start
//!
//! ```rust
//! use huecraft::{build, ColorSeed, EngineConfig, Mode, Role, StepLabel, ThemeSpec};
//!
//! let spec = ThemeSpec::named("aurora")
//!     .role(Role::Primary, ColorSeed::new(0.62, 0.10, 270.0))
//!     .role(Role::Neutral, ColorSeed::new(0.60, 0.02, 260.0));
//!
//! let output = build(&[spec], &EngineConfig::default());
//! let theme = output.theme("aurora").unwrap();
//!
//! let primary = theme.role(Mode::Light, Role::Primary).unwrap();
//! let mid = &primary.steps[&StepLabel::Step500];
//! assert!((mid.token.base.l - 0.62).abs() < 1e-3);
//! assert!(mid.export.hex.starts_with('#'));
//! ```
//!
//! ## Evaluating deferred adjustments
//!
//! The engine only emits expression definitions; the consuming layer
//! evaluates them against the current runtime state:
//!
//! ```rust
//! use huecraft::{
//!     build, evaluate, ColorSeed, EngineConfig, Mode, ModeState, Role, StepLabel, ThemeSpec,
//! };
//!
//! let spec = ThemeSpec::named("aurora").role(Role::Primary, ColorSeed::new(0.62, 0.10, 270.0));
//! let output = build(&[spec], &EngineConfig::default());
//! let token = &output.theme("aurora").unwrap().role(Mode::Light, Role::Primary).unwrap()
//!     .steps[&StepLabel::Step500].token;
//!
//! // Identity state: the base value, untouched.
//! let state = ModeState::for_theme("aurora");
//! assert_eq!(evaluate(token, &state), token.base);
//!
//! // Raised contrast: pulled toward black, never past the 25% ceiling.
//! let boosted = evaluate(token, &state.clone().with_contrast(2.0));
//! assert!(boosted.l < token.base.l);
//! ```

pub mod delta;
pub mod error;
pub mod export;
pub mod ramp;
pub mod registry;
pub mod shape;
pub mod theme;

// Color model re-exports: the engine's public surface speaks these types.
pub use huecraft_color::{ColorSeed, Gamut, Oklch, Rgb, SeedError};

pub use delta::{
    apply, compile, contrast_mix_fraction, evaluate, DeltaExpr, Mode, ModePreset, ModeState,
    Pole, StepToken, VisionProfile, CONTRAST_IDENTITY, CONTRAST_MAX, CONTRAST_MIX_CEILING,
};
pub use error::{Diagnostic, SpecError};
pub use export::{export, export_with_alpha, ExportedColor};
pub use ramp::{generate, GeneratedRamp, RampOutcome};
pub use registry::{build, EngineConfig, RegistryOutput, RoleTokens, ThemeTokens, TokenEntry};
pub use shape::{shape_of, ShapeStep, StepLabel, SHAPE_TABLE, STEP_COUNT, TAPER_START};
pub use theme::{Role, ThemeSpec, ROLE_COUNT};
