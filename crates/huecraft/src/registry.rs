//! The theme registry: drives every theme spec through the full pipeline.
//!
//! For each theme, for each role: validate the seed, generate the light
//! ramp, derive the dark ramp, compile the deferred adjustment expressions
//! for both, and expand every baked value through the format exporter.
//!
//! Failure isolation is the registry's main job beyond plumbing. A bad or
//! missing seed costs exactly one role of one theme; a gamut fallback
//! costs nothing but a diagnostic. The pass itself never aborts, and the
//! output always contains everything that succeeded plus the diagnostics
//! for everything that did not.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use huecraft_color::Gamut;

use crate::delta::{compile, Mode, StepToken};
use crate::error::Diagnostic;
use crate::export::{export_with_alpha, ExportedColor};
use crate::ramp::{generate, GeneratedRamp};
use crate::shape::StepLabel;
use crate::theme::{Role, ThemeSpec};

// ─── Configuration ──────────────────────────────────────────────────────────

/// Engine configuration: the display gamut to guarantee and the step that
/// anchors seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Every generated color is guaranteed renderable in this gamut.
    pub target_gamut: Gamut,
    /// The step defined to reproduce each seed's own lightness.
    pub anchor_step: StepLabel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_gamut: Gamut::Standard,
            anchor_step: StepLabel::Step500,
        }
    }
}

// ─── Output tree ────────────────────────────────────────────────────────────

/// One ramp entry in the output: the compiled token plus its exported
/// interchange forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEntry {
    /// Base value and deferred adjustment expressions.
    #[serde(flatten)]
    pub token: StepToken,
    /// Interchange forms of the base value.
    pub export: ExportedColor,
}

/// All eleven compiled entries for one role in one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleTokens {
    /// The role these tokens belong to.
    pub role: Role,
    /// The seed's alpha, shared by every step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Step label to entry, light to dark.
    pub steps: BTreeMap<StepLabel, TokenEntry>,
}

/// The full token set for one theme: both modes, every role that built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeTokens {
    /// The theme name.
    pub name: String,
    /// Light-mode role tokens, in role order.
    pub light: Vec<RoleTokens>,
    /// Dark-mode role tokens, in role order.
    pub dark: Vec<RoleTokens>,
}

impl ThemeTokens {
    /// The tokens for a role in a mode, if that role built.
    pub fn role(&self, mode: Mode, role: Role) -> Option<&RoleTokens> {
        let side = match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        };
        side.iter().find(|tokens| tokens.role == role)
    }
}

/// Everything a registry pass produced: the token sets that succeeded and
/// the diagnostics for whatever did not.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryOutput {
    /// One token set per input theme, in input order.
    pub themes: Vec<ThemeTokens>,
    /// All recorded diagnostics, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl RegistryOutput {
    /// The token set for a theme, by name.
    pub fn theme(&self, name: &str) -> Option<&ThemeTokens> {
        self.themes.iter().find(|theme| theme.name == name)
    }
}

// ─── The pass ───────────────────────────────────────────────────────────────

/// Runs every theme spec through the pipeline.
///
/// Deterministic: the same specs and configuration always produce the
/// identical output, and per-theme results do not depend on what other
/// themes are in the batch.
pub fn build(specs: &[ThemeSpec], config: &EngineConfig) -> RegistryOutput {
    let mut themes = Vec::with_capacity(specs.len());
    let mut diagnostics = Vec::new();

    for spec in specs {
        themes.push(build_theme(spec, config, &mut diagnostics));
    }

    RegistryOutput {
        themes,
        diagnostics,
    }
}

fn build_theme(
    spec: &ThemeSpec,
    config: &EngineConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> ThemeTokens {
    let mut light = Vec::with_capacity(Role::ALL.len());
    let mut dark = Vec::with_capacity(Role::ALL.len());

    for role in Role::ALL {
        let Some(seed) = spec.seed(role) else {
            warn!(theme = spec.name(), %role, "role has no seed, skipping");
            diagnostics.push(Diagnostic::MissingRole {
                theme: spec.name().to_string(),
                role,
            });
            continue;
        };

        let outcome = match generate(seed, config.anchor_step, config.target_gamut) {
            Ok(outcome) => outcome,
            Err(source) => {
                warn!(theme = spec.name(), %role, %source, "seed out of range, skipping role");
                diagnostics.push(Diagnostic::SeedInvalid {
                    theme: spec.name().to_string(),
                    role,
                    source,
                });
                continue;
            }
        };

        for step in &outcome.fallback_steps {
            debug!(theme = spec.name(), %role, %step, "gamut search fell back to achromatic");
            diagnostics.push(Diagnostic::GamutMapFallback {
                theme: spec.name().to_string(),
                role,
                step: *step,
            });
        }

        let light_ramp = outcome.ramp;
        let dark_ramp = light_ramp.flipped();
        light.push(role_tokens(role, &light_ramp, Mode::Light));
        dark.push(role_tokens(role, &dark_ramp, Mode::Dark));
    }

    ThemeTokens {
        name: spec.name().to_string(),
        light,
        dark,
    }
}

/// Compiles and exports one ramp.
fn role_tokens(role: Role, ramp: &GeneratedRamp, mode: Mode) -> RoleTokens {
    let alpha = ramp.alpha();
    let steps = compile(ramp, role, mode)
        .into_iter()
        .map(|(step, token)| {
            let export = export_with_alpha(token.base, alpha);
            (step, TokenEntry { token, export })
        })
        .collect();

    RoleTokens { role, alpha, steps }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
