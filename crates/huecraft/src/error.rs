//! Error and diagnostic types for the token engine.
//!
//! Two distinct families live here:
//!
//! - [`SpecError`]: authoring-time failures (a theme spec that cannot be
//!   parsed or is structurally incomplete). These are ordinary `Result`
//!   errors returned by the spec-loading surface.
//! - [`Diagnostic`]: generation-time conditions recorded by the registry.
//!   Diagnostics never abort a build; they are collected, scoped as
//!   narrowly as possible (step, then role, then theme), and handed back
//!   alongside whatever output succeeded.

use std::path::PathBuf;

use thiserror::Error;

use huecraft_color::SeedError;

use crate::shape::StepLabel;
use crate::theme::Role;

/// Errors that can occur when building or loading a theme spec.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The YAML could not be parsed at all.
    #[error("failed to parse theme spec: {message}")]
    Parse {
        /// Error message from the YAML parser.
        message: String,
    },

    /// A role key does not name one of the ten known roles.
    #[error("unknown role '{name}' (expected one of: {})", Role::name_list())]
    UnknownRole {
        /// The offending key.
        name: String,
    },

    /// A seed value could not be interpreted as a color.
    #[error("invalid seed for role '{role}': {message}")]
    InvalidSeed {
        /// The role whose seed failed to parse or validate.
        role: Role,
        /// What was wrong with it.
        message: String,
    },

    /// The spec has no name and none could be derived.
    #[error("theme spec has no 'name' key")]
    MissingName,

    /// A required role has no seed.
    #[error("theme spec omits required role '{role}'")]
    MissingRole {
        /// The absent role.
        role: Role,
    },

    /// The spec file could not be read.
    #[error("failed to read theme spec {}: {message}", path.display())]
    Load {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O message.
        message: String,
    },
}

/// A recoverable condition recorded during a registry build.
///
/// Every variant is scoped to the smallest unit that failed; the build
/// continues for everything else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A seed was out of its declared range; the role's ramp was skipped.
    #[error("theme '{theme}': skipped role '{role}': {source}")]
    SeedInvalid {
        /// Theme being built.
        theme: String,
        /// The skipped role.
        role: Role,
        /// The component that was out of range.
        source: SeedError,
    },

    /// A theme spec omits a required role; the role was skipped.
    #[error("theme '{theme}': missing seed for required role '{role}'")]
    MissingRole {
        /// Theme being built.
        theme: String,
        /// The absent role.
        role: Role,
    },

    /// The gamut boundary search could not apply and the step was
    /// desaturated outright. The ramp is still produced.
    #[error("theme '{theme}': {role}/{step} snapped to achromatic (gamut search fallback)")]
    GamutMapFallback {
        /// Theme being built.
        theme: String,
        /// Role whose ramp hit the fallback.
        role: Role,
        /// The affected step.
        step: StepLabel,
    },
}

impl Diagnostic {
    /// The theme this diagnostic belongs to.
    pub fn theme(&self) -> &str {
        match self {
            Diagnostic::SeedInvalid { theme, .. }
            | Diagnostic::MissingRole { theme, .. }
            | Diagnostic::GamutMapFallback { theme, .. } => theme,
        }
    }

    /// The role this diagnostic is scoped to.
    pub fn role(&self) -> Role {
        match self {
            Diagnostic::SeedInvalid { role, .. }
            | Diagnostic::MissingRole { role, .. }
            | Diagnostic::GamutMapFallback { role, .. } => *role,
        }
    }

    /// True when the diagnostic means the role produced no ramp at all.
    pub fn skipped_role(&self) -> bool {
        matches!(
            self,
            Diagnostic::SeedInvalid { .. } | Diagnostic::MissingRole { .. }
        )
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
