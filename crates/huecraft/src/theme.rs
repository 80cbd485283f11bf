//! Theme specs: the authored input to the token engine.
//!
//! A theme spec is a name plus one seed color per semantic role, with
//! optional named presets of the runtime mode state. Specs can be built
//! programmatically or loaded from YAML files.
//!
//! # YAML format
//!
//! ```yaml
//! name: aurora
//! roles:
//!   primary: { l: 0.62, c: 0.10, h: 270 }
//!   success: "#2f9e44"          # hex shorthand, converted perceptually
//!   # ... one entry per role
//! presets:
//!   reading:
//!     mode: dark
//!     contrast: 1.4
//! ```
//!
//! Seeds accept either an explicit OKLCH mapping (`l`/`c`/`h`, optional
//! `alpha`) or a hex string, which is converted through the color model so
//! the rest of the pipeline only ever sees perceptual values.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use huecraft_color::{srgb_to_oklch, ColorSeed, Rgb};

use crate::delta::{ModePreset, ModeState};
use crate::error::SpecError;

// ─── Role ───────────────────────────────────────────────────────────────────

/// A semantic color role. Every theme provides one seed per role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Brand color; buttons, links in their active state, focus rings.
    Primary,
    /// Supporting brand color.
    Secondary,
    /// Decorative highlight.
    Accent,
    /// Grays for text and borders.
    Neutral,
    /// Page and panel backgrounds.
    Surface,
    /// Hyperlink color.
    Link,
    /// Positive status.
    Success,
    /// Cautionary status.
    Warning,
    /// Failure status.
    Error,
    /// Informational status.
    Info,
}

/// Number of roles in every theme.
pub const ROLE_COUNT: usize = 10;

impl Role {
    /// All roles, in output order.
    pub const ALL: [Role; ROLE_COUNT] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Neutral,
        Role::Surface,
        Role::Link,
        Role::Success,
        Role::Warning,
        Role::Error,
        Role::Info,
    ];

    /// The role's spec-file name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Neutral => "neutral",
            Role::Surface => "surface",
            Role::Link => "link",
            Role::Success => "success",
            Role::Warning => "warning",
            Role::Error => "error",
            Role::Info => "info",
        }
    }

    /// Parses a spec-file name into a role.
    pub fn parse(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// True for the four status roles (success, warning, error, info).
    pub const fn is_status(self) -> bool {
        matches!(self, Role::Success | Role::Warning | Role::Error | Role::Info)
    }

    /// Comma-separated list of all role names, for error messages.
    pub fn name_list() -> &'static str {
        "primary, secondary, accent, neutral, surface, link, success, warning, error, info"
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ThemeSpec ──────────────────────────────────────────────────────────────

/// An authored theme: a name, ten role seeds, and optional mode presets.
///
/// # Example
///
/// ```rust
/// use huecraft::{ColorSeed, Role, ThemeSpec};
///
/// let spec = ThemeSpec::named("aurora")
///     .role(Role::Primary, ColorSeed::new(0.62, 0.10, 270.0))
///     .role(Role::Success, ColorSeed::new(0.64, 0.13, 145.0));
///
/// assert_eq!(spec.name(), "aurora");
/// assert!(spec.seed(Role::Primary).is_some());
/// assert!(spec.seed(Role::Error).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSpec {
    name: String,
    roles: BTreeMap<Role, ColorSeed>,
    presets: BTreeMap<String, ModePreset>,
}

impl ThemeSpec {
    /// Creates an empty spec with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeMap::new(),
            presets: BTreeMap::new(),
        }
    }

    /// Replaces the name, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds (or replaces) a role seed, returning `self` for chaining.
    pub fn role(mut self, role: Role, seed: ColorSeed) -> Self {
        self.roles.insert(role, seed);
        self
    }

    /// Adds a named mode preset, returning `self` for chaining.
    pub fn preset(mut self, name: impl Into<String>, preset: ModePreset) -> Self {
        self.presets.insert(name.into(), preset);
        self
    }

    /// The theme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The seed for a role, if authored.
    pub fn seed(&self, role: Role) -> Option<&ColorSeed> {
        self.roles.get(&role)
    }

    /// All authored seeds, in role order.
    pub fn seeds(&self) -> impl Iterator<Item = (Role, &ColorSeed)> {
        self.roles.iter().map(|(role, seed)| (*role, seed))
    }

    /// The named mode presets.
    pub fn presets(&self) -> &BTreeMap<String, ModePreset> {
        &self.presets
    }

    /// Resolves a preset into a full [`ModeState`] carrying this theme's
    /// name, if the preset exists.
    pub fn preset_state(&self, preset: &str) -> Option<ModeState> {
        self.presets
            .get(preset)
            .map(|p| p.state_for(self.name.clone()))
    }

    /// Validates that every required role has an in-range seed.
    ///
    /// The registry tolerates incomplete specs (it skips the role and
    /// records a diagnostic); this method is for authors who want early,
    /// hard failure instead.
    pub fn validate(&self) -> Result<(), SpecError> {
        for role in Role::ALL {
            match self.roles.get(&role) {
                None => return Err(SpecError::MissingRole { role }),
                Some(seed) => {
                    seed.validate().map_err(|e| SpecError::InvalidSeed {
                        role,
                        message: e.to_string(),
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Loads a spec from YAML content. The `name` key is required.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        let (name, spec) = parse_spec(yaml)?;
        match name {
            Some(name) => Ok(spec.with_name(name)),
            None => Err(SpecError::MissingName),
        }
    }

    /// Loads a spec from a YAML file.
    ///
    /// When the file has no `name` key, the name is derived from the file
    /// stem, mirroring how theme files are usually organized
    /// (`themes/aurora.yaml` names the theme `aurora`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (name, spec) = parse_spec(&content)?;
        let name = name.or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        });

        match name {
            Some(name) => Ok(spec.with_name(name)),
            None => Err(SpecError::MissingName),
        }
    }
}

/// Parses YAML into an unnamed spec plus the optional `name` key.
fn parse_spec(yaml: &str) -> Result<(Option<String>, ThemeSpec), SpecError> {
    let root: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| SpecError::Parse {
            message: e.to_string(),
        })?;

    let mapping = root.as_mapping().ok_or_else(|| SpecError::Parse {
        message: "spec root must be a mapping".to_string(),
    })?;

    let mut name = None;
    let mut spec = ThemeSpec::named("");

    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| SpecError::Parse {
            message: format!("spec keys must be strings, got {:?}", key),
        })?;

        match key {
            "name" => {
                name = Some(
                    value
                        .as_str()
                        .ok_or_else(|| SpecError::Parse {
                            message: "'name' must be a string".to_string(),
                        })?
                        .to_string(),
                );
            }
            "roles" => {
                let roles = value.as_mapping().ok_or_else(|| SpecError::Parse {
                    message: "'roles' must be a mapping".to_string(),
                })?;
                for (role_key, seed_value) in roles {
                    let role_key = role_key.as_str().ok_or_else(|| SpecError::Parse {
                        message: format!("role keys must be strings, got {:?}", role_key),
                    })?;
                    let role = Role::parse(role_key).ok_or_else(|| SpecError::UnknownRole {
                        name: role_key.to_string(),
                    })?;
                    let seed = parse_seed(role, seed_value)?;
                    spec.roles.insert(role, seed);
                }
            }
            "presets" => {
                let presets = value.as_mapping().ok_or_else(|| SpecError::Parse {
                    message: "'presets' must be a mapping".to_string(),
                })?;
                for (preset_key, preset_value) in presets {
                    let preset_key = preset_key.as_str().ok_or_else(|| SpecError::Parse {
                        message: format!("preset keys must be strings, got {:?}", preset_key),
                    })?;
                    let preset: ModePreset = serde_yaml::from_value(preset_value.clone())
                        .map_err(|e| SpecError::Parse {
                            message: format!("preset '{}': {}", preset_key, e),
                        })?;
                    spec.presets.insert(preset_key.to_string(), preset);
                }
            }
            other => {
                return Err(SpecError::Parse {
                    message: format!("unknown top-level key '{}'", other),
                });
            }
        }
    }

    Ok((name, spec))
}

/// Parses a seed value: either an OKLCH mapping or a hex string shorthand.
fn parse_seed(role: Role, value: &serde_yaml::Value) -> Result<ColorSeed, SpecError> {
    match value {
        serde_yaml::Value::String(hex) => {
            let (rgb, alpha) = Rgb::from_hex(hex).map_err(|e| SpecError::InvalidSeed {
                role,
                message: e.to_string(),
            })?;
            let color = srgb_to_oklch(rgb);
            let mut seed = ColorSeed::new(color.l, color.c, color.h);
            if let Some(a) = alpha {
                seed = seed.with_alpha(a as f64 / 255.0);
            }
            Ok(seed)
        }
        serde_yaml::Value::Mapping(_) => {
            serde_yaml::from_value(value.clone()).map_err(|e| SpecError::InvalidSeed {
                role,
                message: e.to_string(),
            })
        }
        other => Err(SpecError::InvalidSeed {
            role,
            message: format!("expected a mapping or hex string, got {:?}", other),
        }),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::Mode;

    fn full_yaml() -> String {
        let mut out = String::from("name: aurora\nroles:\n");
        for (i, role) in Role::ALL.iter().enumerate() {
            out.push_str(&format!(
                "  {}: {{ l: 0.{}, c: 0.08, h: {}.0 }}\n",
                role,
                55 + i,
                (i * 30) % 360
            ));
        }
        out
    }

    // =====================================================================
    // Role basics
    // =====================================================================

    #[test]
    fn ten_roles() {
        assert_eq!(Role::ALL.len(), 10);
    }

    #[test]
    fn role_names_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("primray"), None);
    }

    #[test]
    fn status_roles() {
        assert!(Role::Success.is_status());
        assert!(Role::Warning.is_status());
        assert!(Role::Error.is_status());
        assert!(Role::Info.is_status());
        assert!(!Role::Primary.is_status());
        assert!(!Role::Surface.is_status());
    }

    #[test]
    fn role_serde_uses_lowercase() {
        let yaml = serde_yaml::to_string(&Role::Primary).unwrap();
        assert_eq!(yaml.trim(), "primary");
    }

    // =====================================================================
    // Builder
    // =====================================================================

    #[test]
    fn builder_adds_roles() {
        let spec = ThemeSpec::named("test")
            .role(Role::Primary, ColorSeed::new(0.62, 0.10, 270.0))
            .role(Role::Error, ColorSeed::new(0.58, 0.15, 25.0));

        assert_eq!(spec.name(), "test");
        assert_eq!(spec.seeds().count(), 2);
        assert!(spec.seed(Role::Primary).is_some());
        assert!(spec.seed(Role::Neutral).is_none());
    }

    #[test]
    fn builder_replaces_existing_role() {
        let spec = ThemeSpec::named("test")
            .role(Role::Primary, ColorSeed::new(0.5, 0.1, 0.0))
            .role(Role::Primary, ColorSeed::new(0.6, 0.2, 90.0));

        assert_eq!(spec.seed(Role::Primary).unwrap().h, 90.0);
    }

    #[test]
    fn validate_flags_missing_roles() {
        let spec = ThemeSpec::named("partial").role(Role::Primary, ColorSeed::new(0.6, 0.1, 0.0));
        assert!(matches!(
            spec.validate(),
            Err(SpecError::MissingRole { role: Role::Secondary })
        ));
    }

    #[test]
    fn validate_flags_out_of_range_seed() {
        let mut spec = ThemeSpec::named("bad");
        for role in Role::ALL {
            spec = spec.role(role, ColorSeed::new(0.6, 0.1, 0.0));
        }
        let spec = spec.role(Role::Accent, ColorSeed::new(1.5, 0.1, 0.0));
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidSeed { role: Role::Accent, .. })
        ));
    }

    #[test]
    fn validate_accepts_complete_spec() {
        let mut spec = ThemeSpec::named("ok");
        for role in Role::ALL {
            spec = spec.role(role, ColorSeed::new(0.6, 0.1, 200.0));
        }
        assert!(spec.validate().is_ok());
    }

    // =====================================================================
    // YAML loading
    // =====================================================================

    #[test]
    fn from_yaml_parses_all_roles() {
        let spec = ThemeSpec::from_yaml(&full_yaml()).unwrap();
        assert_eq!(spec.name(), "aurora");
        assert_eq!(spec.seeds().count(), 10);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn from_yaml_requires_name() {
        let result = ThemeSpec::from_yaml("roles:\n  primary: { l: 0.6, c: 0.1, h: 0 }\n");
        assert!(matches!(result, Err(SpecError::MissingName)));
    }

    #[test]
    fn from_yaml_rejects_unknown_role() {
        let result = ThemeSpec::from_yaml(
            "name: x\nroles:\n  primray: { l: 0.6, c: 0.1, h: 0 }\n",
        );
        match result {
            Err(SpecError::UnknownRole { name }) => assert_eq!(name, "primray"),
            _ => panic!("expected UnknownRole"),
        }
    }

    #[test]
    fn from_yaml_rejects_malformed_yaml() {
        assert!(matches!(
            ThemeSpec::from_yaml("not valid: ["),
            Err(SpecError::Parse { .. })
        ));
    }

    #[test]
    fn from_yaml_rejects_unknown_top_level_key() {
        assert!(matches!(
            ThemeSpec::from_yaml("name: x\ncolors: {}\n"),
            Err(SpecError::Parse { .. })
        ));
    }

    #[test]
    fn from_yaml_hex_shorthand() {
        let spec =
            ThemeSpec::from_yaml("name: x\nroles:\n  success: \"#2f9e44\"\n").unwrap();
        let seed = spec.seed(Role::Success).unwrap();
        // A mid-green: sensible lightness, real chroma, hue in the greens.
        assert!(seed.l > 0.4 && seed.l < 0.8, "lightness: {}", seed.l);
        assert!(seed.c > 0.05, "chroma: {}", seed.c);
        assert!(seed.h > 120.0 && seed.h < 165.0, "hue: {}", seed.h);
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn from_yaml_hex_with_alpha() {
        let spec =
            ThemeSpec::from_yaml("name: x\nroles:\n  surface: \"#2f9e44cc\"\n").unwrap();
        let alpha = spec.seed(Role::Surface).unwrap().alpha.unwrap();
        assert!((alpha - 0.8).abs() < 0.005, "alpha: {}", alpha);
    }

    #[test]
    fn from_yaml_seed_with_alpha_field() {
        let spec = ThemeSpec::from_yaml(
            "name: x\nroles:\n  surface: { l: 0.95, c: 0.01, h: 80, alpha: 0.9 }\n",
        )
        .unwrap();
        assert_eq!(spec.seed(Role::Surface).unwrap().alpha, Some(0.9));
    }

    #[test]
    fn from_yaml_rejects_scalar_seed() {
        assert!(matches!(
            ThemeSpec::from_yaml("name: x\nroles:\n  primary: 42\n"),
            Err(SpecError::InvalidSeed { role: Role::Primary, .. })
        ));
    }

    #[test]
    fn from_yaml_parses_presets() {
        let spec = ThemeSpec::from_yaml(
            "name: x\npresets:\n  reading:\n    mode: dark\n    contrast: 1.4\n",
        )
        .unwrap();
        let state = spec.preset_state("reading").unwrap();
        assert_eq!(state.theme, "x");
        assert_eq!(state.mode, Mode::Dark);
        assert_eq!(state.contrast, 1.4);
        assert_eq!(state.vision, None);
        assert!(spec.preset_state("missing").is_none());
    }

    // =====================================================================
    // File loading
    // =====================================================================

    #[test]
    fn from_file_uses_stem_as_name() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dusk.yaml");
        fs::write(&path, "roles:\n  primary: { l: 0.6, c: 0.1, h: 270 }\n").unwrap();

        let spec = ThemeSpec::from_file(&path).unwrap();
        assert_eq!(spec.name(), "dusk");
    }

    #[test]
    fn from_file_explicit_name_wins() {
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dusk.yaml");
        fs::write(
            &path,
            "name: twilight\nroles:\n  primary: { l: 0.6, c: 0.1, h: 270 }\n",
        )
        .unwrap();

        let spec = ThemeSpec::from_file(&path).unwrap();
        assert_eq!(spec.name(), "twilight");
    }

    #[test]
    fn from_file_missing_file_errors() {
        assert!(matches!(
            ThemeSpec::from_file("/nonexistent/theme.yaml"),
            Err(SpecError::Load { .. })
        ));
    }
}
