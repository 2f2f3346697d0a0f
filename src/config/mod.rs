//! Profile loading: which stages run, what they contain, and how durations
//! are coloured.
mod stages;
pub mod toml_loader;
pub mod validation;

pub use stages::{CandidateSpec, StageSpec, StepSpec};
pub use validation::ValidationWarning;

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::logging::xdg_dir;
use crate::timing::{Presentation, ThresholdTable};

/// Environment variable naming a profile file.
pub const CONFIG_ENV: &str = "SHELLBOOT_CONFIG";

/// The profile compiled into the binary.
pub const DEFAULT_PROFILE: &str = include_str!("../../conf/profile.toml");

/// Where a loaded profile came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileSource {
    /// The built-in default profile.
    #[default]
    BuiltIn,
    /// A profile file on disk.
    File(PathBuf),
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => f.write_str("<built-in>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A loaded bootstrap profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Detailed presentation; OR-ed with the `--verbose` flag.
    #[serde(default)]
    pub verbose: bool,
    /// Name of the section wrapping the whole run.
    #[serde(default = "default_overall")]
    pub overall: String,
    /// Duration colouring.
    #[serde(default)]
    pub thresholds: ThresholdTable,
    /// Stages in run order.
    #[serde(default)]
    pub stages: Vec<StageSpec>,
    /// Where this profile was loaded from.
    #[serde(skip)]
    pub source: ProfileSource,
}

fn default_overall() -> String {
    "Overall".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            overall: default_overall(),
            thresholds: ThresholdTable::default(),
            stages: Vec::new(),
            source: ProfileSource::BuiltIn,
        }
    }
}

impl Config {
    /// Resolve and load the profile.
    ///
    /// Resolution order: `explicit`, then `$SHELLBOOT_CONFIG`, then the user
    /// profile under the config directory, then the built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named profile does not exist, or if
    /// the chosen profile cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        match resolve_path(explicit, env, user_profile_path())? {
            Some(path) => Self::from_file(&path),
            None => Self::builtin(),
        }
    }

    /// Load a profile file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml_loader::load(path)?;
        config.source = ProfileSource::File(path.to_path_buf());
        Ok(config)
    }

    /// Parse the built-in default profile.
    ///
    /// # Errors
    ///
    /// Returns an error only if the compiled-in profile is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        toml_loader::parse(DEFAULT_PROFILE, Path::new("<built-in>"))
    }

    /// Presentation mode for this run.
    #[must_use]
    pub const fn presentation(&self, verbose_flag: bool) -> Presentation {
        Presentation::from_verbose(self.verbose || verbose_flag)
    }

    /// Check the profile for likely mistakes.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_all(self)
    }
}

/// `$XDG_CONFIG_HOME/shellboot/profile.toml`, falling back to
/// `~/.config/shellboot/profile.toml`.
#[must_use]
pub fn user_profile_path() -> Option<PathBuf> {
    Some(xdg_dir("XDG_CONFIG_HOME", ".config")?.join("shellboot/profile.toml"))
}

/// Pick the profile file to load; `None` means the built-in profile.
///
/// Explicit and environment paths must exist. The user profile is optional.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if an explicit or environment path does
/// not exist.
pub fn resolve_path(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    user: Option<PathBuf>,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit.map(Path::to_path_buf).or(env) {
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        return Ok(Some(path));
    }
    Ok(user.filter(|p| p.exists()))
}
