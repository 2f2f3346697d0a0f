//! Domain-specific error types for shellboot.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`ActivationError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: profile loading and threshold tables
//! - [`ActivationError`]: an optional module could not be probed or
//!   activated; recorded in the group report, never propagated
//! - [`StepError`]: a timed bootstrap step failed

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error carried as the cause of a domain error.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors that arise from loading the profile.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A threshold table is not ascending, finite and non-negative.
    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(String),

    /// A profile path given explicitly does not exist.
    #[error("Profile not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The profile could not be read.
    #[error("IO error reading profile {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The profile is not valid TOML for the expected schema.
    #[error("Invalid profile {}: {message}", .path.display())]
    Parse {
        /// Path to the offending file (or `<built-in>`).
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors captured while trying to activate an optional module.
///
/// These never escape the module loader; they are recorded in the group
/// report and logged as warnings.
#[derive(Error, Debug)]
pub enum ActivationError {
    /// The availability check itself failed.
    #[error("availability check for '{name}' failed: {source}")]
    Probe {
        /// Candidate name.
        name: String,
        /// Underlying failure.
        source: Cause,
    },

    /// The module was available but activating it failed.
    #[error("activating '{name}' failed: {source}")]
    Activate {
        /// Candidate name.
        name: String,
        /// Underlying failure.
        source: Cause,
    },
}

impl ActivationError {
    /// Name of the candidate that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Probe { name, .. } | Self::Activate { name, .. } => name,
        }
    }
}

/// A timed step inside a bootstrap stage failed.
#[derive(Error, Debug)]
#[error("step '{label}' in stage '{stage}' failed: {source}")]
pub struct StepError {
    /// Stage the step belongs to.
    pub stage: String,
    /// Step label.
    pub label: String,
    /// Underlying failure.
    pub source: Cause,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn config_error_invalid_thresholds_display() {
        let e = ConfigError::InvalidThresholds("bound 5 is not ascending".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid threshold table: bound 5 is not ascending"
        );
    }

    #[test]
    fn config_error_not_found_display() {
        let e = ConfigError::NotFound(PathBuf::from("/nope/profile.toml"));
        assert_eq!(e.to_string(), "Profile not found: /nope/profile.toml");
    }

    #[test]
    fn config_error_io_has_source() {
        let e = ConfigError::Io {
            path: PathBuf::from("/conf/profile.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/conf/profile.toml"));
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_parse_display() {
        let e = ConfigError::Parse {
            path: PathBuf::from("profile.toml"),
            message: "expected `=`".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid profile profile.toml: expected `=`");
    }

    #[test]
    fn activation_error_carries_detail() {
        let e = ActivationError::Activate {
            name: "posh-git".to_string(),
            source: "exit 1: module not found".into(),
        };
        assert_eq!(
            e.to_string(),
            "activating 'posh-git' failed: exit 1: module not found"
        );
        assert_eq!(e.name(), "posh-git");
        assert!(e.source().is_some());
    }

    #[test]
    fn activation_error_probe_display() {
        let e = ActivationError::Probe {
            name: "zoxide".to_string(),
            source: "PATH unreadable".into(),
        };
        assert!(e.to_string().starts_with("availability check for 'zoxide' failed"));
    }

    #[test]
    fn step_error_display() {
        let e = StepError {
            stage: "Environment".to_string(),
            label: "load secrets".to_string(),
            source: "exit 2".into(),
        };
        assert_eq!(
            e.to_string(),
            "step 'load secrets' in stage 'Environment' failed: exit 2"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ActivationError>();
        assert_send_sync::<StepError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::NotFound(PathBuf::from("x"));
        let _anyhow_err: anyhow::Error = e.into();
    }
}
