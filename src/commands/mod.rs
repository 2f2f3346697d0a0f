//! Subcommand implementations and their shared setup.
pub mod check;
pub mod completions;
pub mod run;
pub mod thresholds;
pub mod validate;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Log;

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded profile.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve and load the profile, then log any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be found, read or parsed.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let config = Config::load(global.config.as_deref()).context("loading profile")?;

        log.debug(&format!("profile: {}", config.source));
        log.debug(&format!(
            "{} stages, {} steps",
            config.stages.len(),
            config.stages.iter().map(|s| s.steps.len()).sum::<usize>()
        ));

        let warnings = config.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        Ok(Self { config })
    }
}
