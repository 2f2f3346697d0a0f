//! Command: load the profile and report configuration warnings.
use anyhow::{Context as _, Result, bail};

use crate::cli::GlobalOpts;
use crate::config::{Config, ValidationWarning};
use crate::logging::Logger;

/// Format a warning for the console.
#[must_use]
pub fn format_warning(warning: &ValidationWarning) -> String {
    format!("{} [{}]: {}", warning.source, warning.item, warning.message)
}

/// Load the profile and list every warning; fails when there are any.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or has warnings.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let config = Config::load(global.config.as_deref()).context("loading profile")?;
    log.stage(&format!("Validating {}", config.source));

    let stage_count = config.stages.len();
    let group_count = config
        .stages
        .iter()
        .flat_map(|s| &s.steps)
        .filter(|s| s.kind() == "modules")
        .count();
    log.info(&format!("{stage_count} stages, {group_count} module groups"));

    let warnings = config.validate();
    if warnings.is_empty() {
        log.info("no problems found");
        return Ok(());
    }
    for warning in &warnings {
        log.warn(&format_warning(warning));
    }
    bail!("{} configuration warning(s)", warnings.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_format() {
        let w = ValidationWarning::new(
            "stage 'Prompt'",
            "engine",
            "module group has no candidates",
        );
        assert_eq!(
            format_warning(&w),
            "stage 'Prompt' [engine]: module group has no candidates"
        );
    }
}
