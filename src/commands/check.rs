//! Command: probe every module candidate without activating anything.
use std::sync::Arc;

use anyhow::Result;

use crate::bootstrap::{Context, steps};
use crate::cli::GlobalOpts;
use crate::config::{Config, StepSpec};
use crate::exec::SystemExecutor;
use crate::loader::Capability as _;
use crate::logging::{Log, Logger};

use super::CommandSetup;

/// Availability of one configured candidate.
#[derive(Debug)]
pub struct ProbeResult {
    /// Stage the candidate's group belongs to.
    pub stage: String,
    /// Group label.
    pub group: String,
    /// Candidate name.
    pub name: String,
    /// Whether the candidate is available, or why that could not be told.
    pub available: Result<bool, String>,
}

impl ProbeResult {
    /// Console line for this result.
    #[must_use]
    pub fn line(&self) -> String {
        match &self.available {
            Ok(true) => format!("\x1b[32m✓\x1b[0m {}", self.name),
            Ok(false) => format!("\x1b[2m· {} (not available)\x1b[0m", self.name),
            Err(e) => format!("\x1b[31m✗\x1b[0m {}: {e}", self.name),
        }
    }
}

/// Probe every candidate of every module group in `config`, in order.
#[must_use]
pub fn probe_all(ctx: &Context, config: &Config) -> Vec<ProbeResult> {
    let mut results = Vec::new();
    for stage in &config.stages {
        for step in &stage.steps {
            let StepSpec::Modules {
                label, candidates, ..
            } = step
            else {
                continue;
            };
            for spec in candidates {
                let capability = steps::candidate(ctx, spec);
                results.push(ProbeResult {
                    stage: stage.name.clone(),
                    group: label.clone(),
                    name: spec.name.clone(),
                    available: capability.is_available().map_err(|e| format!("{e:#}")),
                });
            }
        }
    }
    results
}

/// Probe and list every candidate grouped by stage and group.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log.as_ref())?;
    let ctx = Context::new(
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
        true,
    );

    let results = probe_all(&ctx, &setup.config);
    if results.is_empty() {
        log.info("no module groups configured");
        return Ok(());
    }

    let mut current: Option<(&str, &str)> = None;
    for result in &results {
        let key = (result.stage.as_str(), result.group.as_str());
        if current != Some(key) {
            log.stage(&format!("{} / {}", result.stage, result.group));
            current = Some(key);
        }
        log.info(&result.line());
    }

    let available = results.iter().filter(|r| matches!(r.available, Ok(true))).count();
    let errors = results.iter().filter(|r| r.available.is_err()).count();
    log.info(&format!(
        "{available} of {} candidates available",
        results.len()
    ));
    if errors > 0 {
        log.warn(&format!("{errors} probe(s) could not be completed"));
    }
    Ok(())
}
