//! Per-stage and whole-run results.
use std::time::Duration;

use crate::error::StepError;
use crate::loader::GroupReport;
use crate::logging::StageStatus;
use crate::timing::TimerRegistry;

/// How one stage went.
#[derive(Debug)]
pub struct StageReport {
    /// Stage name.
    pub name: String,
    /// Final status.
    pub status: StageStatus,
    /// Measured duration of the stage's section.
    pub duration: Option<Duration>,
    /// Reports of the module groups the stage ran.
    pub groups: Vec<GroupReport>,
    /// Absorbed problems (module failures, unwritable files).
    pub warnings: Vec<String>,
    /// The step failure that ended the stage early, if any.
    pub error: Option<StepError>,
}

impl StageReport {
    pub(super) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StageStatus::Ok,
            duration: None,
            groups: Vec::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Derive the status from what happened.
    pub(super) fn settle(&mut self, step_count: usize, dry_run: bool) {
        self.status = if self.error.is_some() {
            StageStatus::Failed
        } else if !self.warnings.is_empty() {
            StageStatus::Degraded
        } else if step_count == 0 {
            StageStatus::Empty
        } else if dry_run {
            StageStatus::DryRun
        } else {
            StageStatus::Ok
        };
    }

    /// One-line detail for the run summary.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.status {
            StageStatus::Failed => self.error.as_ref().map(ToString::to_string),
            StageStatus::Degraded => Some(self.warnings.join("; ")),
            StageStatus::Ok | StageStatus::DryRun => {
                let loaded: Vec<&str> =
                    self.groups.iter().flat_map(GroupReport::activated).collect();
                (!loaded.is_empty()).then(|| format!("loaded: {}", loaded.join(", ")))
            }
            StageStatus::Empty => None,
        }
    }
}

/// Result of a complete bootstrap run.
#[derive(Debug)]
pub struct BootstrapReport {
    /// Duration of the overall section.
    pub overall: Option<Duration>,
    /// Per-stage results in run order.
    pub stages: Vec<StageReport>,
    /// The timer registry with every section and step of the run.
    pub timers: TimerRegistry,
}

impl BootstrapReport {
    /// Stages that ended with a failed step.
    pub fn failed_stages(&self) -> impl Iterator<Item = &StageReport> {
        self.stages
            .iter()
            .filter(|s| s.status == StageStatus::Failed)
    }

    /// Whether any stage failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_stages().next().is_some()
    }

    /// Look up a stage by name (the last one, if names repeat).
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().rev().find(|s| s.name == name)
    }
}
