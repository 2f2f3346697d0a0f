//! Groups of alternative or additive candidates.
use std::fmt;

use crate::error::ActivationError;
use crate::logging::Log;
use crate::timing::TimerRegistry;

use super::capability::{Activation, Capability, Outcome, try_activate};

/// Outcome of one attempted candidate.
#[derive(Debug)]
pub struct CandidateReport {
    /// Candidate name.
    pub name: String,
    /// What happened when it was attempted.
    pub outcome: Outcome,
}

/// What a [`ModuleGroup`] run did, candidate by candidate.
#[derive(Debug, Default)]
pub struct GroupReport {
    /// Group label.
    pub group: String,
    /// Candidates that were attempted, in order.
    pub attempts: Vec<CandidateReport>,
    /// Candidates never attempted because an earlier one succeeded.
    pub skipped: Vec<String>,
}

impl GroupReport {
    /// Names of candidates that activated (or would have, in a dry run).
    #[must_use]
    pub fn activated(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, Ok(o) if o.is_success()))
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Names of candidates that were not available.
    #[must_use]
    pub fn unavailable(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, Ok(Activation::NotAvailable)))
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Captured activation failures.
    pub fn failures(&self) -> impl Iterator<Item = &ActivationError> {
        self.attempts.iter().filter_map(|a| a.outcome.as_ref().err())
    }

    /// Whether any attempted candidate failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// An ordered list of candidate capabilities.
///
/// With `stop_on_first_success` the candidates are alternatives and the
/// first one that activates wins; otherwise every candidate is attempted.
/// A failing candidate never stops the group.
pub struct ModuleGroup {
    label: String,
    candidates: Vec<Box<dyn Capability>>,
    stop_on_first_success: bool,
}

impl fmt::Debug for ModuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.candidates.iter().map(|c| c.name()).collect();
        f.debug_struct("ModuleGroup")
            .field("label", &self.label)
            .field("candidates", &names)
            .field("stop_on_first_success", &self.stop_on_first_success)
            .finish()
    }
}

impl ModuleGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(label: impl Into<String>, stop_on_first_success: bool) -> Self {
        Self {
            label: label.into(),
            candidates: Vec::new(),
            stop_on_first_success,
        }
    }

    /// Append a candidate.
    #[must_use]
    pub fn with(mut self, candidate: impl Capability + 'static) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    /// Append an already boxed candidate.
    pub fn push(&mut self, candidate: Box<dyn Capability>) {
        self.candidates.push(candidate);
    }

    /// Group label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the group stops at the first successful candidate.
    #[must_use]
    pub const fn stops_on_first_success(&self) -> bool {
        self.stop_on_first_success
    }

    /// Candidate names, in order.
    pub fn candidate_names(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.name())
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the group has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Attempt the candidates.
    pub fn run(&self, log: &dyn Log, dry_run: bool) -> GroupReport {
        self.run_inner(|candidate| try_activate(candidate, log, dry_run))
    }

    /// Attempt the candidates, recording each attempt as a step of
    /// `section` labelled `<group>/<candidate>`.
    pub fn run_timed(
        &self,
        log: &dyn Log,
        dry_run: bool,
        timers: &mut TimerRegistry,
        section: &str,
    ) -> GroupReport {
        self.run_inner(|candidate| {
            let label = format!("{}/{}", self.label, candidate.name());
            timers.record_step(section, &label, || try_activate(candidate, log, dry_run))
        })
    }

    fn run_inner(&self, mut attempt: impl FnMut(&dyn Capability) -> Outcome) -> GroupReport {
        let mut report = GroupReport {
            group: self.label.clone(),
            ..GroupReport::default()
        };

        let mut candidates = self.candidates.iter();
        for candidate in candidates.by_ref() {
            let outcome = attempt(candidate.as_ref());
            let succeeded = matches!(outcome, Ok(o) if o.is_success());
            report.attempts.push(CandidateReport {
                name: candidate.name().to_string(),
                outcome,
            });
            if succeeded && self.stop_on_first_success {
                break;
            }
        }
        report.skipped = candidates.map(|c| c.name().to_string()).collect();
        report
    }
}
