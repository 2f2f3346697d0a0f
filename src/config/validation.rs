//! Profile sanity checks that produce warnings rather than errors.
use std::collections::HashSet;

use super::Config;
use super::stages::{StageSpec, StepSpec};

/// A validation warning detected while checking a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Where the problem lives (e.g., "stages", "stage 'Prompt'").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning from its parts.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// A check over some part of the profile.
pub trait ConfigValidator {
    /// Validate and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;

    /// Short name for this validator (e.g., "stages").
    #[allow(dead_code)] // Part of trait contract; implementors define it
    fn name(&self) -> &'static str;
}

/// Checks stage names against each other and the overall section.
#[derive(Debug)]
pub struct StageNameValidator<'a> {
    stages: &'a [StageSpec],
    overall: &'a str,
}

impl<'a> StageNameValidator<'a> {
    /// Validate `stages` against each other and the `overall` section name.
    #[must_use]
    pub const fn new(stages: &'a [StageSpec], overall: &'a str) -> Self {
        Self { stages, overall }
    }
}

impl ConfigValidator for StageNameValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for stage in self.stages {
            if stage.name.trim().is_empty() {
                warnings.push(ValidationWarning::new("stages", &stage.name, "stage name is empty"));
            }

            // Restarting a section replaces its earlier measurement
            if !seen.insert(stage.name.as_str()) {
                warnings.push(ValidationWarning::new(
                    "stages",
                    &stage.name,
                    "duplicate stage name; the later stage replaces the earlier timing",
                ));
            }

            if stage.name == self.overall {
                warnings.push(ValidationWarning::new(
                    "stages",
                    &stage.name,
                    "stage has the same name as the overall section",
                ));
            }

            if stage.steps.is_empty() {
                warnings.push(ValidationWarning::new("stages", &stage.name, "stage has no steps"));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "stages"
    }
}

/// Checks the steps of one stage.
#[derive(Debug)]
pub struct StepValidator<'a> {
    stage: &'a StageSpec,
}

impl<'a> StepValidator<'a> {
    /// Validate the steps of `stage`.
    #[must_use]
    pub const fn new(stage: &'a StageSpec) -> Self {
        Self { stage }
    }

    fn source(&self) -> String {
        format!("stage '{}'", self.stage.name)
    }
}

impl ConfigValidator for StepValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let source = self.source();

        for step in &self.stage.steps {
            match step {
                StepSpec::Run { label, program, .. } => {
                    if program.trim().is_empty() {
                        warnings.push(ValidationWarning::new(
                            &source,
                            label,
                            "run step has an empty program",
                        ));
                    }
                }
                StepSpec::Modules {
                    label,
                    stop_on_first_success,
                    candidates,
                } => {
                    if candidates.is_empty() {
                        warnings.push(ValidationWarning::new(
                            &source,
                            label,
                            "module group has no candidates",
                        ));
                    } else if *stop_on_first_success && candidates.len() == 1 {
                        warnings.push(ValidationWarning::new(
                            &source,
                            label,
                            "stop_on_first_success has no effect with a single candidate",
                        ));
                    }

                    for candidate in candidates {
                        let item = format!("{label}/{}", candidate.name);
                        if candidate.probe.is_some() && candidate.probe_command.is_some() {
                            warnings.push(ValidationWarning::new(
                                &source,
                                &item,
                                "both probe and probe_command set; probe is ignored",
                            ));
                        }
                        if candidate.probe_command.as_ref().is_some_and(Vec::is_empty) {
                            warnings.push(ValidationWarning::new(
                                &source,
                                &item,
                                "probe_command is empty",
                            ));
                        }
                        if candidate.activate.as_ref().is_some_and(Vec::is_empty) {
                            warnings.push(ValidationWarning::new(
                                &source,
                                &item,
                                "activate command is empty",
                            ));
                        }
                    }
                }
                StepSpec::EnsureFile { label, path, .. } => {
                    if path.trim().is_empty() {
                        warnings.push(ValidationWarning::new(
                            &source,
                            label,
                            "ensure_file step has an empty path",
                        ));
                    }
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "steps"
    }
}

/// Validate the whole profile and return collected warnings.
#[must_use]
pub fn validate_all(config: &Config) -> Vec<ValidationWarning> {
    let mut validators: Vec<Box<dyn ConfigValidator + '_>> = vec![Box::new(
        StageNameValidator::new(&config.stages, &config.overall),
    )];
    validators.extend(
        config
            .stages
            .iter()
            .map(|stage| Box::new(StepValidator::new(stage)) as Box<dyn ConfigValidator + '_>),
    );

    validators.iter().flat_map(|v| v.validate()).collect()
}
