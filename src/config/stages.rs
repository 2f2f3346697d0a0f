//! Stage and step definitions as they appear in the profile.
use serde::Deserialize;

use crate::loader::Probe;

/// A named stage: one timed section of the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageSpec {
    /// Section name; also the stage name in the summary.
    pub name: String,
    /// Steps run in order inside the section.
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

/// One step of a stage, tagged by `kind` in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum StepSpec {
    /// Run an external command; a non-zero exit fails the step.
    Run {
        /// Step label.
        label: String,
        /// Program to execute.
        program: String,
        /// Program arguments.
        #[serde(default)]
        args: Vec<String>,
    },
    /// Activate a group of optional modules.
    Modules {
        /// Step label; also the group label.
        label: String,
        /// Treat candidates as alternatives.
        #[serde(default)]
        stop_on_first_success: bool,
        /// Candidates, in order of preference.
        #[serde(default)]
        candidates: Vec<CandidateSpec>,
    },
    /// Write `contents` to `path` unless the file already exists.
    EnsureFile {
        /// Step label.
        label: String,
        /// Target path; a leading `~` is the home directory.
        path: String,
        /// File contents.
        contents: String,
    },
}

impl StepSpec {
    /// The step label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Run { label, .. }
            | Self::Modules { label, .. }
            | Self::EnsureFile { label, .. } => label,
        }
    }

    /// The `kind` tag as written in TOML.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Run { .. } => "run",
            Self::Modules { .. } => "modules",
            Self::EnsureFile { .. } => "ensure_file",
        }
    }
}

/// A module candidate inside a `modules` step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateSpec {
    /// Candidate name.
    pub name: String,
    /// Program looked up on `PATH`; defaults to `name`.
    #[serde(default)]
    pub probe: Option<String>,
    /// Command whose successful exit means "available". Takes precedence
    /// over `probe`.
    #[serde(default)]
    pub probe_command: Option<Vec<String>>,
    /// Command run to activate the module; absent means probe only.
    #[serde(default)]
    pub activate: Option<Vec<String>>,
}

impl CandidateSpec {
    /// The availability probe this candidate uses.
    #[must_use]
    pub fn probe(&self) -> Probe {
        match (&self.probe_command, &self.probe) {
            (Some(argv), _) => Probe::Command(argv.clone()),
            (None, Some(program)) => Probe::OnPath(program.clone()),
            (None, None) => Probe::OnPath(self.name.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        stages: Vec<StageSpec>,
    }

    fn parse(toml_str: &str) -> Vec<StageSpec> {
        toml::from_str::<Wrapper>(toml_str).unwrap().stages
    }

    #[test]
    fn parses_every_step_kind() {
        let stages = parse(
            r#"
            [[stages]]
            name = "Environment"

            [[stages.steps]]
            kind = "run"
            label = "Print shell"
            program = "sh"
            args = ["-c", "true"]

            [[stages.steps]]
            kind = "modules"
            label = "Prompt"
            stop_on_first_success = true
            candidates = [
                { name = "oh-my-posh" },
                { name = "starship", activate = ["starship", "init", "bash"] },
            ]

            [[stages.steps]]
            kind = "ensure_file"
            label = "Theme"
            path = "~/.config/theme.json"
            contents = "{}"
            "#,
        );

        assert_eq!(stages.len(), 1);
        let steps = &stages[0].steps;
        let kinds: Vec<&str> = steps.iter().map(StepSpec::kind).collect();
        assert_eq!(kinds, ["run", "modules", "ensure_file"]);
        assert_eq!(steps[1].label(), "Prompt");
        let StepSpec::Modules { candidates, stop_on_first_success, .. } = &steps[1] else {
            panic!("expected a modules step");
        };
        assert!(*stop_on_first_success);
        assert_eq!(candidates[1].activate.as_deref().unwrap(), ["starship", "init", "bash"]);
    }

    #[test]
    fn run_args_default_to_empty() {
        let stages = parse(
            r#"
            [[stages]]
            name = "S"
            steps = [{ kind = "run", label = "l", program = "true" }]
            "#,
        );
        assert_eq!(
            stages[0].steps[0],
            StepSpec::Run {
                label: "l".into(),
                program: "true".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = toml::from_str::<Wrapper>(
            r#"
            [[stages]]
            name = "S"
            steps = [{ kind = "teleport", label = "l" }]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn misspelled_step_key_is_rejected() {
        let result = toml::from_str::<Wrapper>(
            r#"
            [[stages]]
            name = "Prompt"

            [[stages.steps]]
            kind = "modules"
            label = "engine"
            stop_on_first_sucess = true
            candidates = [{ name = "oh-my-posh" }, { name = "starship" }]
            "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("stop_on_first_sucess"), "{err}");
    }

    #[test]
    fn candidate_probe_defaults_to_name() {
        let c = CandidateSpec {
            name: "fzf".into(),
            probe: None,
            probe_command: None,
            activate: None,
        };
        assert_eq!(c.probe(), Probe::OnPath("fzf".into()));
    }

    #[test]
    fn probe_command_takes_precedence() {
        let c = CandidateSpec {
            name: "posh-git".into(),
            probe: Some("pwsh".into()),
            probe_command: Some(vec!["pwsh".into(), "-c".into(), "exit 0".into()]),
            activate: None,
        };
        assert!(matches!(c.probe(), Probe::Command(argv) if argv.len() == 3));
    }
}
