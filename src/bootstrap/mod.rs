//! The staged startup sequence.
//!
//! An outer section wraps the run; every configured stage is its own timed
//! section whose steps run in order.  The first failing `run` step abandons
//! the rest of its stage, which is still stopped, timed and reported as
//! failed; the next stage runs regardless.  Module groups and `ensure_file`
//! steps never fail a stage, they only degrade it.
mod context;
mod report;
pub mod steps;

pub use context::Context;
pub use report::{BootstrapReport, StageReport};
pub use steps::EnsureFile;

use std::sync::Arc;

use crate::config::{Config, StageSpec, StepSpec};
use crate::error::StepError;
use crate::timing::{Presentation, TimerRegistry};

/// Runs a profile's stages under a timer registry.
#[derive(Debug)]
pub struct Bootstrap {
    ctx: Context,
}

impl Bootstrap {
    /// Create an engine around its collaborators.
    #[must_use]
    pub const fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// The engine's context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run every stage of `config`.
    pub fn run(&self, config: &Config, presentation: Presentation) -> BootstrapReport {
        let mut timers = TimerRegistry::new(Arc::clone(&self.ctx.log))
            .with_clock(Arc::clone(&self.ctx.clock))
            .with_presentation(presentation)
            .with_thresholds(config.thresholds.clone());

        if self.ctx.dry_run {
            self.ctx
                .log
                .info("[DRY RUN] commands and file writes are only logged");
        }

        timers.start_section(&config.overall);
        let stages = config
            .stages
            .iter()
            .map(|stage| self.run_stage(stage, &mut timers))
            .collect();
        let overall = timers.stop_section(&config.overall);

        BootstrapReport {
            overall,
            stages,
            timers,
        }
    }

    fn run_stage(&self, stage: &StageSpec, timers: &mut TimerRegistry) -> StageReport {
        self.ctx.log.stage(&stage.name);
        timers.start_section(&stage.name);

        let mut report = StageReport::new(&stage.name);
        for step in &stage.steps {
            if let Err(e) = self.run_step(&stage.name, step, timers, &mut report) {
                self.ctx.log.error(&e.to_string());
                report.error = Some(e);
                break;
            }
        }

        report.duration = timers.stop_section(&stage.name);
        report.settle(stage.steps.len(), self.ctx.dry_run);
        self.ctx
            .log
            .record_stage(&stage.name, report.status, report.message().as_deref());
        report
    }

    fn run_step(
        &self,
        stage: &str,
        step: &StepSpec,
        timers: &mut TimerRegistry,
        report: &mut StageReport,
    ) -> Result<(), StepError> {
        let ctx = &self.ctx;
        match step {
            StepSpec::Run {
                label,
                program,
                args,
            } => timers
                .record_step(stage, label, || steps::run_command(ctx, program, args))
                .map_err(|e| StepError {
                    stage: stage.to_string(),
                    label: label.clone(),
                    source: e.into(),
                }),
            StepSpec::Modules {
                label,
                stop_on_first_success,
                candidates,
            } => {
                let group = steps::module_group(ctx, label, *stop_on_first_success, candidates);
                let outcome = group.run_timed(ctx.log.as_ref(), ctx.dry_run, timers, stage);
                report
                    .warnings
                    .extend(outcome.failures().map(ToString::to_string));
                report.groups.push(outcome);
                Ok(())
            }
            StepSpec::EnsureFile {
                label,
                path,
                contents,
            } => {
                let written =
                    timers.record_step(stage, label, || steps::ensure_file(ctx, path, contents));
                if let Err(e) = written {
                    let message = format!("{label}: {e:#}");
                    ctx.log.warn(&message);
                    report.warnings.push(message);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::CandidateSpec;
    use crate::exec::{ExecResult, MockExecutor};
    use crate::logging::{BufferedLog, Log, LogEntry, StageStatus};
    use crate::timing::ManualClock;
    use std::time::Duration;

    fn run(label: &str, script: &str) -> StepSpec {
        StepSpec::Run {
            label: label.into(),
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
        }
    }

    fn modules(label: &str, stop: bool, names: &[&str]) -> StepSpec {
        StepSpec::Modules {
            label: label.into(),
            stop_on_first_success: stop,
            candidates: names
                .iter()
                .map(|n| CandidateSpec {
                    name: (*n).into(),
                    probe: None,
                    probe_command: None,
                    activate: Some(vec![(*n).into(), "init".into()]),
                })
                .collect(),
        }
    }

    fn config(stages: Vec<(&str, Vec<StepSpec>)>) -> Config {
        Config {
            stages: stages
                .into_iter()
                .map(|(name, steps)| StageSpec {
                    name: name.into(),
                    steps,
                })
                .collect(),
            ..Config::default()
        }
    }

    /// Executor where each `sh -c <script>` advances the clock by 10 ms and
    /// fails when the script is `exit 1`; modules named in `present` are on
    /// PATH and activate successfully unless named `broken`.
    fn executor(clock: &ManualClock, present: &'static [&'static str]) -> MockExecutor {
        let mut exec = MockExecutor::new();
        let tick = clock.clone();
        exec.expect_run().returning(move |program, args| {
            tick.advance_ms(10);
            if program == "broken" {
                anyhow::bail!("broken failed (exit 1): corrupt module");
            }
            if args.last().is_some_and(|a| a == "exit 1") {
                anyhow::bail!("sh failed (exit 1): ");
            }
            Ok(ExecResult::ok(""))
        });
        exec.expect_which()
            .returning(move |program| present.contains(&program));
        exec
    }

    fn engine(
        exec: MockExecutor,
        clock: &ManualClock,
        dry_run: bool,
    ) -> (Bootstrap, Arc<BufferedLog>) {
        let log = Arc::new(BufferedLog::new());
        let ctx = Context::new(Arc::clone(&log) as Arc<dyn Log>, Arc::new(exec), dry_run)
            .with_clock(Arc::new(clock.clone()));
        (Bootstrap::new(ctx), log)
    }

    #[test]
    fn stages_run_in_order_inside_overall() {
        let clock = ManualClock::new();
        let (engine, log) = engine(executor(&clock, &[]), &clock, false);
        let cfg = config(vec![
            ("Environment", vec![run("a", "true")]),
            ("Custom scripts", vec![run("b", "true"), run("c", "true")]),
        ]);

        let report = engine.run(&cfg, Presentation::Summary);

        assert_eq!(report.overall, Some(Duration::from_millis(30)));
        assert_eq!(report.stages[0].duration, Some(Duration::from_millis(10)));
        assert_eq!(report.stages[1].duration, Some(Duration::from_millis(20)));
        let names: Vec<&str> = report.timers.sections().map(|s| s.name()).collect();
        assert_eq!(names, ["Overall", "Environment", "Custom scripts"]);
        assert!(!report.has_failures());
        assert!(log.contains("Overall                  Done in 30 ms"));
    }

    #[test]
    fn failing_step_aborts_only_its_stage() {
        let clock = ManualClock::new();
        let (engine, log) = engine(executor(&clock, &[]), &clock, false);
        let cfg = config(vec![
            ("Environment", vec![run("ok", "true"), run("bad", "exit 1"), run("never", "true")]),
            ("Prompt", vec![run("after", "true")]),
        ]);

        let report = engine.run(&cfg, Presentation::Detailed);

        let env = &report.stages[0];
        assert_eq!(env.status, StageStatus::Failed);
        assert_eq!(env.error.as_ref().unwrap().label, "bad");
        // The failing step is still measured; the one after it never runs
        let steps = report.timers.section("Environment").unwrap().steps();
        let labels: Vec<&str> = steps.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["ok", "bad"]);
        assert!(!report.timers.section("Environment").unwrap().is_running());

        assert_eq!(report.stages[1].status, StageStatus::Ok);
        assert!(report.has_failures());
        assert_eq!(report.failed_stages().count(), 1);
        assert_eq!(log.stages()[0].status, StageStatus::Failed);
    }

    #[test]
    fn module_failures_degrade_without_failing() {
        let clock = ManualClock::new();
        let (engine, _log) = engine(executor(&clock, &["broken", "starship"]), &clock, false);
        let cfg = config(vec![(
            "Prompt",
            vec![modules("engine", true, &["broken", "oh-my-posh", "starship", "never"])],
        )]);

        let report = engine.run(&cfg, Presentation::Detailed);

        let prompt = &report.stages[0];
        assert_eq!(prompt.status, StageStatus::Degraded);
        let group = &prompt.groups[0];
        assert_eq!(group.activated(), ["starship"]);
        assert_eq!(group.unavailable(), ["oh-my-posh"]);
        assert_eq!(group.skipped, ["never"]);
        assert!(prompt.message().unwrap().contains("corrupt module"));

        let labels: Vec<&str> = report
            .timers
            .section("Prompt")
            .unwrap()
            .steps()
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(labels, ["engine/broken", "engine/oh-my-posh", "engine/starship"]);
    }

    #[test]
    fn ensure_file_failure_degrades() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blocker"), "").unwrap();
        let clock = ManualClock::new();
        let (engine, log) = engine(executor(&clock, &[]), &clock, false);
        let engine = Bootstrap::new(Context {
            home: Some(dir.path().to_path_buf()),
            ..engine.ctx
        });
        let cfg = config(vec![(
            "Prompt",
            vec![
                StepSpec::EnsureFile {
                    label: "theme".into(),
                    path: "~/blocker/theme.json".into(),
                    contents: "{}".into(),
                },
                run("after", "true"),
            ],
        )]);

        let report = engine.run(&cfg, Presentation::Summary);

        assert_eq!(report.stages[0].status, StageStatus::Degraded);
        assert_eq!(report.timers.section("Prompt").unwrap().steps().len(), 2);
        assert!(
            log.entries()
                .iter()
                .any(|e| matches!(e, LogEntry::Warn(m) if m.starts_with("theme:")))
        );
    }

    #[test]
    fn dry_run_executes_nothing() {
        let clock = ManualClock::new();
        let mut exec = MockExecutor::new();
        exec.expect_run().never();
        exec.expect_which().returning(|_| true);
        let (engine, log) = engine(exec, &clock, true);
        let cfg = config(vec![
            ("Environment", vec![run("a", "exit 1")]),
            ("Prompt", vec![modules("engine", true, &["oh-my-posh", "starship"])]),
        ]);

        let report = engine.run(&cfg, Presentation::Summary);

        assert!(report.stages.iter().all(|s| s.status == StageStatus::DryRun));
        assert_eq!(report.stages[1].groups[0].activated(), ["oh-my-posh"]);
        assert!(log.contains("would run: sh -c exit 1"));
    }

    #[test]
    fn empty_stage_is_reported_empty() {
        let clock = ManualClock::new();
        let (engine, _log) = engine(executor(&clock, &[]), &clock, false);
        let report = engine.run(&config(vec![("Nothing", vec![])]), Presentation::Summary);
        assert_eq!(report.stages[0].status, StageStatus::Empty);
        assert_eq!(report.stages[0].duration, Some(Duration::ZERO));
    }

    #[test]
    fn repeated_stage_name_restarts_its_section() {
        let clock = ManualClock::new();
        let (engine, _log) = engine(executor(&clock, &[]), &clock, false);
        let cfg = config(vec![
            ("Twice", vec![run("a", "true"), run("b", "true")]),
            ("Twice", vec![run("c", "true")]),
        ]);
        let report = engine.run(&cfg, Presentation::Summary);
        let section = report.timers.section("Twice").unwrap();
        assert_eq!(section.steps().len(), 1);
        assert_eq!(section.duration(), Some(Duration::from_millis(10)));
        assert_eq!(report.timers.len(), 2);
    }
}
