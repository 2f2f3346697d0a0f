// Shared helpers for integration tests.
//
// Provides a temporary home directory with a profile file, and a scripted
// executor so bootstrap runs never touch real programs.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use shellboot::bootstrap::Context;
use shellboot::config::Config;
use shellboot::exec::{ExecResult, Executor};
use shellboot::logging::{BufferedLog, Log};
use shellboot::timing::ManualClock;

/// Executor that answers from a script instead of spawning processes.
///
/// Every `run` advances the shared clock by `run_ms` and is recorded as
/// `"<program> <args...>"`.  Programs listed in `failing` exit non-zero;
/// `which` answers from `on_path`.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    pub on_path: HashSet<String>,
    pub failing: HashSet<String>,
    pub run_ms: u64,
    pub clock: ManualClock,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            run_ms: 10,
            ..Self::default()
        }
    }

    pub fn on_path(mut self, programs: &[&str]) -> Self {
        self.on_path
            .extend(programs.iter().map(ToString::to_string));
        self
    }

    pub fn failing(mut self, programs: &[&str]) -> Self {
        self.failing
            .extend(programs.iter().map(ToString::to_string));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<ExecResult> {
        let result = self.run_unchecked(program, args)?;
        if !result.success {
            bail!("{program} failed (exit 1): {}", result.stderr);
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[String]) -> Result<ExecResult> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().expect("calls lock").push(line);
        self.clock.advance_ms(self.run_ms);
        if self.failing.contains(program) {
            return Ok(ExecResult {
                stderr: "scripted failure".to_string(),
                success: false,
                code: Some(1),
                ..ExecResult::default()
            });
        }
        Ok(ExecResult::ok(""))
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.contains(program)
    }
}

/// An isolated home directory with an optional profile file.
pub struct IntegrationTestContext {
    /// Temporary directory standing in for `$HOME`.
    pub home: tempfile::TempDir,
    pub clock: ManualClock,
    pub log: Arc<BufferedLog>,
}

impl IntegrationTestContext {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
            clock: ManualClock::new(),
            log: Arc::new(BufferedLog::new()),
        }
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Path of the profile written by [`Self::write_profile`].
    pub fn profile_path(&self) -> PathBuf {
        self.home.path().join("profile.toml")
    }

    pub fn write_profile(&self, content: &str) -> PathBuf {
        let path = self.profile_path();
        std::fs::write(&path, content).expect("write profile");
        path
    }

    /// Load the profile written by [`Self::write_profile`].
    pub fn load_config(&self) -> Config {
        Config::from_file(&self.profile_path()).expect("load profile")
    }

    /// A bootstrap context wired to the shared log and clock.
    pub fn bootstrap_context(&self, executor: Arc<dyn Executor>, dry_run: bool) -> Context {
        Context::new(Arc::clone(&self.log) as Arc<dyn Log>, executor, dry_run)
            .with_clock(Arc::new(self.clock.clone()))
            .with_home(self.home.path())
    }

    /// Captured console lines with colour removed.
    pub fn lines(&self) -> Vec<String> {
        self.log.plain_messages()
    }
}
