//! Collaborators shared by every step of a run.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::exec::Executor;
use crate::logging::{Log, home_dir};
use crate::timing::{Clock, SystemClock};

/// Shared collaborators for one bootstrap run.
pub struct Context {
    /// Sink for stage headers, timer lines and warnings.
    pub log: Arc<dyn Log>,
    /// Runs external commands and answers PATH lookups.
    pub executor: Arc<dyn Executor>,
    /// Time source handed to the timer registry.
    pub clock: Arc<dyn Clock>,
    /// Log what would happen instead of running commands or writing files.
    pub dry_run: bool,
    /// Home directory used to expand `~` in paths.
    pub home: Option<PathBuf>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("clock", &self.clock)
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .finish()
    }
}

impl Context {
    /// Create a context using the system clock and the current user's home
    /// directory.
    #[must_use]
    pub fn new(log: Arc<dyn Log>, executor: Arc<dyn Executor>, dry_run: bool) -> Self {
        Self {
            log,
            executor,
            clock: Arc::new(SystemClock::new()),
            dry_run,
            home: home_dir(),
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the home directory.
    #[must_use]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Expand a leading `~` against the home directory.  Paths without one,
    /// or with no known home, are returned unchanged.
    #[must_use]
    pub fn expand_home(&self, path: &str) -> PathBuf {
        let Some(home) = &self.home else {
            return PathBuf::from(path);
        };
        if path == "~" {
            return home.clone();
        }
        match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
            Some(rest) => home.join(Path::new(rest)),
            None => PathBuf::from(path),
        }
    }
}
