//! Tracing-backed logger with dry-run awareness and stage summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{Log, StageEntry, StageStatus};
use super::utils::{log_file_path, strip_ansi, terminal_columns};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_stage` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message goes through [`tracing`]; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders it on the
/// console and appends it to `$XDG_CACHE_HOME/shellboot/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    stages: Mutex<Vec<StageEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary.  The file
    /// itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            stages: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded stage entries.
    #[must_use]
    pub fn stage_entries(&self) -> Vec<StageEntry> {
        self.stages.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "shellboot::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "shellboot::dry_run", "{msg}");
    }

    /// Record a stage result for the summary.
    pub fn record_stage(&self, name: &str, status: StageStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.stages.lock() {
            guard.push(StageEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed stages.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.stages.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|s| s.status == StageStatus::Failed)
                .count()
        })
    }

    /// Print one line per recorded stage, then the totals and the log path.
    pub fn print_summary(&self) {
        let stages = self.stage_entries();
        if stages.is_empty() {
            return;
        }

        self.stage("Summary");
        for stage in &stages {
            let (icon, colour) = stage.status.marker();
            let suffix = stage
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            let line = fit_to_row(&format!("{icon} {}{suffix}", stage.name));
            self.info(&format!("{colour}{line}\x1b[0m"));
        }

        let counts: Vec<String> = StageStatus::ALL
            .iter()
            .map(|&status| {
                let n = stages.iter().filter(|s| s.status == status).count();
                format!("{}{n} {}\x1b[0m", status.marker().1, status.label())
            })
            .collect();
        self.info(&format!("{} stages: {}", stages.len(), counts.join(", ")));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

/// Truncate a summary line so it fits on one terminal row after the
/// two-column indent applied by the console formatter.
fn fit_to_row(line: &str) -> String {
    let max = terminal_columns().saturating_sub(2);
    let plain = strip_ansi(line);
    if plain.chars().count() <= max {
        return plain;
    }
    let truncated: String = plain.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_stage(&self, name: &str, status: StageStatus, message: Option<&str>) {
        self.record_stage(name, status, message);
    }
}
