//! In-memory logger that captures output for later inspection.
use std::sync::Mutex;

use super::types::{Log, StageEntry, StageStatus};
use super::utils::strip_ansi;

/// A single captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A stage header entry.
    Stage(String),
    /// An informational entry.
    Info(String),
    /// A debug entry.
    Debug(String),
    /// A warning entry.
    Warn(String),
    /// An error entry.
    Error(String),
    /// A dry-run entry.
    DryRun(String),
}

impl LogEntry {
    /// The message text, without its level.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Stage(m)
            | Self::Info(m)
            | Self::Debug(m)
            | Self::Warn(m)
            | Self::Error(m)
            | Self::DryRun(m) => m,
        }
    }
}

/// Implement the display methods of [`Log`] by pushing each message into
/// `self.entries` as the corresponding [`LogEntry`] variant.
macro_rules! buffer_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry::$variant(msg.to_string()));
                }
            }
        )+
    };
}

/// Logger that keeps every message in memory.
///
/// Stands in for the real [`Logger`](super::logger::Logger) wherever a
/// caller needs to assert on exactly what a component emitted.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
    stages: Mutex<Vec<StageEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Captured messages with ANSI colour codes removed.
    #[must_use]
    pub fn plain_messages(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|e| strip_ansi(e.message()))
            .collect()
    }

    /// Captured stage results.
    #[must_use]
    pub fn stages(&self) -> Vec<StageEntry> {
        self.stages.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Whether any captured message contains `needle` (ANSI ignored).
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.plain_messages().iter().any(|m| m.contains(needle))
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage   => Stage,
        info    => Info,
        debug   => Debug,
        warn    => Warn,
        error   => Error,
        dry_run => DryRun,
    }

    fn record_stage(&self, name: &str, status: StageStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.stages.lock() {
            guard.push(StageEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn captures_entries_in_order() {
        let log = BufferedLog::new();
        log.stage("one");
        log.info("two");
        log.warn("three");
        assert_eq!(
            log.entries(),
            vec![
                LogEntry::Stage("one".to_string()),
                LogEntry::Info("two".to_string()),
                LogEntry::Warn("three".to_string()),
            ]
        );
    }

    #[test]
    fn plain_messages_strip_colors() {
        let log = BufferedLog::new();
        log.info("\x1b[32mgreen\x1b[0m");
        assert_eq!(log.plain_messages(), vec!["green".to_string()]);
        assert!(log.contains("green"));
    }

    #[test]
    fn record_stage_is_captured() {
        let log = BufferedLog::new();
        log.record_stage("Prompt", StageStatus::Failed, Some("boom"));
        let stages = log.stages();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].status, StageStatus::Failed);
        assert_eq!(stages[0].message.as_deref(), Some("boom"));
    }
}
