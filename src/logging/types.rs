//! Core logging types: stage entries, status, and the [`Log`] trait.

/// Stage result for summary reporting.
#[derive(Debug, Clone)]
pub struct StageEntry {
    /// Stage name as declared in the profile.
    pub name: String,
    /// Final status of the stage.
    pub status: StageStatus,
    /// Optional detail message (e.g., the failing step).
    pub message: Option<String>,
}

/// Status of a completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Every step completed.
    Ok,
    /// Every step completed but some optional work was absorbed
    /// (a module failed to activate, a file could not be written).
    Degraded,
    /// The stage had no steps to run.
    Empty,
    /// Ran in dry-run mode; nothing was executed.
    DryRun,
    /// A step failed and the rest of the stage was abandoned.
    Failed,
}

impl StageStatus {
    /// Every status, in summary order.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::Degraded,
        Self::Empty,
        Self::DryRun,
        Self::Failed,
    ];

    /// Icon and ANSI colour used in the run summary.
    #[must_use]
    pub const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Degraded => ("!", "\x1b[33m"),
            Self::Empty => ("·", "\x1b[2m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }

    /// Lower-case name used in the summary totals.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Empty => "empty",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

/// Abstraction over logging backends.
///
/// Both [`Logger`](super::logger::Logger) (tracing-backed output) and
/// [`BufferedLog`](super::buffered::BufferedLog) (in-memory capture) implement
/// this trait, so the timer registry, module loader and bootstrap never
/// depend on a concrete sink.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a stage result for the summary.
    fn record_stage(&self, name: &str, status: StageStatus, message: Option<&str>);
}
