//! Named-section stopwatch store with nested step timers.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::report::{Presentation, duration_ms, section_line, step_line};
use super::thresholds::{Category, ThresholdTable};
use crate::logging::Log;

/// One measured sub-operation within a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    label: String,
    elapsed: Duration,
}

impl Step {
    /// Step label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wall-clock time the step took.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed)
    }
}

/// One named measurement interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSection {
    name: String,
    start: Duration,
    end: Option<Duration>,
    steps: Vec<Step>,
}

impl TimerSection {
    fn started(name: &str, start: Duration) -> Self {
        Self {
            name: name.to_string(),
            start,
            end: None,
            steps: Vec::new(),
        }
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clock reading when the section was (last) started.
    #[must_use]
    pub const fn start(&self) -> Duration {
        self.start
    }

    /// Clock reading when the section was stopped, if it has been.
    #[must_use]
    pub const fn end(&self) -> Option<Duration> {
        self.end
    }

    /// `end - start`, once stopped.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end.saturating_sub(self.start))
    }

    /// Whether the section is still open.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Steps recorded while the section was open, in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Process-local store of named timer sections.
///
/// Owned by whoever drives a bootstrap run; nothing here is global.
/// Bookkeeping never fails: stopping an unknown section or recording a step
/// against one is silently ignored.  Only the measured actions themselves
/// can fail, and their results are handed back untouched.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use shellboot::logging::BufferedLog;
/// use shellboot::timing::{ManualClock, TimerRegistry};
///
/// let clock = ManualClock::new();
/// let log = Arc::new(BufferedLog::new());
/// let mut timers = TimerRegistry::new(log.clone()).with_clock(Arc::new(clock.clone()));
///
/// timers.start_section("Setup");
/// timers.record_step("Setup", "Load A", || clock.advance_ms(120));
/// let elapsed = timers.stop_section("Setup");
///
/// assert_eq!(elapsed.map(|d| d.as_millis()), Some(120));
/// assert!(log.contains("Done in 120 ms"));
/// ```
pub struct TimerRegistry {
    sections: HashMap<String, TimerSection>,
    order: Vec<String>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    presentation: Presentation,
    thresholds: ThresholdTable,
}

impl std::fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("sections", &self.order)
            .field("clock", &self.clock)
            .field("log", &"<dyn Log>")
            .field("presentation", &self.presentation)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl TimerRegistry {
    /// Create an empty registry reporting into `log`, using the system
    /// clock, summary presentation and the default threshold table.
    #[must_use]
    pub fn new(log: Arc<dyn Log>) -> Self {
        Self {
            sections: HashMap::new(),
            order: Vec::new(),
            clock: Arc::new(SystemClock::new()),
            log,
            presentation: Presentation::default(),
            thresholds: ThresholdTable::default(),
        }
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Select the presentation mode for the whole run.
    #[must_use]
    pub const fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    /// Replace the threshold table used to colour durations.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Active presentation mode.
    #[must_use]
    pub const fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Active threshold table.
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Start (or restart) the section `name`.
    ///
    /// Any previous section with the same name is discarded along with its
    /// end time and steps.
    pub fn start_section(&mut self, name: &str) {
        let now = self.clock.now();
        if self
            .sections
            .insert(name.to_string(), TimerSection::started(name, now))
            .is_none()
        {
            self.order.push(name.to_string());
        }
    }

    /// Stop the section `name`, emit its duration line, and return the
    /// duration.
    ///
    /// Returns `None` without creating anything when the section was never
    /// started.  Stopping an already stopped section returns its recorded
    /// duration and leaves the end time untouched.
    pub fn stop_section(&mut self, name: &str) -> Option<Duration> {
        let now = self.clock.now();
        let Some(section) = self.sections.get_mut(name) else {
            self.log
                .debug(&format!("timer: stop for unknown section '{name}' ignored"));
            return None;
        };
        if !section.is_running() {
            return section.duration();
        }
        section.end = Some(now);
        let elapsed = section.duration().unwrap_or_default();
        let line = section_line(
            name,
            elapsed,
            section.steps.len(),
            self.presentation,
            &self.thresholds,
        );
        self.log.info(&line);
        Some(elapsed)
    }

    /// Run `action`, measure it, and record it as a step of `section`.
    ///
    /// The value returned by `action` is passed straight back, so a failing
    /// action returning `Err` surfaces to the caller unchanged.  When the
    /// section is unknown or already stopped the measurement is dropped.
    pub fn record_step<T>(&mut self, section: &str, label: &str, action: impl FnOnce() -> T) -> T {
        let before = self.clock.now();
        let result = action();
        let elapsed = self.clock.now().saturating_sub(before);

        match self.sections.get_mut(section) {
            Some(s) if s.is_running() => s.steps.push(Step {
                label: label.to_string(),
                elapsed,
            }),
            _ => self.log.debug(&format!(
                "timer: step '{label}' dropped, section '{section}' is not running"
            )),
        }

        if self.presentation.shows_steps() {
            let line = step_line(label, elapsed, &self.thresholds);
            self.log.info(&line);
        }
        result
    }

    /// Map a duration in milliseconds to its display category.
    #[must_use]
    pub fn format_duration(&self, ms: f64) -> Category {
        self.thresholds.categorize(ms)
    }

    /// Look up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&TimerSection> {
        self.sections.get(name)
    }

    /// All sections in the order their names were first started.
    pub fn sections(&self) -> impl Iterator<Item = &TimerSection> {
        self.order.iter().filter_map(|n| self.sections.get(n))
    }

    /// Number of distinct section names held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section has been started.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
