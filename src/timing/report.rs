//! Console rendering of section and step durations.
use std::time::Duration;

use super::thresholds::ThresholdTable;

/// Column width that section names are padded to.
pub const NAME_WIDTH: usize = 24;

/// Indentation applied to step lines.
const STEP_INDENT: usize = 4;

/// How timing results are presented for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    /// One line per stopped section.
    #[default]
    Summary,
    /// A line for every recorded step as it happens, plus section lines
    /// annotated with their step count.
    Detailed,
}

impl Presentation {
    /// Select the presentation for a verbosity flag.
    #[must_use]
    pub const fn from_verbose(verbose: bool) -> Self {
        if verbose { Self::Detailed } else { Self::Summary }
    }

    /// Whether step lines are emitted.
    #[must_use]
    pub const fn shows_steps(self) -> bool {
        matches!(self, Self::Detailed)
    }
}

/// Duration in fractional milliseconds.
#[must_use]
pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Render the line emitted when a section stops.
#[must_use]
pub fn section_line(
    name: &str,
    elapsed: Duration,
    steps: usize,
    presentation: Presentation,
    table: &ThresholdTable,
) -> String {
    let ms = duration_ms(elapsed);
    let text = match presentation {
        Presentation::Summary => format!("{name:<NAME_WIDTH$} Done in {ms:.0} ms"),
        Presentation::Detailed => {
            let noun = if steps == 1 { "step" } else { "steps" };
            format!("{name:<NAME_WIDTH$} Done in {ms:.0} ms ({steps} {noun})")
        }
    };
    table.categorize(ms).paint(&text)
}

/// Render the line emitted for a single step.
#[must_use]
pub fn step_line(label: &str, elapsed: Duration, table: &ThresholdTable) -> String {
    let ms = duration_ms(elapsed);
    let width = NAME_WIDTH.saturating_sub(STEP_INDENT);
    let indent = " ".repeat(STEP_INDENT);
    table
        .categorize(ms)
        .paint(&format!("{indent}{label:<width$} Step took {ms:.0} ms"))
}
