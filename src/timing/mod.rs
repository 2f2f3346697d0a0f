//! Named hierarchical timers with colourised duration reporting.
//!
//! A [`TimerRegistry`] holds named sections; each section can carry an
//! ordered list of measured steps.  Stopping a section or recording a step
//! emits a console line coloured through a [`ThresholdTable`].
mod clock;
mod registry;
mod report;
mod thresholds;

pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{Step, TimerRegistry, TimerSection};
pub use report::{NAME_WIDTH, Presentation, duration_ms, section_line, step_line};
pub use thresholds::{Category, Threshold, ThresholdTable};
