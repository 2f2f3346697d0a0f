//! Duration-to-category mapping used to colour timing output.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Display category for a measured duration, fastest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Well under any noticeable delay.
    Fastest,
    /// Fast.
    Fast,
    /// Quick.
    Quick,
    /// Noticeable but acceptable.
    Moderate,
    /// Slow.
    Slow,
    /// Very slow.
    VerySlow,
    /// Startup is visibly impacted.
    Critical,
    /// Anything beyond the last bound.
    Extreme,
}

impl Category {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fastest => "fastest",
            Self::Fast => "fast",
            Self::Quick => "quick",
            Self::Moderate => "moderate",
            Self::Slow => "slow",
            Self::VerySlow => "very slow",
            Self::Critical => "critical",
            Self::Extreme => "extreme",
        }
    }

    /// ANSI SGR sequence used to colour text in this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Fastest => "\x1b[92m",
            Self::Fast => "\x1b[32m",
            Self::Quick => "\x1b[36m",
            Self::Moderate => "\x1b[33m",
            Self::Slow => "\x1b[35m",
            Self::VerySlow => "\x1b[91m",
            Self::Critical => "\x1b[31m",
            Self::Extreme => "\x1b[1;31m",
        }
    }

    /// Wrap `text` in this category's colour.
    #[must_use]
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}\x1b[0m", self.color())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bounded bucket: durations up to and including `up_to_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Inclusive upper bound in milliseconds.
    pub up_to_ms: f64,
    /// Category assigned to durations within this bound.
    pub category: Category,
}

impl Threshold {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(up_to_ms: f64, category: Category) -> Self {
        Self { up_to_ms, category }
    }
}

/// Serialized shape of a [`ThresholdTable`], validated on conversion.
#[derive(Debug, Clone, Deserialize)]
struct RawThresholdTable {
    #[serde(default)]
    bounds: Vec<Threshold>,
    #[serde(default = "default_overflow")]
    overflow: Category,
}

const fn default_overflow() -> Category {
    Category::Extreme
}

/// Ascending duration bounds terminated by an unbounded overflow bucket.
///
/// Every non-negative duration maps to exactly one category: the category of
/// the first bound that is `>=` the duration, or `overflow` when none is.
///
/// # Examples
///
/// ```
/// use shellboot::timing::{Category, ThresholdTable};
///
/// let table = ThresholdTable::default();
/// assert_eq!(table.categorize(25.0), Category::Fastest);
/// assert_eq!(table.categorize(150.0), Category::Moderate);
/// assert_eq!(table.categorize(10_000.0), Category::Extreme);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholdTable")]
pub struct ThresholdTable {
    bounds: Vec<Threshold>,
    overflow: Category,
}

impl ThresholdTable {
    /// Build a table, checking that bounds are finite, non-negative and
    /// strictly ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThresholds`] when the bounds violate
    /// those rules.
    pub fn new(bounds: Vec<Threshold>, overflow: Category) -> Result<Self, ConfigError> {
        let mut previous: Option<f64> = None;
        for bound in &bounds {
            if !bound.up_to_ms.is_finite() || bound.up_to_ms < 0.0 {
                return Err(ConfigError::InvalidThresholds(format!(
                    "bound {} for '{}' must be a finite, non-negative number",
                    bound.up_to_ms, bound.category
                )));
            }
            if let Some(prev) = previous
                && bound.up_to_ms <= prev
            {
                return Err(ConfigError::InvalidThresholds(format!(
                    "bound {} for '{}' is not greater than the previous bound {prev}",
                    bound.up_to_ms, bound.category
                )));
            }
            previous = Some(bound.up_to_ms);
        }
        Ok(Self { bounds, overflow })
    }

    /// Map a duration in milliseconds to its display category.
    #[must_use]
    pub fn categorize(&self, ms: f64) -> Category {
        self.bounds
            .iter()
            .find(|b| ms <= b.up_to_ms)
            .map_or(self.overflow, |b| b.category)
    }

    /// Bounded buckets in ascending order.
    #[must_use]
    pub fn bounds(&self) -> &[Threshold] {
        &self.bounds
    }

    /// Category for durations beyond the last bound.
    #[must_use]
    pub const fn overflow(&self) -> Category {
        self.overflow
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            bounds: vec![
                Threshold::new(25.0, Category::Fastest),
                Threshold::new(50.0, Category::Fast),
                Threshold::new(100.0, Category::Quick),
                Threshold::new(200.0, Category::Moderate),
                Threshold::new(500.0, Category::Slow),
                Threshold::new(1000.0, Category::VerySlow),
                Threshold::new(2000.0, Category::Critical),
            ],
            overflow: Category::Extreme,
        }
    }
}

impl TryFrom<RawThresholdTable> for ThresholdTable {
    type Error = ConfigError;

    fn try_from(raw: RawThresholdTable) -> Result<Self, Self::Error> {
        Self::new(raw.bounds, raw.overflow)
    }
}
