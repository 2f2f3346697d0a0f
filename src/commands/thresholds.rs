//! Command: print the active duration threshold table.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::timing::ThresholdTable;

use super::CommandSetup;

/// Render one coloured line per bucket, ending with the overflow bucket.
#[must_use]
pub fn render(table: &ThresholdTable) -> Vec<String> {
    let mut lines: Vec<String> = table
        .bounds()
        .iter()
        .map(|b| {
            b.category
                .paint(&format!("{:<10} <= {} ms", b.category.label(), b.up_to_ms))
        })
        .collect();
    let last = table.bounds().last().map_or(0.0, |b| b.up_to_ms);
    let overflow = table.overflow();
    lines.push(overflow.paint(&format!("{:<10} >  {last} ms", overflow.label())));
    lines
}

/// Print the threshold table of the resolved profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    log.stage("Duration thresholds");
    for line in render(&setup.config.thresholds) {
        log.info(&line);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::strip_ansi;
    use crate::timing::{Category, Threshold};

    #[test]
    fn default_table_renders_every_bucket() {
        let lines: Vec<String> = render(&ThresholdTable::default())
            .iter()
            .map(|l| strip_ansi(l))
            .collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        fastest    <= 25 ms
        fast       <= 50 ms
        quick      <= 100 ms
        moderate   <= 200 ms
        slow       <= 500 ms
        very slow  <= 1000 ms
        critical   <= 2000 ms
        extreme    >  2000 ms
        ");
    }

    #[test]
    fn lines_are_coloured_by_category() {
        let bounds = vec![Threshold::new(10.0, Category::Fast)];
        let table = ThresholdTable::new(bounds, Category::Slow).unwrap();
        let lines = render(&table);
        assert!(lines[0].starts_with(Category::Fast.color()));
        assert!(lines[1].starts_with(Category::Slow.color()));
    }

    #[test]
    fn empty_table_is_all_overflow() {
        let table = ThresholdTable::new(vec![], Category::Quick).unwrap();
        let lines = render(&table);
        assert_eq!(lines.len(), 1);
        assert_eq!(strip_ansi(&lines[0]), "quick      >  0 ms");
    }
}
