//! Command: run the bootstrap stages.
use std::sync::Arc;

use anyhow::{Result, bail};

use crate::bootstrap::{Bootstrap, Context};
use crate::cli::GlobalOpts;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};

use super::CommandSetup;

/// Run every stage of the resolved profile, print the summary, and bail if
/// any stage failed.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or a stage failed.
pub fn run(global: &GlobalOpts, verbose: bool, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log.as_ref())?;
    let presentation = setup.config.presentation(verbose);

    let ctx = Context::new(
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
        global.dry_run,
    );
    let report = Bootstrap::new(ctx).run(&setup.config, presentation);

    log.print_summary();

    let failed = report.failed_stages().count();
    if failed > 0 {
        bail!("{failed} stage(s) failed");
    }
    Ok(())
}
