//! `shellboot` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use shellboot::cli::{Cli, Command};
use shellboot::commands;
use shellboot::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match &args.command {
        Command::Completions(opts) => {
            commands::completions::run(opts.shell);
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        _ => {}
    }

    init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(Logger::new(args.command.name()));

    match args.command {
        Command::Run => commands::run::run(&args.global, args.verbose, &log),
        Command::Check => commands::check::run(&args.global, &log),
        Command::Thresholds => commands::thresholds::run(&args.global, &log),
        Command::Validate => commands::validate::run(&args.global, &log),
        Command::Completions(_) | Command::Version => Ok(()),
    }
}
