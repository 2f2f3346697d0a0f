//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the shell bootstrapper.
#[derive(Parser, Debug)]
#[command(
    name = "shellboot",
    about = "Timed, fault-tolerant interactive shell startup",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Show step timings and debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Profile file (default: $SHELLBOOT_CONFIG, then
    /// ~/.config/shellboot/profile.toml, then the built-in profile)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log commands and file writes instead of performing them
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bootstrap stages
    Run,
    /// Probe every module candidate without activating anything
    Check,
    /// Print the duration threshold table
    Thresholds,
    /// Load the profile and report configuration warnings
    Validate,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Check => "check",
            Self::Thresholds => "thresholds",
            Self::Validate => "validate",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
