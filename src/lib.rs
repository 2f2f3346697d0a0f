//! Instrumented interactive-shell bootstrap.
//!
//! Runs a profile of named stages (environment setup, script loading,
//! optional module activation, prompt integration) under a timer registry,
//! printing how long each stage and step took, coloured by a threshold
//! table.  Optional modules are tried best-effort: a missing or broken one is
//! logged and skipped, never fatal.
//!
//! The public API is organised into layers:
//!
//! - **[`timing`]** - named sections, nested steps, duration categories
//! - **[`loader`]** - guarded activation of optional capabilities in groups
//! - **[`config`]** - TOML profile loading and validation
//! - **[`bootstrap`]** - the staged run wiring the above together
//! - **[`commands`]** - top-level subcommand orchestration (`run`, `check`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod loader;
pub mod logging;
pub mod timing;
