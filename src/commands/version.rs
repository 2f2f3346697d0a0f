//! Command: print version information.

/// The build version: `SHELLBOOT_VERSION` from the build, else the crate
/// version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SHELLBOOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the shellboot version to stdout.
pub fn run() {
    println!("shellboot {}", version());
}
