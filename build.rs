//! Build script: embeds the shellboot version string at compile time.

use std::process::Command;

fn main() {
    // Prefer SHELLBOOT_VERSION if the release workflow sets it,
    // otherwise fall back to git describe for local builds.
    if let Ok(version) = std::env::var("SHELLBOOT_VERSION") {
        println!("cargo:rustc-env=SHELLBOOT_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=SHELLBOOT_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=conf/profile.toml");
    println!("cargo:rerun-if-env-changed=SHELLBOOT_VERSION");
}
