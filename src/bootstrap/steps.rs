//! The work behind each step kind.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::CandidateSpec;
use crate::loader::{CommandCapability, ModuleGroup};

use super::Context;

/// What an `ensure_file` step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureFile {
    /// The file was missing and has been written.
    Created(PathBuf),
    /// The file already existed and was left alone.
    Exists(PathBuf),
    /// Dry run: the file is missing and would be written.
    WouldCreate(PathBuf),
}

/// Run an external command, failing on a non-zero exit.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits non-zero.
pub fn run_command(ctx: &Context, program: &str, args: &[String]) -> Result<()> {
    if ctx.dry_run {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        ctx.log.dry_run(&format!("would run: {line}"));
        return Ok(());
    }
    let result = ctx.executor.run(program, args)?;
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        ctx.log.debug(stdout);
    }
    Ok(())
}

/// Write `contents` to `path` unless the file already exists.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn ensure_file(ctx: &Context, path: &str, contents: &str) -> Result<EnsureFile> {
    let target = ctx.expand_home(path);
    let shown = target.display();
    if target.exists() {
        ctx.log.debug(&format!("{shown} already exists"));
        return Ok(EnsureFile::Exists(target));
    }
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would write {shown}"));
        return Ok(EnsureFile::WouldCreate(target));
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    std::fs::write(&target, contents)
        .with_context(|| format!("writing {}", target.display()))?;
    ctx.log.info(&format!("wrote {}", target.display()));
    Ok(EnsureFile::Created(target))
}

/// Build the capability for one configured candidate.
#[must_use]
pub fn candidate(ctx: &Context, spec: &CandidateSpec) -> CommandCapability {
    CommandCapability::new(
        spec.name.clone(),
        spec.probe(),
        spec.activate.clone(),
        Arc::clone(&ctx.executor),
    )
}

/// Build a module group from its configured candidates.
#[must_use]
pub fn module_group(
    ctx: &Context,
    label: &str,
    stop_on_first_success: bool,
    candidates: &[CandidateSpec],
) -> ModuleGroup {
    let mut group = ModuleGroup::new(label, stop_on_first_success);
    for spec in candidates {
        group.push(Box::new(candidate(ctx, spec)));
    }
    group
}
