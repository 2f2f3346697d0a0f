//! Optional capabilities and the single-candidate activation attempt.
use std::fmt;
use std::sync::Arc;

use anyhow::{Result, bail};

use crate::error::ActivationError;
use crate::exec::Executor;
use crate::logging::Log;

/// Successful result of an activation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The capability was available and is now active.
    Activated,
    /// The capability is available; activation was skipped (dry run).
    WouldActivate,
    /// The capability is not present in this environment.
    NotAvailable,
}

impl Activation {
    /// Whether this outcome counts as a success for stop-on-first-success
    /// groups.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Activated | Self::WouldActivate)
    }
}

/// Result of [`try_activate`]: never propagated, only reported.
pub type Outcome = Result<Activation, ActivationError>;

/// An optional shell extension or tool that may be activated.
///
/// Both operations are owned by the surrounding environment and may fail;
/// the loader converts any failure into an [`ActivationError`].
pub trait Capability: Send + Sync {
    /// Identifying name, used in logs and reports.
    fn name(&self) -> &str;

    /// Whether the capability exists in the current environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the check itself could not be carried out.
    fn is_available(&self) -> Result<bool>;

    /// Activate the capability.
    ///
    /// # Errors
    ///
    /// Returns an error if activation fails.
    fn activate(&self) -> Result<()>;
}

/// Check `candidate` and, when available, activate it.
///
/// Never fails: a failing check or activation is logged as a warning and
/// returned as `Err`.  An unavailable candidate is logged at debug level.
/// With `dry_run` set, available candidates are reported as
/// [`Activation::WouldActivate`] without being activated.
pub fn try_activate(candidate: &dyn Capability, log: &dyn Log, dry_run: bool) -> Outcome {
    let name = candidate.name();
    let available = match candidate.is_available() {
        Ok(available) => available,
        Err(e) => {
            let err = ActivationError::Probe {
                name: name.to_string(),
                source: e.into(),
            };
            log.warn(&err.to_string());
            return Err(err);
        }
    };

    if !available {
        log.debug(&format!("module '{name}' not available"));
        return Ok(Activation::NotAvailable);
    }

    if dry_run {
        log.dry_run(&format!("would activate module '{name}'"));
        return Ok(Activation::WouldActivate);
    }

    match candidate.activate() {
        Ok(()) => {
            log.debug(&format!("module '{name}' activated"));
            Ok(Activation::Activated)
        }
        Err(e) => {
            let err = ActivationError::Activate {
                name: name.to_string(),
                source: e.into(),
            };
            log.warn(&err.to_string());
            Err(err)
        }
    }
}

/// How a [`CommandCapability`] decides whether it is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Available when the program is found on `PATH`.
    OnPath(String),
    /// Available when the command exits successfully.  Failing to spawn the
    /// command is an error rather than "not available".
    Command(Vec<String>),
}

/// A capability probed and activated through external programs.
pub struct CommandCapability {
    name: String,
    probe: Probe,
    activate: Option<Vec<String>>,
    executor: Arc<dyn Executor>,
}

impl fmt::Debug for CommandCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCapability")
            .field("name", &self.name)
            .field("probe", &self.probe)
            .field("activate", &self.activate)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl CommandCapability {
    /// Create a capability.  Without an `activate` command, being available
    /// is all activation means.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        probe: Probe,
        activate: Option<Vec<String>>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            name: name.into(),
            probe,
            activate,
            executor,
        }
    }

    /// The availability probe.
    #[must_use]
    pub const fn probe(&self) -> &Probe {
        &self.probe
    }
}

impl Capability for CommandCapability {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> Result<bool> {
        match &self.probe {
            Probe::OnPath(program) => Ok(self.executor.which(program)),
            Probe::Command(argv) => {
                let Some((program, args)) = argv.split_first() else {
                    bail!("empty probe command");
                };
                Ok(self.executor.run_unchecked(program, args)?.success)
            }
        }
    }

    fn activate(&self) -> Result<()> {
        let Some(argv) = &self.activate else {
            return Ok(());
        };
        let Some((program, args)) = argv.split_first() else {
            bail!("empty activation command");
        };
        self.executor.run(program, args)?;
        Ok(())
    }
}

type Check = Box<dyn Fn() -> Result<bool> + Send + Sync>;
type Action = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// A capability built from two closures.
pub struct FnCapability {
    name: String,
    check: Check,
    action: Action,
}

impl fmt::Debug for FnCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCapability")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl FnCapability {
    /// Build a capability from an availability check and an activation
    /// action.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        check: impl Fn() -> Result<bool> + Send + Sync + 'static,
        action: impl Fn() -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
            action: Box::new(action),
        }
    }
}

impl Capability for FnCapability {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> Result<bool> {
        (self.check)()
    }

    fn activate(&self) -> Result<()> {
        (self.action)()
    }
}
