//! Guarded activation of optional shell modules.
//!
//! A missing or broken module never aborts startup: every probe and
//! activation failure is captured as an [`ActivationError`](crate::error::ActivationError),
//! logged, and returned in a [`GroupReport`].
mod capability;
mod group;

pub use capability::{
    Activation, Capability, CommandCapability, FnCapability, Outcome, Probe, try_activate,
};
pub use group::{CandidateReport, GroupReport, ModuleGroup};
