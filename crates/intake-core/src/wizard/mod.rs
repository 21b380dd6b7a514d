//! Wizard domain models
//!
//! This module defines the intake wizard's state, its fixed step sequence and the
//! navigation rules over it. Everything here is pure data and pure transitions;
//! notification and persistence live in the application layer.

mod navigator;
mod snapshot;
mod state;
mod status;
mod step;

pub use navigator::{Crumb, StepNavigator};
pub use snapshot::WizardSnapshot;
pub use state::{
    Account, AccountPatch, FormPatch, IntakeForm, SyncFingerprint, Tier, WizardMode, WizardState,
    GOAL_OPTIONS,
};
pub use status::SaveStatus;
pub use step::{WizardStep, STEP_COUNT};
