//! Audit intake application layer
//!
//! This crate contains the wizard use cases and their runtime orchestration:
//! the reactive store, debounced persistence, the login-or-register bridge and
//! the create-or-update sync engine.

pub mod app_paths;
pub mod debounce;
pub mod deps;
pub mod store;
pub mod usecases;

pub use app_paths::AppPaths;
pub use debounce::Debouncer;
pub use deps::SessionDeps;
pub use store::WizardStore;
pub use usecases::{
    AuthBridge, AuthError, ExternalProfile, LaunchOptions, SessionTimings, StorageBridge,
    SubmitError, SubmitIntake, SubmitReceipt, SyncEngine, SyncError, SyncOutcome, WizardSession,
};
