//! # intake-core
//!
//! Core domain models and business rules for the audit intake wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod config;
pub mod ids;
pub mod intake;
pub mod ports;
pub mod pricing;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use auth::{AuthPhase, AuthSession, AuthState, Credentials};
pub use config::AppConfig;
pub use ids::{AuditId, UserId};
pub use intake::IntakePayload;
pub use validation::{Field, ValidationErrors};
pub use wizard::{
    Account, AccountPatch, FormPatch, IntakeForm, SaveStatus, StepNavigator, Tier, WizardMode,
    WizardSnapshot, WizardState, WizardStep, STEP_COUNT,
};
