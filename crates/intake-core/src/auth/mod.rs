//! Authentication domain models
//!
//! The session bootstrap is a two-attempt chain: log in with the wizard's
//! credentials, and register the account when login is rejected.

mod state;
mod state_machine;

pub use state::{AuthSession, AuthState, Credentials};
pub use state_machine::{
    AuthAction, AuthEvent, AuthPhase, AuthStage, AuthStateMachine, LoginResult, RegisterResult,
};
