//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard use cases and the
//! infrastructure that talks to the disk, the clock and the backend.

mod auth_api;
mod clock;
pub mod errors;
mod intake_api;
mod local_storage;

pub use auth_api::AuthApiPort;
pub use clock::*;
pub use errors::ApiError;
pub use intake_api::IntakeApiPort;
pub use local_storage::LocalStoragePort;
