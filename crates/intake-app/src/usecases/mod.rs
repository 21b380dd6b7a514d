pub mod auth_bridge;
pub mod session;
pub mod storage_bridge;
pub mod submit;
pub mod sync_engine;

pub use auth_bridge::{AuthBridge, AuthError, AUTH_FAILED_MESSAGE, AUTH_SNAPSHOT_KEY};
pub use session::{ExternalProfile, LaunchOptions, SessionTimings, WizardSession, SSO_PASSWORD};
pub use storage_bridge::{StorageBridge, WIZARD_SNAPSHOT_KEY};
pub use submit::{SubmitError, SubmitIntake, SubmitReceipt};
pub use sync_engine::{SyncEngine, SyncError, SyncOutcome};
