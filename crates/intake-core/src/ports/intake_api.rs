use async_trait::async_trait;

use super::errors::ApiError;
use crate::ids::AuditId;
use crate::intake::IntakePayload;

/// Backend audit-intake resource.
///
/// `token` is sent as a bearer header when present.
#[async_trait]
pub trait IntakeApiPort: Send + Sync {
    /// Create an intake and return the server-assigned id.
    async fn create_intake(
        &self,
        payload: &IntakePayload,
        token: Option<&str>,
    ) -> Result<AuditId, ApiError>;

    /// Merge-patch an existing intake.
    async fn update_intake(
        &self,
        audit_id: &AuditId,
        payload: &IntakePayload,
        token: Option<&str>,
    ) -> Result<(), ApiError>;
}
