use std::sync::Arc;

use intake_core::validation::first_incomplete_step;
use intake_core::{AuditId, ValidationErrors, WizardStep};
use tracing::{info, info_span, Instrument};

use super::sync_engine::{SyncEngine, SyncError, SyncOutcome};
use crate::store::WizardStore;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{step} step is incomplete: {errors}")]
    Incomplete {
        step: WizardStep,
        errors: ValidationErrors,
    },
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("submission was superseded by a newer edit")]
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub audit_id: AuditId,
    /// Whether this submit created the server record.
    pub created: bool,
}

/// Use case for the explicit, non-debounced submit at the review step.
///
/// Validates every step, then runs one sync cycle immediately.
pub struct SubmitIntake {
    store: Arc<WizardStore>,
    sync: Arc<SyncEngine>,
}

impl SubmitIntake {
    pub fn new(store: Arc<WizardStore>, sync: Arc<SyncEngine>) -> Self {
        Self { store, sync }
    }

    pub async fn execute(&self) -> Result<SubmitReceipt, SubmitError> {
        let span = info_span!("usecase.submit_intake.execute");
        async {
            let incomplete = self
                .store
                .with(|s| first_incomplete_step(&s.account, &s.form));
            if let Some((step, errors)) = incomplete {
                return Err(SubmitError::Incomplete { step, errors });
            }

            let receipt = match self.sync.run_cycle().await? {
                SyncOutcome::Created(audit_id) => SubmitReceipt {
                    audit_id,
                    created: true,
                },
                SyncOutcome::Updated(audit_id) => SubmitReceipt {
                    audit_id,
                    created: false,
                },
                SyncOutcome::Superseded => return Err(SubmitError::Interrupted),
            };
            info!(audit_id = %receipt.audit_id, "audit intake submitted");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }
}
