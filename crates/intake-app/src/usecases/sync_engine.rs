//! Sync Engine
//!
//! Create-or-update of the current wizard snapshot against the backend's
//! audit-intake resource.
//!
//! Cycles are numbered when issued and serialised through `gate`, so two
//! creates can never be in flight together. A cycle that reaches the gate
//! after a newer one was issued is skipped. A cycle whose response arrives
//! after a newer one was issued keeps only the server id; the newer cycle
//! owns the save status.
//!
//! Discarding the draft bumps the draft generation through
//! [`SyncEngine::invalidate`]. Responses for an older generation leave the store
//! untouched, server id included.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use intake_core::ports::{ApiError, IntakeApiPort};
use intake_core::{AuditId, IntakePayload};
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use super::auth_bridge::{AuthBridge, AuthError, AUTH_FAILED_MESSAGE};
use crate::store::WizardStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created(AuditId),
    Updated(AuditId),
    /// A newer cycle was issued before this one started.
    Superseded,
}

impl SyncOutcome {
    pub fn audit_id(&self) -> Option<&AuditId> {
        match self {
            SyncOutcome::Created(id) | SyncOutcome::Updated(id) => Some(id),
            SyncOutcome::Superseded => None,
        }
    }
}

pub struct SyncEngine {
    store: Arc<WizardStore>,
    auth: Arc<AuthBridge>,
    api: Arc<dyn IntakeApiPort>,
    issued: AtomicU64,
    generation: AtomicU64,
    gate: Mutex<()>,
}

impl SyncEngine {
    pub fn new(store: Arc<WizardStore>, auth: Arc<AuthBridge>, api: Arc<dyn IntakeApiPort>) -> Self {
        Self {
            store,
            auth,
            api,
            issued: AtomicU64::new(0),
            generation: AtomicU64::new(0),
            gate: Mutex::new(()),
        }
    }

    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.issued.load(Ordering::SeqCst) != seq
    }

    /// Detach every cycle issued so far from the current draft. Call before the
    /// store is reset.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.issued.fetch_add(1, Ordering::SeqCst);
        debug!("sync cycles invalidated");
    }

    /// Issue and run one cycle.
    pub async fn run_cycle(&self) -> Result<SyncOutcome, SyncError> {
        let seq = self.issue();
        let span = info_span!("usecase.sync_engine.cycle", seq);
        self.run_issued(seq).instrument(span).await
    }

    async fn run_issued(&self, seq: u64) -> Result<SyncOutcome, SyncError> {
        let _gate = self.gate.lock().await;
        if self.is_stale(seq) {
            debug!("cycle superseded before start");
            return Ok(SyncOutcome::Superseded);
        }

        let account = self.store.with(|s| s.account.clone());
        let session = match self.auth.ensure_session(&account).await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "sync aborted: not authenticated");
                if !self.is_stale(seq) {
                    self.store.set_error(AUTH_FAILED_MESSAGE);
                }
                return Err(err.into());
            }
        };

        let generation = self.generation.load(Ordering::SeqCst);
        self.store.set_saving(true);
        let state = self.store.state();
        let token = session.token.as_deref();

        match state.audit_id {
            Some(audit_id) => {
                let payload = IntakePayload::for_update(&state.account, &state.form);
                let result = self.api.update_intake(&audit_id, &payload, token).await;
                self.settle(seq, generation, result.map(|()| SyncOutcome::Updated(audit_id)))
            }
            None => {
                let payload = IntakePayload::for_create(&state.account, &state.form);
                let result = self.api.create_intake(&payload, token).await;
                self.settle(seq, generation, result.map(SyncOutcome::Created))
            }
        }
    }

    fn settle(
        &self,
        seq: u64,
        generation: u64,
        result: Result<SyncOutcome, ApiError>,
    ) -> Result<SyncOutcome, SyncError> {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(ok = result.is_ok(), "response for a discarded draft dropped");
            return result.map_err(SyncError::from);
        }
        let stale = self.is_stale(seq);
        match result {
            Ok(outcome) => {
                match (&outcome, stale) {
                    (SyncOutcome::Created(id), true) => {
                        self.store.adopt_audit_id(id.clone());
                    }
                    (SyncOutcome::Created(id), false) => {
                        self.store.mark_saved(Some(id.clone()));
                    }
                    (_, false) => {
                        self.store.mark_saved(None);
                    }
                    (_, true) => {}
                }
                if stale {
                    debug!(?outcome, "stale response; status left to newer cycle");
                } else {
                    info!(?outcome, "audit intake synced");
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, stale, "audit intake sync failed");
                if !stale {
                    self.store.set_error(err.to_string());
                }
                Err(err.into())
            }
        }
    }
}
