//! Wizard session
//!
//! Wires the store to its two debounced consumers and exposes the
//! session-level operations used by the view layer.
//!
//! 将存储与两个防抖消费者连接起来，并向视图层提供会话级操作。

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use intake_core::config::{DEFAULT_STORAGE_DEBOUNCE_MS, DEFAULT_SYNC_DEBOUNCE_MS};
use intake_core::{AccountPatch, AppConfig, AuthSession, AuthState, Tier, WizardMode, WizardStep};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::auth_bridge::AuthBridge;
use super::storage_bridge::StorageBridge;
use super::submit::{SubmitError, SubmitIntake, SubmitReceipt};
use super::sync_engine::SyncEngine;
use crate::debounce::Debouncer;
use crate::deps::SessionDeps;
use crate::store::WizardStore;

/// Password placeholder for accounts signed in through SSO; satisfies the
/// account step's presence check.
pub const SSO_PASSWORD: &str = "SSO_AUTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    pub storage_debounce: Duration,
    pub sync_debounce: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            storage_debounce: Duration::from_millis(DEFAULT_STORAGE_DEBOUNCE_MS),
            sync_debounce: Duration::from_millis(DEFAULT_SYNC_DEBOUNCE_MS),
        }
    }
}

impl SessionTimings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            storage_debounce: Duration::from_millis(config.storage_debounce_ms),
            sync_debounce: Duration::from_millis(config.sync_debounce_ms),
        }
    }
}

/// Options the wizard was launched with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Tier to preselect on the plan step.
    pub tier: Option<Tier>,
    /// Open in subscription pricing mode.
    pub subscribe: bool,
}

/// Profile fields handed over by an external sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalProfile {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct WizardSession {
    store: Arc<WizardStore>,
    storage: Arc<StorageBridge>,
    auth: Arc<AuthBridge>,
    sync: Arc<SyncEngine>,
    submit: SubmitIntake,
    storage_debouncer: Arc<Debouncer>,
    sync_debouncer: Arc<Debouncer>,
    shutdown: CancellationToken,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl WizardSession {
    pub fn new(deps: SessionDeps, timings: SessionTimings) -> Self {
        let store = WizardStore::new(deps.clock).arc();
        let storage = Arc::new(StorageBridge::new(
            Arc::clone(&deps.local_storage),
            Arc::clone(&store),
        ));
        let auth = Arc::new(AuthBridge::new(deps.auth_api, deps.local_storage));
        let sync = Arc::new(SyncEngine::new(
            Arc::clone(&store),
            Arc::clone(&auth),
            deps.intake_api,
        ));
        let submit = SubmitIntake::new(Arc::clone(&store), Arc::clone(&sync));

        let storage_debouncer = {
            let storage = Arc::clone(&storage);
            Arc::new(Debouncer::new(
                "storage",
                timings.storage_debounce,
                Arc::new(move || {
                    let storage = Arc::clone(&storage);
                    async move { storage.persist().await }.boxed()
                }),
            ))
        };
        let sync_debouncer = {
            let sync = Arc::clone(&sync);
            Arc::new(Debouncer::new(
                "sync",
                timings.sync_debounce,
                Arc::new(move || {
                    let sync = Arc::clone(&sync);
                    async move {
                        // Failures are already recorded in the store's save status.
                        if let Err(err) = sync.run_cycle().await {
                            debug!(error = %err, "debounced sync cycle failed");
                        }
                    }
                    .boxed()
                }),
            ))
        };

        Self {
            store,
            storage,
            auth,
            sync,
            submit,
            storage_debouncer,
            sync_debouncer,
            shutdown: CancellationToken::new(),
            watcher: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<WizardStore> {
        &self.store
    }

    pub fn sync_engine(&self) -> &Arc<SyncEngine> {
        &self.sync
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    /// Restore the persisted wizard snapshot and auth state. Never fails; a
    /// missing or corrupt snapshot leaves the defaults in place.
    pub async fn load(&self) {
        let wizard = self.storage.restore().await;
        let auth = self.auth.restore().await;
        info!(
            wizard_restored = wizard,
            auth_restored = auth,
            "wizard session loaded"
        );
    }

    /// Forget the persisted snapshot and return the wizard to its defaults.
    /// The auth session is kept.
    pub async fn discard_draft(&self) {
        self.sync_debouncer.cancel();
        self.sync.invalidate();
        self.store.reset();
        self.storage.clear().await;
    }

    /// Start reacting to store changes. Call after [`Self::load`] so the
    /// restored snapshot does not trigger a sync by itself.
    pub fn start(&self) {
        let mut watcher = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if watcher.is_some() {
            return;
        }

        let mut rx = self.store.subscribe();
        let mut last = rx.borrow_and_update().sync_fingerprint();
        let storage_debouncer = Arc::clone(&self.storage_debouncer);
        let sync_debouncer = Arc::clone(&self.sync_debouncer);
        let shutdown = self.shutdown.clone();

        *watcher = Some(tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let fingerprint = rx.borrow_and_update().sync_fingerprint();
                        storage_debouncer.schedule();
                        if fingerprint != last {
                            last = fingerprint;
                            sync_debouncer.schedule();
                        }
                    }
                }
            }
            debug!("wizard session watcher stopped");
        }));
    }

    pub fn apply_launch_options(&self, options: &LaunchOptions) {
        if let Some(tier) = options.tier {
            self.store.set_tier(tier);
        }
        if options.subscribe {
            self.store.set_mode(WizardMode::Subscription);
            let plan = WizardStep::Plan.index();
            if self.store.with(|s| s.current_step < plan) {
                self.store.set_step(plan);
            }
        }
    }

    /// Accept an SSO hand-off: authenticate with `token`, prefill the account
    /// step and move on to the business step.
    pub async fn adopt_external_session(&self, token: String, profile: ExternalProfile) {
        self.auth
            .adopt_external_session(AuthSession {
                token: Some(token),
                user_id: None,
            })
            .await;
        self.store.update_account(AccountPatch {
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            password: Some(SSO_PASSWORD.to_string()),
        });
        self.store.set_step(WizardStep::Business.index());
        info!("external session adopted");
    }

    /// Submit now. Any pending debounced sync is dropped in favour of this cycle.
    pub async fn submit(&self) -> Result<SubmitReceipt, SubmitError> {
        self.sync_debouncer.cancel();
        self.submit.execute().await
    }

    /// Stop watching and write the latest snapshot.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let watcher = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(watcher) = watcher {
            if let Err(err) = watcher.await {
                warn!(error = %err, "wizard session watcher panicked");
            }
        }
        if self.sync_debouncer.cancel() {
            debug!("pending sync dropped at shutdown");
        }
        // The watcher may have stopped before seeing the last change.
        self.storage_debouncer.cancel();
        self.storage.persist().await;
    }
}
