//! Storage Bridge
//!
//! Mirrors the wizard snapshot into local storage and restores it on load.
//! Local persistence never fails the wizard: every error is logged and the
//! store keeps whatever it already holds.

use std::sync::Arc;

use intake_core::ports::LocalStoragePort;
use intake_core::WizardSnapshot;
use tracing::{debug, info_span, warn, Instrument};

use crate::store::WizardStore;

/// Local storage key of the wizard snapshot.
pub const WIZARD_SNAPSHOT_KEY: &str = "audit-wizard.v1";

pub struct StorageBridge {
    storage: Arc<dyn LocalStoragePort>,
    store: Arc<WizardStore>,
}

impl StorageBridge {
    pub fn new(storage: Arc<dyn LocalStoragePort>, store: Arc<WizardStore>) -> Self {
        Self { storage, store }
    }

    /// Merge the persisted snapshot into the store.
    ///
    /// Returns `true` only when a snapshot was found, parsed and applied.
    pub async fn restore(&self) -> bool {
        let span = info_span!("usecase.storage_bridge.restore", key = WIZARD_SNAPSHOT_KEY);
        async {
            let raw = match self.storage.get_item(WIZARD_SNAPSHOT_KEY).await {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    debug!("no persisted wizard snapshot");
                    return false;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read wizard snapshot; keeping defaults");
                    return false;
                }
            };

            match serde_json::from_str::<WizardSnapshot>(&raw) {
                Ok(snapshot) => {
                    self.store.restore(snapshot);
                    debug!("wizard snapshot restored");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "corrupt wizard snapshot; keeping defaults");
                    false
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Write the current snapshot, overwriting the previous one.
    pub async fn persist(&self) {
        let snapshot = self.store.snapshot();
        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize wizard snapshot");
                return;
            }
        };

        match self.storage.set_item(WIZARD_SNAPSHOT_KEY, &raw).await {
            Ok(()) => debug!(
                current_step = snapshot.current_step,
                "wizard snapshot persisted"
            ),
            Err(err) => warn!(error = %err, "failed to persist wizard snapshot"),
        }
    }

    /// Forget the persisted snapshot.
    pub async fn clear(&self) {
        if let Err(err) = self.storage.remove_item(WIZARD_SNAPSHOT_KEY).await {
            warn!(error = %err, "failed to clear wizard snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use intake_core::ports::ClockPort;
    use intake_core::{FormPatch, Tier};
    use mockall::predicate::eq;

    mockall::mock! {
        pub LocalStorage {}

        #[async_trait]
        impl LocalStoragePort for LocalStorage {
            async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
            async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
            async fn remove_item(&self, key: &str) -> anyhow::Result<()>;
        }
    }

    struct ZeroClock;

    impl ClockPort for ZeroClock {
        fn now_ms(&self) -> i64 {
            0
        }
    }

    fn store() -> Arc<WizardStore> {
        WizardStore::new(Arc::new(ZeroClock)).arc()
    }

    #[tokio::test]
    async fn restore_applies_persisted_snapshot() {
        let mut storage = MockLocalStorage::new();
        storage
            .expect_get_item()
            .with(eq(WIZARD_SNAPSHOT_KEY))
            .returning(|_| {
                Ok(Some(
                    r#"{"currentStep":2,"maxStepVisited":3,"form":{"tier":"Pro"}}"#.to_string(),
                ))
            });
        let store = store();
        let bridge = StorageBridge::new(Arc::new(storage), store.clone());

        assert!(bridge.restore().await);

        let state = store.state();
        assert_eq!((state.current_step, state.max_step_visited), (2, 3));
        assert_eq!(state.form.tier, Some(Tier::Pro));
    }

    #[tokio::test]
    async fn restore_keeps_defaults_on_corrupt_json() {
        let mut storage = MockLocalStorage::new();
        storage
            .expect_get_item()
            .returning(|_| Ok(Some("{not json".to_string())));
        let store = store();
        let bridge = StorageBridge::new(Arc::new(storage), store.clone());

        assert!(!bridge.restore().await);
        assert_eq!(store.state(), Default::default());
    }

    #[tokio::test]
    async fn restore_keeps_defaults_on_read_error() {
        let mut storage = MockLocalStorage::new();
        storage
            .expect_get_item()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));
        let store = store();
        let bridge = StorageBridge::new(Arc::new(storage), store.clone());

        assert!(!bridge.restore().await);
        assert_eq!(store.state(), Default::default());
    }

    #[tokio::test]
    async fn persist_writes_snapshot_under_fixed_key() {
        let store = store();
        store.update_form(FormPatch {
            company_name: Some("Acme".into()),
            ..Default::default()
        });

        let mut storage = MockLocalStorage::new();
        storage
            .expect_set_item()
            .withf(|key, value| {
                key == WIZARD_SNAPSHOT_KEY && value.contains(r#""companyName":"Acme""#)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let bridge = StorageBridge::new(Arc::new(storage), store);

        bridge.persist().await;
    }

    #[tokio::test]
    async fn persist_swallows_write_errors() {
        let mut storage = MockLocalStorage::new();
        storage
            .expect_set_item()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));
        let bridge = StorageBridge::new(Arc::new(storage), store());

        bridge.persist().await;
    }
}
