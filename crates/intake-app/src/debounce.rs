//! Trailing-edge debouncer.
//!
//! Each `schedule` aborts the pending timer and starts a new one; the action
//! runs once the delay elapses without another `schedule`. The action is
//! spawned as its own task when the timer fires, so rescheduling can only
//! abort a timer, never an action that is already running.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::debug;

pub type DebouncedAction = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer {
    name: &'static str,
    delay: Duration,
    action: DebouncedAction,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new(name: &'static str, delay: Duration, action: DebouncedAction) -> Self {
        Self {
            name,
            delay,
            action,
            pending: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// (Re)start the quiet period.
    pub fn schedule(&self) {
        let mut pending = self.pending();
        if let Some(existing) = pending.take() {
            existing.abort();
        }

        let action = Arc::clone(&self.action);
        let name = self.name;
        // Deadline is fixed here, not when the timer task is first polled.
        let quiet = sleep(self.delay);
        let handle = tokio::spawn(async move {
            quiet.await;
            debug!(debouncer = name, "debounce elapsed");
            tokio::spawn(action());
        });

        *pending = Some(handle.abort_handle());
    }

    /// Drop the pending timer. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.pending().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!(debouncer = self.name, "debounce cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending().take() {
            handle.abort();
        }
    }
}
