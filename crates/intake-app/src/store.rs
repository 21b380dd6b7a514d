//! Local Store
//!
//! The single owner of [`WizardState`]. Views and use cases mutate it only
//! through the actions below; every effective mutation notifies subscribers.
//! No-op mutations are not broadcast.

use std::sync::Arc;

use intake_core::ports::ClockPort;
use intake_core::{
    AccountPatch, AuditId, FormPatch, StepNavigator, Tier, WizardMode, WizardSnapshot,
    WizardState,
};
use tokio::sync::watch;
use tracing::trace;

pub struct WizardStore {
    state: watch::Sender<WizardState>,
    clock: Arc<dyn ClockPort>,
}

impl WizardStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        let (state, _) = watch::channel(WizardState::default());
        Self { state, clock }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn apply(&self, action: &'static str, mutate: impl FnOnce(&mut WizardState) -> bool) -> bool {
        let changed = self.state.send_if_modified(mutate);
        if changed {
            trace!(action, "wizard store updated");
        }
        changed
    }

    /// Clone of the current state.
    pub fn state(&self) -> WizardState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with<R>(&self, read: impl FnOnce(&WizardState) -> R) -> R {
        read(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn set_step(&self, index: usize) -> bool {
        self.apply("set_step", |s| s.set_step(index))
    }

    /// Step-indicator click: never moves past the high-water mark.
    pub fn jump_to(&self, target: usize) -> bool {
        self.apply("jump_to", |s| {
            let index = StepNavigator::jump_target(target, s.max_step_visited);
            s.set_step(index)
        })
    }

    pub fn next(&self) -> bool {
        self.apply("next", WizardState::next)
    }

    pub fn back(&self) -> bool {
        self.apply("back", WizardState::back)
    }

    pub fn update_account(&self, patch: AccountPatch) -> bool {
        self.apply("update_account", |s| s.update_account(patch))
    }

    pub fn update_form(&self, patch: FormPatch) -> bool {
        self.apply("update_form", |s| s.update_form(patch))
    }

    pub fn toggle_goal(&self, goal: &str) -> bool {
        self.apply("toggle_goal", |s| {
            s.form.toggle_goal(goal);
            true
        })
    }

    pub fn set_tier(&self, tier: Tier) -> bool {
        self.apply("set_tier", |s| s.set_tier(tier))
    }

    pub fn set_mode(&self, mode: WizardMode) -> bool {
        self.apply("set_mode", |s| s.set_mode(mode))
    }

    pub fn set_saving(&self, flag: bool) -> bool {
        self.apply("set_saving", |s| s.set_saving(flag))
    }

    /// Record a successful save stamped with the clock's current time.
    pub fn mark_saved(&self, audit_id: Option<AuditId>) -> bool {
        let now_ms = self.clock.now_ms();
        self.apply("mark_saved", |s| s.mark_saved(audit_id, now_ms))
    }

    pub fn adopt_audit_id(&self, audit_id: AuditId) -> bool {
        self.apply("adopt_audit_id", |s| s.adopt_audit_id(audit_id))
    }

    pub fn set_error(&self, message: impl Into<String>) -> bool {
        let message = message.into();
        self.apply("set_error", |s| s.set_error(message))
    }

    pub fn reset(&self) -> bool {
        self.apply("reset", WizardState::reset)
    }

    pub fn restore(&self, snapshot: WizardSnapshot) -> bool {
        self.apply("restore", |s| s.restore(snapshot))
    }
}
