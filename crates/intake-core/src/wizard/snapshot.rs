use serde::{Deserialize, Serialize};

use super::state::{Account, IntakeForm, WizardMode};
use super::step::STEP_COUNT;
use crate::ids::AuditId;

/// The persisted subset of [`super::WizardState`].
///
/// Every field falls back to its default when missing so that snapshots written by
/// older builds still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardSnapshot {
    pub audit_id: Option<AuditId>,
    pub current_step: usize,
    pub max_step_visited: usize,
    pub account: Account,
    pub form: IntakeForm,
    pub mode: WizardMode,
    pub last_saved_at: Option<i64>,
}

impl WizardSnapshot {
    /// Bring step indices back inside the navigation invariants.
    pub fn sanitized(mut self) -> Self {
        let last = STEP_COUNT - 1;
        if self.current_step > last || self.max_step_visited > last {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                current_step = self.current_step,
                max_step_visited = self.max_step_visited,
                "clamping out-of-range wizard snapshot"
            );
        }
        self.current_step = self.current_step.min(last);
        self.max_step_visited = self.max_step_visited.min(last).max(self.current_step);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Tier, WizardState};

    #[test]
    fn test_snapshot_reload_reproduces_wizard_position_and_data() {
        let mut state = WizardState::default();
        state.set_step(2);
        state.back();
        state.account.email = "a@b.com".into();
        state.form.website = "https://example.com".into();
        state.form.tier = Some(Tier::Starter);
        state.is_saving = true;
        state.save_error = Some("Save failed".into());

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let mut reloaded = WizardState::default();
        reloaded.restore(serde_json::from_str(&json).unwrap());

        assert_eq!(reloaded.current_step, 1);
        assert_eq!(reloaded.max_step_visited, 2);
        assert_eq!(reloaded.account, state.account);
        assert_eq!(reloaded.form, state.form);
        assert!(!reloaded.is_saving);
        assert_eq!(reloaded.save_error, None);
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let json = serde_json::to_value(WizardSnapshot::default()).unwrap();
        assert!(json.get("currentStep").is_some());
        assert!(json.get("maxStepVisited").is_some());
        assert!(json["account"].get("firstName").is_some());
        assert!(json["form"].get("monthlyBudget").is_some());
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let snapshot: WizardSnapshot =
            serde_json::from_str(r#"{"currentStep":3,"account":{"email":"a@b.com"}}"#).unwrap();
        assert_eq!(snapshot.current_step, 3);
        assert_eq!(snapshot.account.email, "a@b.com");
        assert_eq!(snapshot.form, IntakeForm::default());
        assert_eq!(snapshot.audit_id, None);
    }

    #[test]
    fn test_sanitized_clamps_and_raises_mark() {
        let snapshot = WizardSnapshot {
            current_step: 9,
            max_step_visited: 2,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(snapshot.current_step, STEP_COUNT - 1);
        assert_eq!(snapshot.max_step_visited, STEP_COUNT - 1);

        let snapshot = WizardSnapshot {
            current_step: 3,
            max_step_visited: 1,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(snapshot.max_step_visited, 3);
    }
}
