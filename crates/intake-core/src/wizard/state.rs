use serde::{Deserialize, Deserializer, Serialize};

use super::snapshot::WizardSnapshot;
use super::step::{WizardStep, STEP_COUNT};
use crate::ids::AuditId;

/// Service tier offered on the plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Starter,
    Growth,
    Pro,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Starter, Tier::Growth, Tier::Pro, Tier::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Starter => "Starter",
            Tier::Growth => "Growth",
            Tier::Pro => "Pro",
            Tier::Enterprise => "Enterprise",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing mode the wizard was opened in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    /// One-time audit pricing.
    #[default]
    Audit,
    /// Recurring subscription pricing.
    Subscription,
}

/// Portal account details collected on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Goals offered on the goals step, in display order.
pub const GOAL_OPTIONS: [&str; 6] = [
    "More calls/leads",
    "Rank locally",
    "E-commerce sales",
    "Reputation/Reviews",
    "Content strategy",
    "Technical SEO",
];

/// Business intake answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    pub company_name: String,
    pub website: String,
    pub industry: String,
    pub goals: Vec<String>,
    pub competitors: String,
    pub monthly_budget: String,
    #[serde(deserialize_with = "tier_or_empty")]
    pub tier: Option<Tier>,
    pub notes: String,
}

/// Older snapshots store an unset tier as `""`.
fn tier_or_empty<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => Tier::parse(name)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tier: {name}"))),
    }
}

/// Partial update for [`Account`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Partial update for [`IntakeForm`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub goals: Option<Vec<String>>,
    pub competitors: Option<String>,
    pub monthly_budget: Option<String>,
    pub tier: Option<Tier>,
    pub notes: Option<String>,
}

fn merge_field<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

impl Account {
    /// Shallow-merge a patch. Returns whether anything changed.
    pub fn merge(&mut self, patch: AccountPatch) -> bool {
        let mut changed = merge_field(&mut self.email, patch.email);
        changed |= merge_field(&mut self.password, patch.password);
        changed |= merge_field(&mut self.first_name, patch.first_name);
        changed |= merge_field(&mut self.last_name, patch.last_name);
        changed
    }

    /// "First Last", trimmed.
    pub fn contact_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl IntakeForm {
    /// Shallow-merge a patch. Returns whether anything changed.
    pub fn merge(&mut self, patch: FormPatch) -> bool {
        let mut changed = merge_field(&mut self.company_name, patch.company_name);
        changed |= merge_field(&mut self.website, patch.website);
        changed |= merge_field(&mut self.industry, patch.industry);
        changed |= merge_field(&mut self.goals, patch.goals);
        changed |= merge_field(&mut self.competitors, patch.competitors);
        changed |= merge_field(&mut self.monthly_budget, patch.monthly_budget);
        changed |= merge_field(&mut self.tier, patch.tier.map(Some));
        changed |= merge_field(&mut self.notes, patch.notes);
        changed
    }

    /// Add the goal if absent, remove it if present.
    pub fn toggle_goal(&mut self, goal: &str) {
        if let Some(pos) = self.goals.iter().position(|g| g == goal) {
            self.goals.remove(pos);
        } else {
            self.goals.push(goal.to_string());
        }
    }
}

/// The subset of state whose change schedules a remote sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFingerprint {
    pub audit_id: Option<AuditId>,
    pub current_step: usize,
    pub account: Account,
    pub form: IntakeForm,
}

/// Root wizard state.
///
/// Every mutator returns `true` when the state actually changed so the owning store
/// can skip notifying subscribers on no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub audit_id: Option<AuditId>,
    pub current_step: usize,
    pub max_step_visited: usize,
    pub account: Account,
    pub form: IntakeForm,
    pub mode: WizardMode,
    pub is_saving: bool,
    pub save_error: Option<String>,
    pub last_saved_at: Option<i64>,
}

const LAST_INDEX: usize = STEP_COUNT - 1;

impl WizardState {
    pub fn current(&self) -> WizardStep {
        WizardStep::from_index(self.current_step).unwrap_or(WizardStep::LAST)
    }

    pub fn set_step(&mut self, index: usize) -> bool {
        let index = index.min(LAST_INDEX);
        let before = (self.current_step, self.max_step_visited);
        self.current_step = index;
        self.max_step_visited = self.max_step_visited.max(index);
        before != (self.current_step, self.max_step_visited)
    }

    pub fn next(&mut self) -> bool {
        self.set_step(self.current_step + 1)
    }

    pub fn back(&mut self) -> bool {
        let index = self.current_step.saturating_sub(1);
        let changed = index != self.current_step;
        self.current_step = index;
        changed
    }

    pub fn update_account(&mut self, patch: AccountPatch) -> bool {
        self.account.merge(patch)
    }

    pub fn update_form(&mut self, patch: FormPatch) -> bool {
        self.form.merge(patch)
    }

    pub fn set_tier(&mut self, tier: Tier) -> bool {
        self.update_form(FormPatch {
            tier: Some(tier),
            ..Default::default()
        })
    }

    pub fn set_mode(&mut self, mode: WizardMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn set_saving(&mut self, flag: bool) -> bool {
        let changed = self.is_saving != flag;
        self.is_saving = flag;
        changed
    }

    /// Record a successful save, adopting `audit_id` when given.
    pub fn mark_saved(&mut self, audit_id: Option<AuditId>, now_ms: i64) -> bool {
        self.is_saving = false;
        self.save_error = None;
        self.last_saved_at = Some(now_ms);
        if audit_id.is_some() {
            self.audit_id = audit_id;
        }
        true
    }

    /// Adopt a server id without touching save status.
    pub fn adopt_audit_id(&mut self, audit_id: AuditId) -> bool {
        if self.audit_id.as_ref() == Some(&audit_id) {
            return false;
        }
        self.audit_id = Some(audit_id);
        true
    }

    pub fn set_error(&mut self, message: impl Into<String>) -> bool {
        self.save_error = Some(message.into());
        self.is_saving = false;
        true
    }

    pub fn reset(&mut self) -> bool {
        let changed = *self != Self::default();
        *self = Self::default();
        changed
    }

    pub fn sync_fingerprint(&self) -> SyncFingerprint {
        SyncFingerprint {
            audit_id: self.audit_id.clone(),
            current_step: self.current_step,
            account: self.account.clone(),
            form: self.form.clone(),
        }
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            audit_id: self.audit_id.clone(),
            current_step: self.current_step,
            max_step_visited: self.max_step_visited,
            account: self.account.clone(),
            form: self.form.clone(),
            mode: self.mode,
            last_saved_at: self.last_saved_at,
        }
    }

    /// Merge a persisted snapshot. Transient sync status is cleared.
    pub fn restore(&mut self, snapshot: WizardSnapshot) -> bool {
        let snapshot = snapshot.sanitized();
        let restored = Self {
            audit_id: snapshot.audit_id,
            current_step: snapshot.current_step,
            max_step_visited: snapshot.max_step_visited,
            account: snapshot.account,
            form: snapshot.form,
            mode: snapshot.mode,
            is_saving: false,
            save_error: None,
            last_saved_at: snapshot.last_saved_at,
        };
        let changed = *self != restored;
        *self = restored;
        changed
    }
}
