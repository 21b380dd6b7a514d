use serde::{Deserialize, Serialize};

/// Number of steps in the wizard.
pub const STEP_COUNT: usize = WizardStep::ALL.len();

/// Wizard step.
///
/// 向导步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Account creation.
    ///
    /// 创建账户。
    Account,
    /// Business details.
    ///
    /// 业务信息。
    Business,
    /// Goals and competition.
    ///
    /// 目标与竞争对手。
    Goals,
    /// Tier selection.
    ///
    /// 选择套餐。
    Plan,
    /// Confirm and submit.
    ///
    /// 确认并提交。
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Account,
        WizardStep::Business,
        WizardStep::Goals,
        WizardStep::Plan,
        WizardStep::Review,
    ];

    pub const FIRST: WizardStep = WizardStep::Account;
    pub const LAST: WizardStep = WizardStep::Review;

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            WizardStep::Account => "account",
            WizardStep::Business => "business",
            WizardStep::Goals => "goals",
            WizardStep::Plan => "plan",
            WizardStep::Review => "review",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Account => "Create Account",
            WizardStep::Business => "Business Details",
            WizardStep::Goals => "Goals & Competition",
            WizardStep::Plan => "Pick Your Tier",
            WizardStep::Review => "Confirm & Submit",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips_through_from_index() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(STEP_COUNT), None);
    }

    #[test]
    fn test_step_order_is_account_business_goals_plan_review() {
        let keys: Vec<_> = WizardStep::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(keys, ["account", "business", "goals", "plan", "review"]);
        assert_eq!(STEP_COUNT, 5);
    }
}
