//! Remote audit-intake resource mapping.
//!
//! The backend stores the wizard's business answers in a nested `techStack`
//! structure; this module flattens the wizard state into that shape.

use serde::{Deserialize, Serialize};

use crate::wizard::{Account, IntakeForm};

/// CMS value sent when an intake is first created.
pub const DEFAULT_CMS: &str = "custom";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub industry: String,
    pub goals: Vec<String>,
    pub competitors: String,
    pub budget: String,
    /// Tier name, `""` when not chosen yet.
    pub tier: String,
    pub notes: String,
}

/// Request body for creating or patching an audit intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakePayload {
    pub website_url: String,
    pub contact_name: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms: Option<String>,
    pub tech_stack: TechStack,
}

impl IntakePayload {
    pub fn for_create(account: &Account, form: &IntakeForm) -> Self {
        Self {
            cms: Some(DEFAULT_CMS.to_string()),
            ..Self::for_update(account, form)
        }
    }

    pub fn for_update(account: &Account, form: &IntakeForm) -> Self {
        Self {
            website_url: form.website.clone(),
            contact_name: account.contact_name(),
            contact_email: account.email.clone(),
            cms: None,
            tech_stack: TechStack {
                industry: form.industry.clone(),
                goals: form.goals.clone(),
                competitors: form.competitors.clone(),
                budget: form.monthly_budget.clone(),
                tier: form.tier.map(|t| t.as_str().to_string()).unwrap_or_default(),
                notes: form.notes.clone(),
            },
        }
    }
}
