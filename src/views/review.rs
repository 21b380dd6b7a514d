use intake_app::WizardStore;
use intake_core::pricing::{offer, plan_label};
use intake_core::{AuthState, WizardStep};

use super::{field_line, line, StepView, ViewContext, ViewError};

/// Read-only summary; submission is a separate command.
pub struct ReviewView;

impl StepView for ReviewView {
    fn step(&self) -> WizardStep {
        WizardStep::Review
    }

    fn fields(&self) -> &'static [&'static str] {
        &[]
    }

    fn render(&self, cx: &ViewContext<'_>, out: &mut String) {
        let state = cx.state;
        let (account, form) = (&state.account, &state.form);

        line(out, "Account");
        field_line(out, cx, "Name", &account.contact_name(), None);
        field_line(out, cx, "Email", &account.email, None);

        line(out, "Business");
        field_line(out, cx, "Company", &form.company_name, None);
        field_line(out, cx, "Website", &form.website, None);
        field_line(out, cx, "Industry", &form.industry, None);
        field_line(out, cx, "Budget", &form.monthly_budget, None);

        line(out, "Goals & Notes");
        field_line(out, cx, "Goals", &form.goals.join(", "), None);
        field_line(out, cx, "Notes", &form.notes, None);

        line(out, "Selected Plan");
        match form.tier {
            Some(tier) => line(
                out,
                &format!("  {tier}: {}", offer(tier, state.mode).price),
            ),
            None => line(out, "  —"),
        }
        line(out, &format!("  {}", plan_label(state.mode)));
        if let Some(audit_id) = &state.audit_id {
            line(out, &format!("  Audit ID: {}", audit_id.as_str()));
        }

        out.push('\n');
        line(out, "Type `submit` to send your intake.");
    }

    fn apply(
        &self,
        _store: &WizardStore,
        _auth: &AuthState,
        field: &str,
        _value: &str,
    ) -> Result<(), ViewError> {
        Err(self.unknown_field(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::{AuditId, Tier, WizardMode, WizardState};

    fn render(state: &WizardState) -> String {
        let auth = AuthState::default();
        let mut out = String::new();
        ReviewView.render(
            &ViewContext {
                state,
                auth: &auth,
                errors: None,
            },
            &mut out,
        );
        out
    }

    #[test]
    fn test_review_summarises_state() {
        let mut state = WizardState::default();
        state.account.first_name = "Ada".into();
        state.account.last_name = "Lovelace".into();
        state.account.password = "hunter2".into();
        state.form.goals = vec!["Rank locally".into(), "Technical SEO".into()];
        state.form.tier = Some(Tier::Growth);
        state.audit_id = Some(AuditId::from_string("abc".into()));

        let out = render(&state);

        assert!(out.contains("Name: Ada Lovelace"));
        assert!(out.contains("Goals: Rank locally, Technical SEO"));
        assert!(out.contains("Growth: $499"));
        assert!(out.contains("One-time Audit"));
        assert!(out.contains("Audit ID: abc"));
        assert!(out.contains("Budget: —"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_review_price_follows_mode() {
        let mut state = WizardState::default();
        state.form.tier = Some(Tier::Enterprise);
        state.mode = WizardMode::Subscription;

        let out = render(&state);

        assert!(out.contains("Enterprise: $3,000+/mo"));
        assert!(out.contains("Subscription Plan"));
    }
}
