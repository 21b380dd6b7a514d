use intake_app::WizardStore;
use intake_core::{AuthState, Field, FormPatch, WizardStep};

use super::{field_line, line, StepView, ViewContext, ViewError};

pub struct BusinessView;

impl StepView for BusinessView {
    fn step(&self) -> WizardStep {
        WizardStep::Business
    }

    fn fields(&self) -> &'static [&'static str] {
        &[
            "company_name",
            "website",
            "industry",
            "monthly_budget",
            "competitors",
        ]
    }

    fn render(&self, cx: &ViewContext<'_>, out: &mut String) {
        let form = &cx.state.form;
        line(out, "Tell us about your business");
        field_line(out, cx, "Company name", &form.company_name, Some(Field::CompanyName));
        field_line(out, cx, "Website URL", &form.website, Some(Field::Website));
        field_line(out, cx, "Industry/Niche", &form.industry, Some(Field::Industry));
        field_line(
            out,
            cx,
            "Approx. monthly budget (optional)",
            &form.monthly_budget,
            None,
        );
        field_line(
            out,
            cx,
            "Top competitors (comma-separated)",
            &form.competitors,
            None,
        );
    }

    fn apply(
        &self,
        store: &WizardStore,
        _auth: &AuthState,
        field: &str,
        value: &str,
    ) -> Result<(), ViewError> {
        let value = Some(value.to_string());
        let patch = match field {
            "company_name" | "company" => FormPatch {
                company_name: value,
                ..Default::default()
            },
            "website" => FormPatch {
                website: value,
                ..Default::default()
            },
            "industry" => FormPatch {
                industry: value,
                ..Default::default()
            },
            "monthly_budget" | "budget" => FormPatch {
                monthly_budget: value,
                ..Default::default()
            },
            "competitors" => FormPatch {
                competitors: value,
                ..Default::default()
            },
            other => return Err(self.unknown_field(other)),
        };
        store.update_form(patch);
        Ok(())
    }
}
