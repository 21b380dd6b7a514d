use intake_app::WizardStore;
use intake_core::pricing::offers;
use intake_core::{AuthState, Field, Tier, WizardMode, WizardStep};

use super::{line, StepView, ViewContext, ViewError};

pub struct PlanView;

pub(crate) fn parse_mode(value: &str) -> Option<WizardMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "audit" => Some(WizardMode::Audit),
        "subscription" | "subscribe" => Some(WizardMode::Subscription),
        _ => None,
    }
}

impl StepView for PlanView {
    fn step(&self) -> WizardStep {
        WizardStep::Plan
    }

    fn fields(&self) -> &'static [&'static str] {
        &["tier", "mode"]
    }

    fn render(&self, cx: &ViewContext<'_>, out: &mut String) {
        let mode = cx.state.mode;
        let selected = cx.state.form.tier;
        let (audit, subscription) = match mode {
            WizardMode::Audit => ("[Audit Pricing]", "Subscription Plans"),
            WizardMode::Subscription => ("Audit Pricing", "[Subscription Plans]"),
        };
        line(out, &format!("  {audit}  |  {subscription}"));
        out.push('\n');

        for offer in offers(mode) {
            let per_audit = if mode == WizardMode::Audit && offer.tier != Tier::Enterprise {
                " / audit"
            } else {
                ""
            };
            let marker = if selected == Some(offer.tier) {
                "  (selected)"
            } else {
                ""
            };
            line(
                out,
                &format!("  {}: {}{per_audit}{marker}", offer.tier.as_str(), offer.price),
            );
            for feature in offer.features {
                line(out, &format!("      - {feature}"));
            }
        }

        if let Some(message) = cx.errors.and_then(|e| e.get(Field::Tier)) {
            line(out, &format!("    ! {message}"));
        }
    }

    fn apply(
        &self,
        store: &WizardStore,
        _auth: &AuthState,
        field: &str,
        value: &str,
    ) -> Result<(), ViewError> {
        match field {
            "tier" => {
                let tier = Tier::parse(value.trim()).ok_or_else(|| ViewError::InvalidValue {
                    field: "tier",
                    reason: format!(
                        "`{}` is not a tier (starter, growth, pro, enterprise)",
                        value.trim()
                    ),
                })?;
                store.set_tier(tier);
            }
            "mode" => {
                let mode = parse_mode(value).ok_or_else(|| ViewError::InvalidValue {
                    field: "mode",
                    reason: format!("`{}` is not a mode (audit, subscription)", value.trim()),
                })?;
                store.set_mode(mode);
            }
            other => return Err(self.unknown_field(other)),
        }
        Ok(())
    }
}
