//! Terminal step views
//!
//! One view per wizard step. Views read the current [`WizardState`] to render and
//! write field edits back through the [`WizardStore`] actions; they keep no state of
//! their own.
//!
//! 每个向导步骤对应一个视图；视图只读状态渲染，并通过 store 动作写回字段。

mod account;
mod badge;
mod breadcrumb;
mod business;
mod goals;
mod plan;
mod review;

use intake_app::WizardStore;
use intake_core::{AuthState, Field, ValidationErrors, WizardState, WizardStep};

pub use account::AccountView;
pub use badge::{render_badge, render_badge_in};
pub use breadcrumb::render_breadcrumb;
pub use business::BusinessView;
pub use goals::GoalsView;
pub use plan::PlanView;
pub use review::ReviewView;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("`{field}` is not a field of the {step} step (fields: {expected})")]
    UnknownField {
        field: String,
        step: WizardStep,
        expected: String,
    },
    #[error("{0}")]
    Disabled(&'static str),
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Everything a view needs to render one frame.
pub struct ViewContext<'a> {
    pub state: &'a WizardState,
    pub auth: &'a AuthState,
    /// Messages from the last failed "continue" on this step.
    pub errors: Option<&'a ValidationErrors>,
}

pub trait StepView: Send + Sync {
    fn step(&self) -> WizardStep;

    /// Field names accepted by [`StepView::apply`].
    fn fields(&self) -> &'static [&'static str];

    fn render(&self, cx: &ViewContext<'_>, out: &mut String);

    fn apply(
        &self,
        store: &WizardStore,
        auth: &AuthState,
        field: &str,
        value: &str,
    ) -> Result<(), ViewError>;

    fn unknown_field(&self, field: &str) -> ViewError {
        let fields = self.fields();
        ViewError::UnknownField {
            field: field.to_string(),
            step: self.step(),
            expected: if fields.is_empty() {
                "none".to_string()
            } else {
                fields.join(", ")
            },
        }
    }
}

pub fn view_for(step: WizardStep) -> &'static dyn StepView {
    match step {
        WizardStep::Account => &AccountView,
        WizardStep::Business => &BusinessView,
        WizardStep::Goals => &GoalsView,
        WizardStep::Plan => &PlanView,
        WizardStep::Review => &ReviewView,
    }
}

/// Breadcrumb, save badge, step title and the current step's body.
pub fn render_screen(cx: &ViewContext<'_>) -> String {
    let step = cx.state.current();
    let mut out = String::new();

    line(&mut out, &render_breadcrumb(cx.state));
    line(
        &mut out,
        &format!(
            "Step {} of {}: {}    {}",
            step.index() + 1,
            WizardStep::ALL.len(),
            step.label(),
            render_badge(cx.state)
        ),
    );
    if let Some(error) = &cx.state.save_error {
        line(&mut out, &format!("  ! {error}"));
    }
    out.push('\n');

    view_for(step).render(cx, &mut out);
    out
}

pub(crate) fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// `  Label: value` plus the field's validation message, if any.
pub(crate) fn field_line(
    out: &mut String,
    cx: &ViewContext<'_>,
    label: &str,
    value: &str,
    field: Option<Field>,
) {
    let shown = if value.is_empty() { "—" } else { value };
    line(out, &format!("  {label}: {shown}"));
    if let Some(message) = field.and_then(|f| cx.errors.and_then(|e| e.get(f))) {
        line(out, &format!("    ! {message}"));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use intake_app::WizardStore;
    use intake_core::ports::ClockPort;

    pub struct FixedClock;

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            1_704_105_045_000
        }
    }

    pub fn store() -> WizardStore {
        WizardStore::new(Arc::new(FixedClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::validation::validate_step;

    #[test]
    fn test_view_for_matches_step() {
        for step in WizardStep::ALL {
            assert_eq!(view_for(step).step(), step);
        }
    }

    #[test]
    fn test_render_screen_shows_header_and_save_error() {
        let state = WizardState {
            save_error: Some("Failed to create audit".into()),
            ..Default::default()
        };
        let auth = AuthState::default();

        let screen = render_screen(&ViewContext {
            state: &state,
            auth: &auth,
            errors: None,
        });

        assert!(screen.contains("Step 1 of 5: Create Account"));
        assert!(screen.contains("Save failed"));
        assert!(screen.contains("! Failed to create audit"));
    }

    #[test]
    fn test_render_screen_shows_field_messages() {
        let state = WizardState::default();
        let auth = AuthState::default();
        let errors = validate_step(WizardStep::Account, &state.account, &state.form);

        let screen = render_screen(&ViewContext {
            state: &state,
            auth: &auth,
            errors: Some(&errors),
        });

        assert!(screen.contains("! Email is required"));
        assert!(screen.contains("! First name is required"));
    }

    #[test]
    fn test_unknown_field_lists_expected_fields() {
        let store = test_support::store();
        let err = view_for(WizardStep::Review)
            .apply(&store, &AuthState::default(), "email", "x")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "`email` is not a field of the review step (fields: none)"
        );
    }
}
