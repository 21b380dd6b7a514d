use intake_app::WizardStore;
use intake_core::wizard::GOAL_OPTIONS;
use intake_core::{AuthState, Field, FormPatch, WizardStep};

use super::{field_line, line, StepView, ViewContext, ViewError};

pub struct GoalsView;

/// Resolve a goal by its 1-based position or by name (case-insensitive).
fn resolve_goal(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if let Ok(n) = value.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| GOAL_OPTIONS.get(i)).copied();
    }
    GOAL_OPTIONS
        .iter()
        .find(|goal| goal.eq_ignore_ascii_case(value))
        .copied()
}

impl StepView for GoalsView {
    fn step(&self) -> WizardStep {
        WizardStep::Goals
    }

    fn fields(&self) -> &'static [&'static str] {
        &["goal", "notes"]
    }

    fn render(&self, cx: &ViewContext<'_>, out: &mut String) {
        let form = &cx.state.form;
        line(out, "What are your goals?");
        for (i, goal) in GOAL_OPTIONS.iter().enumerate() {
            let mark = if form.goals.iter().any(|g| g == goal) {
                "x"
            } else {
                " "
            };
            line(out, &format!("  [{mark}] {}. {goal}", i + 1));
        }
        if let Some(message) = cx.errors.and_then(|e| e.get(Field::Goals)) {
            line(out, &format!("    ! {message}"));
        }
        field_line(
            out,
            cx,
            "Notes (anything else we should know?)",
            &form.notes,
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
        match field {
            "goal" | "goals" => {
                let goal = resolve_goal(value).ok_or_else(|| ViewError::InvalidValue {
                    field: "goal",
                    reason: format!(
                        "`{}` is not an option; pick 1-{} or a goal name",
                        value.trim(),
                        GOAL_OPTIONS.len()
                    ),
                })?;
                store.toggle_goal(goal);
            }
            "notes" => {
                store.update_form(FormPatch {
                    notes: Some(value.to_string()),
                    ..Default::default()
                });
            }
            other => return Err(self.unknown_field(other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support;

    #[test]
    fn test_resolve_goal_by_number_or_name() {
        assert_eq!(resolve_goal("1"), Some("More calls/leads"));
        assert_eq!(resolve_goal("technical seo"), Some("Technical SEO"));
        assert_eq!(resolve_goal("0"), None);
        assert_eq!(resolve_goal("7"), None);
        assert_eq!(resolve_goal("world peace"), None);
    }

    #[test]
    fn test_goal_toggles() {
        let store = test_support::store();
        let auth = AuthState::default();

        GoalsView.apply(&store, &auth, "goal", "2").unwrap();
        GoalsView.apply(&store, &auth, "goal", "5").unwrap();
        assert_eq!(
            store.state().form.goals,
            vec!["Rank locally".to_string(), "Content strategy".to_string()]
        );

        GoalsView.apply(&store, &auth, "goal", "rank locally").unwrap();
        assert_eq!(store.state().form.goals, vec!["Content strategy".to_string()]);
    }

    #[test]
    fn test_render_marks_selected_goals() {
        let store = test_support::store();
        let auth = AuthState::default();
        GoalsView.apply(&store, &auth, "goal", "6").unwrap();
        let state = store.state();

        let mut out = String::new();
        GoalsView.render(
            &ViewContext {
                state: &state,
                auth: &auth,
                errors: None,
            },
            &mut out,
        );

        assert!(out.contains("[x] 6. Technical SEO"));
        assert!(out.contains("[ ] 1. More calls/leads"));
    }

    #[test]
    fn test_invalid_goal_is_rejected() {
        let store = test_support::store();
        let err = GoalsView
            .apply(&store, &AuthState::default(), "goal", "9")
            .unwrap_err();
        assert!(matches!(err, ViewError::InvalidValue { field: "goal", .. }));
        assert!(store.state().form.goals.is_empty());
    }
}
