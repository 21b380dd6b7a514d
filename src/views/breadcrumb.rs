use intake_core::{StepNavigator, WizardState};

/// One line: `✓ 1 Create Account › [2 Business Details] › 3 Goals & Competition ...`.
/// Steps past the high-water mark carry a lock marker since `goto` cannot reach them.
pub fn render_breadcrumb(state: &WizardState) -> String {
    StepNavigator::breadcrumb(state)
        .into_iter()
        .map(|crumb| {
            let label = format!("{} {}", crumb.step.index() + 1, crumb.step.label());
            if crumb.active {
                format!("[{label}]")
            } else if crumb.done {
                format!("✓ {label}")
            } else if crumb.clickable {
                label
            } else {
                format!("{label} (locked)")
            }
        })
        .collect::<Vec<_>>()
        .join(" › ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_marks_each_state() {
        let mut state = WizardState::default();
        state.next();
        state.next();
        state.back();

        let crumbs = render_breadcrumb(&state);

        assert_eq!(
            crumbs,
            "✓ 1 Create Account › [2 Business Details] › 3 Goals & Competition › \
             4 Pick Your Tier (locked) › 5 Confirm & Submit (locked)"
        );
    }
}
