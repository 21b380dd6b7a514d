//! Step navigation rules.
//!
//! Backward navigation is free. Forward navigation happens one step at a time
//! through `next`, or by jumping to a step that was already visited.

use super::state::WizardState;
use super::step::{WizardStep, STEP_COUNT};

/// One breadcrumb entry as rendered by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crumb {
    pub step: WizardStep,
    pub active: bool,
    pub done: bool,
    pub clickable: bool,
}

/// Pure navigation policy over the fixed step list.
pub struct StepNavigator;

impl StepNavigator {
    /// Resolve a step-indicator click: targets past the high-water mark are clamped
    /// down to it.
    pub fn jump_target(target: usize, max_step_visited: usize) -> usize {
        target.min(max_step_visited).min(STEP_COUNT - 1)
    }

    pub fn is_reachable(target: usize, max_step_visited: usize) -> bool {
        target <= max_step_visited && target < STEP_COUNT
    }

    pub fn is_terminal(state: &WizardState) -> bool {
        state.current() == WizardStep::LAST
    }

    pub fn breadcrumb(state: &WizardState) -> Vec<Crumb> {
        WizardStep::ALL
            .into_iter()
            .map(|step| Crumb {
                step,
                active: step.index() == state.current_step,
                done: step.index() < state.current_step,
                clickable: Self::is_reachable(step.index(), state.max_step_visited),
            })
            .collect()
    }
}
