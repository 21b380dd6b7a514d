use chrono::{Local, TimeZone};
use intake_core::{SaveStatus, WizardState};

/// Save badge in the local time zone, e.g. `[Saved 14:03:27]`.
pub fn render_badge(state: &WizardState) -> String {
    render_badge_in(state, &Local)
}

pub fn render_badge_in<Tz: TimeZone>(state: &WizardState, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}]", SaveStatus::of(state).label_in(tz))
}
