use chrono::{Local, TimeZone};

use super::state::WizardState;

/// Save status shown in the header badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saving,
    Failed(String),
    Saved { at_ms: i64 },
    NotSaved,
}

impl SaveStatus {
    pub fn of(state: &WizardState) -> Self {
        if state.is_saving {
            SaveStatus::Saving
        } else if let Some(error) = &state.save_error {
            SaveStatus::Failed(error.clone())
        } else if let Some(at_ms) = state.last_saved_at {
            SaveStatus::Saved { at_ms }
        } else {
            SaveStatus::NotSaved
        }
    }

    pub fn label(&self) -> String {
        self.label_in(&Local)
    }

    pub fn label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            SaveStatus::Saving => "Saving…".to_string(),
            SaveStatus::Failed(_) => "Save failed".to_string(),
            SaveStatus::Saved { at_ms } => match tz.timestamp_millis_opt(*at_ms).single() {
                Some(at) => format!("Saved {}", at.format("%H:%M:%S")),
                None => "Saved".to_string(),
            },
            SaveStatus::NotSaved => "Not saved yet".to_string(),
        }
    }
}
