//! Wizard commands
//!
//! Parses one line of terminal input into a [`Command`] and executes it against a
//! [`WizardSession`]. Field edits go through the current step's view; navigation
//! goes through the store; `submit` goes through the session.

use std::str::FromStr;

use intake_app::{SubmitError, WizardSession};
use intake_core::validation::validate_step;
use intake_core::{SaveStatus, StepNavigator, ValidationErrors, WizardStep};
use tracing::{debug, info};

use crate::views::{view_for, ViewError};

pub const HELP: &str = "\
Commands:
  set <field> <value>   edit a field on the current step
  goal <n|name>         toggle a goal
  tier <name>           choose starter, growth, pro or enterprise
  mode <audit|subscription>
  next | continue       validate this step and move on
  back                  previous step
  goto <n>              jump to a visited step (1-5)
  submit                send the intake (review step)
  status                save status and audit id
  show                  redraw the current step
  reset                 discard the draft and start over
  help                  this text
  quit                  save and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Goal(String),
    Tier(String),
    Mode(String),
    Next,
    Back,
    Goto(usize),
    Submit,
    Status,
    Show,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// What the terminal should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the current step, with field messages from a failed "continue".
    Screen { errors: Option<ValidationErrors> },
    Text(String),
    Quit,
}

impl Reply {
    fn screen() -> Self {
        Reply::Screen { errors: None }
    }
}

fn rest_required(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest.to_string())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Ok(Command::Set {
                    field: field.to_ascii_lowercase(),
                    value: value.to_string(),
                })
            }
            "goal" => Ok(Command::Goal(rest_required(rest, "goal <n|name>")?)),
            "tier" => Ok(Command::Tier(rest_required(rest, "tier <name>")?)),
            "mode" => Ok(Command::Mode(rest_required(
                rest,
                "mode <audit|subscription>",
            )?)),
            "next" | "continue" => Ok(Command::Next),
            "back" => Ok(Command::Back),
            "goto" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=WizardStep::ALL.len()).contains(n))
                .map(Command::Goto)
                .ok_or(CommandError::Usage("goto <1-5>")),
            "submit" => Ok(Command::Submit),
            "status" => Ok(Command::Status),
            "show" => Ok(Command::Show),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute one command.
pub async fn execute(session: &WizardSession, command: Command) -> Result<Reply, CommandError> {
    let store = session.store();
    debug!(?command, "executing wizard command");

    match command {
        Command::Set { field, value } => {
            let step = store.with(|s| s.current());
            view_for(step).apply(store, &session.auth_state(), &field, &value)?;
            Ok(Reply::screen())
        }
        Command::Goal(goal) => {
            view_for(WizardStep::Goals).apply(store, &session.auth_state(), "goal", &goal)?;
            Ok(Reply::screen())
        }
        Command::Tier(tier) => {
            view_for(WizardStep::Plan).apply(store, &session.auth_state(), "tier", &tier)?;
            Ok(Reply::screen())
        }
        Command::Mode(mode) => {
            view_for(WizardStep::Plan).apply(store, &session.auth_state(), "mode", &mode)?;
            Ok(Reply::screen())
        }
        Command::Next => {
            let (step, errors) =
                store.with(|s| (s.current(), validate_step(s.current(), &s.account, &s.form)));
            if !errors.is_empty() {
                return Ok(Reply::Screen {
                    errors: Some(errors),
                });
            }
            if step == WizardStep::LAST {
                return Ok(Reply::Text(
                    "This is the last step; type `submit` to send your intake.".to_string(),
                ));
            }
            store.next();
            Ok(Reply::screen())
        }
        Command::Back => {
            store.back();
            Ok(Reply::screen())
        }
        Command::Goto(n) => {
            let target = n.saturating_sub(1);
            let max = store.with(|s| s.max_step_visited);
            store.jump_to(target);
            if StepNavigator::is_reachable(target, max) {
                Ok(Reply::screen())
            } else {
                Ok(Reply::Text(format!(
                    "Step {n} has not been reached yet; finish the current step first."
                )))
            }
        }
        Command::Submit => submit(session).await,
        Command::Status => Ok(Reply::Text(status_text(session))),
        Command::Show => Ok(Reply::screen()),
        Command::Reset => {
            session.discard_draft().await;
            Ok(Reply::screen())
        }
        Command::Help => Ok(Reply::Text(HELP.to_string())),
        Command::Quit => Ok(Reply::Quit),
    }
}

async fn submit(session: &WizardSession) -> Result<Reply, CommandError> {
    let store = session.store();
    if !store.with(StepNavigator::is_terminal) {
        return Ok(Reply::Text(
            "Submit is available on the review step.".to_string(),
        ));
    }

    match session.submit().await {
        Ok(receipt) => {
            info!(audit_id = %receipt.audit_id.as_str(), created = receipt.created, "intake submitted");
            Ok(Reply::Text(format!(
                "Submitted. Audit ID: {}",
                receipt.audit_id.as_str()
            )))
        }
        Err(SubmitError::Incomplete { step, errors }) => {
            store.jump_to(step.index());
            Ok(Reply::Screen {
                errors: Some(errors),
            })
        }
        Err(err) => Ok(Reply::Text(format!("Submit failed: {err}"))),
    }
}

fn status_text(session: &WizardSession) -> String {
    let state = session.store().state();
    let auth = session.auth_state();
    let mut lines = vec![format!("Save status: {}", SaveStatus::of(&state).label())];
    if let Some(error) = &state.save_error {
        lines.push(format!("Last error: {error}"));
    }
    lines.push(format!(
        "Audit ID: {}",
        state.audit_id.as_ref().map_or("—", |id| id.as_str())
    ));
    lines.push(format!(
        "Signed in: {}",
        if auth.is_authenticated { "yes" } else { "no" }
    ));
    lines.join("\n")
}
