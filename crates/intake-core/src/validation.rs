//! Per-step input validation
//!
//! The store's `next()` is unconditional; these checks gate the "continue"
//! action in the view layer and the final submit.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::wizard::{Account, IntakeForm, WizardStep};

/// A validated input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    CompanyName,
    Website,
    Industry,
    Goals,
    Tier,
}

impl Field {
    /// Field key as used by the view layer's `set` command.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Password => "password",
            Field::CompanyName => "company_name",
            Field::Website => "website",
            Field::Industry => "industry",
            Field::Goals => "goals",
            Field::Tier => "tier",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-keyed validation messages for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn check(&mut self, field: Field, message: Option<String>) {
        if let Some(message) = message {
            self.errors.insert(field, message);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.errors.values() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn required(value: &str, label: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("{label} is required"))
}

fn url_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:[^@/?#]*@)?[^/?#:@]+(?::\d+)?(?:[/?#].*)?$",
            )
            .ok()
        })
        .as_ref()
}

fn website(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return Some("Website URL is required".to_string());
    }
    let candidate = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    // Without a pattern no URL can be confirmed valid.
    let matches = url_pattern().is_some_and(|pattern| pattern.is_match(&candidate));
    if candidate.chars().any(char::is_whitespace) || !matches {
        return Some("Please enter a valid website URL".to_string());
    }
    None
}

/// Validate the inputs owned by `step`. The review step has no inputs.
pub fn validate_step(step: WizardStep, account: &Account, form: &IntakeForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match step {
        WizardStep::Account => {
            errors.check(Field::FirstName, required(&account.first_name, "First name"));
            errors.check(Field::LastName, required(&account.last_name, "Last name"));
            errors.check(Field::Email, required(&account.email, "Email"));
            errors.check(Field::Password, required(&account.password, "Password"));
        }
        WizardStep::Business => {
            errors.check(Field::CompanyName, required(&form.company_name, "Company name"));
            errors.check(Field::Website, website(&form.website));
            errors.check(Field::Industry, required(&form.industry, "Industry/Niche"));
        }
        WizardStep::Goals => {
            if form.goals.is_empty() {
                errors.check(
                    Field::Goals,
                    Some("Please select at least one goal".to_string()),
                );
            }
        }
        WizardStep::Plan => {
            if form.tier.is_none() {
                errors.check(Field::Tier, Some("Please select a tier".to_string()));
            }
        }
        WizardStep::Review => {}
    }
    errors
}

pub fn is_step_complete(step: WizardStep, account: &Account, form: &IntakeForm) -> bool {
    validate_step(step, account, form).is_empty()
}

/// First step (in order) whose inputs do not validate, with its messages.
pub fn first_incomplete_step(
    account: &Account,
    form: &IntakeForm,
) -> Option<(WizardStep, ValidationErrors)> {
    WizardStep::ALL.into_iter().find_map(|step| {
        let errors = validate_step(step, account, form);
        (!errors.is_empty()).then_some((step, errors))
    })
}
