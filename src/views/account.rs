use intake_app::usecases::SSO_PASSWORD;
use intake_app::WizardStore;
use intake_core::{AccountPatch, AuthState, Field, WizardState, WizardStep};

use super::{field_line, line, StepView, ViewContext, ViewError};

pub struct AccountView;

/// Signed in through SSO: the password is a placeholder and cannot be edited.
fn is_sso(state: &WizardState, auth: &AuthState) -> bool {
    auth.is_authenticated && state.account.password == SSO_PASSWORD
}

impl StepView for AccountView {
    fn step(&self) -> WizardStep {
        WizardStep::Account
    }

    fn fields(&self) -> &'static [&'static str] {
        &["first_name", "last_name", "email", "password"]
    }

    fn render(&self, cx: &ViewContext<'_>, out: &mut String) {
        let account = &cx.state.account;
        line(out, "Create your portal account");
        field_line(out, cx, "First name", &account.first_name, Some(Field::FirstName));
        field_line(out, cx, "Last name", &account.last_name, Some(Field::LastName));
        field_line(out, cx, "Email", &account.email, Some(Field::Email));

        if is_sso(cx.state, cx.auth) {
            line(out, "  Password: signed in with Google, no password needed");
        } else {
            let masked = "*".repeat(account.password.chars().count());
            field_line(out, cx, "Password", &masked, Some(Field::Password));
        }
    }

    fn apply(
        &self,
        store: &WizardStore,
        auth: &AuthState,
        field: &str,
        value: &str,
    ) -> Result<(), ViewError> {
        let value = Some(value.to_string());
        let patch = match field {
            "first_name" | "first" => AccountPatch {
                first_name: value,
                ..Default::default()
            },
            "last_name" | "last" => AccountPatch {
                last_name: value,
                ..Default::default()
            },
            "email" => AccountPatch {
                email: value,
                ..Default::default()
            },
            "password" => {
                if store.with(|s| is_sso(s, auth)) {
                    return Err(ViewError::Disabled(
                        "Password is managed by your Google sign-in",
                    ));
                }
                AccountPatch {
                    password: value,
                    ..Default::default()
                }
            }
            other => return Err(self.unknown_field(other)),
        };
        store.update_account(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support;
    use intake_core::AuthSession;

    fn sso_auth() -> AuthState {
        AuthState::authenticated(AuthSession {
            token: Some("tok".into()),
            user_id: None,
        })
    }

    #[test]
    fn test_apply_updates_account_fields() {
        let store = test_support::store();
        let auth = AuthState::default();

        AccountView.apply(&store, &auth, "first_name", "Ada").unwrap();
        AccountView.apply(&store, &auth, "last", "Lovelace").unwrap();
        AccountView.apply(&store, &auth, "email", "ada@example.com").unwrap();
        AccountView.apply(&store, &auth, "password", "hunter2").unwrap();

        let account = store.state().account;
        assert_eq!(account.contact_name(), "Ada Lovelace");
        assert_eq!(account.email, "ada@example.com");
        assert_eq!(account.password, "hunter2");
    }

    #[test]
    fn test_password_is_masked() {
        let store = test_support::store();
        let auth = AuthState::default();
        AccountView.apply(&store, &auth, "password", "hunter2").unwrap();
        let state = store.state();

        let mut out = String::new();
        AccountView.render(
            &ViewContext {
                state: &state,
                auth: &auth,
                errors: None,
            },
            &mut out,
        );

        assert!(out.contains("Password: *******"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_sso_account_cannot_change_password() {
        let store = test_support::store();
        let auth = sso_auth();
        store.update_account(AccountPatch {
            password: Some(SSO_PASSWORD.to_string()),
            ..Default::default()
        });

        let err = AccountView
            .apply(&store, &auth, "password", "new-secret")
            .unwrap_err();

        assert!(matches!(err, ViewError::Disabled(_)));
        assert_eq!(store.state().account.password, SSO_PASSWORD);

        let state = store.state();
        let mut out = String::new();
        AccountView.render(
            &ViewContext {
                state: &state,
                auth: &auth,
                errors: None,
            },
            &mut out,
        );
        assert!(out.contains("signed in with Google"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let store = test_support::store();
        let err = AccountView
            .apply(&store, &AuthState::default(), "website", "x")
            .unwrap_err();
        assert!(matches!(err, ViewError::UnknownField { .. }));
    }
}
