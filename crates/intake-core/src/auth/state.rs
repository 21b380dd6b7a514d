use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::wizard::Account;

/// Login credentials taken from the wizard's account step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl From<&Account> for Credentials {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            password: account.password.clone(),
        }
    }
}

/// Session material returned by the backend.
///
/// Registration may not return a token; the session is still considered
/// established and requests are then sent without a bearer header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub token: Option<String>,
    pub user_id: Option<UserId>,
}

/// Persisted authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user_id: Option<UserId>,
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn authenticated(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            is_authenticated: true,
        }
    }

    /// The session this state describes, if it is authenticated.
    pub fn session(&self) -> Option<AuthSession> {
        self.is_authenticated.then(|| AuthSession {
            token: self.token.clone(),
            user_id: self.user_id.clone(),
        })
    }

    pub fn bearer_token(&self) -> Option<&str> {
        if self.is_authenticated {
            self.token.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_state_json_shape() {
        let state = AuthState::authenticated(AuthSession {
            token: Some("t1".into()),
            user_id: Some("u1".into()),
        });
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"token": "t1", "userId": "u1", "isAuthenticated": true})
        );
    }

    #[test]
    fn test_unauthenticated_state_has_no_session_or_bearer() {
        let state = AuthState {
            token: Some("stale".into()),
            ..Default::default()
        };
        assert_eq!(state.session(), None);
        assert_eq!(state.bearer_token(), None);
    }
}
