//! Auth Bridge
//!
//! Ensures a backend session exists before a sync cycle. Drives the pure
//! [`AuthStateMachine`] and executes its actions: login, register fallback,
//! persisting the session and reporting a double failure.

use std::sync::Arc;

use intake_core::auth::{AuthAction, AuthEvent, AuthStateMachine, LoginResult, RegisterResult};
use intake_core::ports::{AuthApiPort, LocalStoragePort};
use intake_core::{Account, AuthPhase, AuthSession, AuthState, Credentials};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, info_span, warn, Instrument};

/// Local storage key of the persisted [`AuthState`].
pub const AUTH_SNAPSHOT_KEY: &str = "audit-wizard.auth.v1";

/// Message shown in the save badge when both login and registration fail.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please check your credentials.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{}", AUTH_FAILED_MESSAGE)]
    Rejected { login: String, register: String },
    #[error("authentication did not reach a session")]
    Incomplete,
}

pub struct AuthBridge {
    api: Arc<dyn AuthApiPort>,
    storage: Arc<dyn LocalStoragePort>,
    state: watch::Sender<AuthState>,
    // Held for a whole chain so concurrent callers never log in twice.
    phase: Mutex<AuthPhase>,
}

impl AuthBridge {
    pub fn new(api: Arc<dyn AuthApiPort>, storage: Arc<dyn LocalStoragePort>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            storage,
            state,
            phase: Mutex::new(AuthPhase::default()),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Load the persisted session. Missing or corrupt data leaves the bridge
    /// unauthenticated.
    pub async fn restore(&self) -> bool {
        let raw = match self.storage.get_item(AUTH_SNAPSHOT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, "failed to read auth state");
                return false;
            }
        };
        let restored = match serde_json::from_str::<AuthState>(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "corrupt auth state; starting unauthenticated");
                return false;
            }
        };
        let Some(session) = restored.session() else {
            return false;
        };

        let mut phase = self.phase.lock().await;
        self.drive(&mut phase, AuthEvent::Restore(session.clone()), None).await;
        self.state.send_replace(AuthState::authenticated(session));
        debug!("auth state restored");
        true
    }

    /// Return the current session, running login then register when there is none.
    pub async fn ensure_session(&self, account: &Account) -> Result<AuthSession, AuthError> {
        let mut phase = self.phase.lock().await;
        let existing = self.state.borrow().session();
        if let Some(session) = existing {
            return Ok(session);
        }
        if *phase != AuthPhase::Unauthenticated {
            // A chain interrupted mid-flight leaves the phase behind.
            debug!(phase = ?*phase, "resetting stale auth phase");
            *phase = AuthPhase::Unauthenticated;
        }

        let span = info_span!("usecase.auth_bridge.ensure_session", email = %account.email);
        self.drive(&mut phase, AuthEvent::Begin, Some(account))
            .instrument(span)
            .await
            .unwrap_or(Err(AuthError::Incomplete))
    }

    /// Accept a session obtained outside the login chain (SSO callback).
    pub async fn adopt_external_session(&self, session: AuthSession) {
        let mut phase = self.phase.lock().await;
        self.drive(&mut phase, AuthEvent::Adopt(session), None).await;
    }

    /// Run the state machine until no follow-up event remains.
    ///
    /// Returns the chain's outcome when an action produced one.
    async fn drive(
        &self,
        phase: &mut AuthPhase,
        event: AuthEvent,
        account: Option<&Account>,
    ) -> Option<Result<AuthSession, AuthError>> {
        let mut outcome = None;
        let mut pending = vec![event];

        while let Some(event) = pending.pop() {
            let from = phase.clone();
            let (next, actions) = AuthStateMachine::transition(from.clone(), event);
            info!(from = ?from, to = ?next, "auth state transition");
            *phase = next;

            for action in actions {
                match action {
                    AuthAction::AttemptLogin => {
                        let result = match account {
                            Some(account) => self.login(account).await,
                            None => LoginResult::Failure("no account to log in with".into()),
                        };
                        pending.push(AuthEvent::Login(result));
                    }
                    AuthAction::AttemptRegister => {
                        let result = match account {
                            Some(account) => self.register(account).await,
                            None => RegisterResult::Failure("no account to register".into()),
                        };
                        pending.push(AuthEvent::Register(result));
                    }
                    AuthAction::PersistSession(session) => {
                        self.persist(&session).await;
                        outcome = Some(Ok(session));
                    }
                    AuthAction::ReportFailure { login, register } => {
                        warn!(
                            login_error = %login,
                            register_error = %register,
                            "login and registration both failed"
                        );
                        outcome = Some(Err(AuthError::Rejected { login, register }));
                    }
                }
            }
        }

        outcome
    }

    async fn login(&self, account: &Account) -> LoginResult {
        match self.api.login(&Credentials::from(account)).await {
            Ok(session) => {
                debug!("login succeeded");
                LoginResult::Success(session)
            }
            Err(err) => {
                info!(error = %err, "login rejected; falling back to registration");
                LoginResult::Failure(err.to_string())
            }
        }
    }

    async fn register(&self, account: &Account) -> RegisterResult {
        match self.api.register(account).await {
            Ok(session) => {
                debug!("registration succeeded");
                RegisterResult::Success(session)
            }
            Err(err) => RegisterResult::Failure(err.to_string()),
        }
    }

    async fn persist(&self, session: &AuthSession) {
        let state = AuthState::authenticated(session.clone());
        match serde_json::to_string(&state) {
            Ok(raw) => {
                if let Err(err) = self.storage.set_item(AUTH_SNAPSHOT_KEY, &raw).await {
                    warn!(error = %err, "failed to persist auth state");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize auth state"),
        }
        self.state.send_replace(state);
    }
}
