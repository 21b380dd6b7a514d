//! Authentication state machine.
//!
//! Defines a pure state transition function for the login-then-register chain.

use super::state::AuthSession;

/// Which attempt of the chain is in flight.
///
/// 当前正在进行的认证尝试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStage {
    /// Logging in with the wizard credentials.
    ///
    /// 使用向导凭据登录。
    Login,
    /// Login was rejected; registering the account.
    ///
    /// 登录被拒绝，正在注册账户。
    Register { login_failure: String },
}

/// Authentication phase.
///
/// 认证阶段。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session.
    ///
    /// 未认证。
    #[default]
    Unauthenticated,
    /// A chain attempt is running.
    ///
    /// 认证进行中。
    Authenticating(AuthStage),
    /// A session is available.
    ///
    /// 已认证。
    Authenticated,
}

/// Outcome of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success(AuthSession),
    Failure(String),
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterResult {
    Success(AuthSession),
    Failure(String),
}

/// Events that drive the authentication flow.
///
/// 驱动认证流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A sync cycle needs a session.
    ///
    /// 同步周期需要会话。
    Begin,
    /// Login finished.
    ///
    /// 登录完成。
    Login(LoginResult),
    /// Registration finished.
    ///
    /// 注册完成。
    Register(RegisterResult),
    /// Session loaded from local storage.
    ///
    /// 从本地存储恢复会话。
    Restore(AuthSession),
    /// Session handed over by an external sign-in (SSO callback).
    ///
    /// 外部登录（SSO 回调）移交的会话。
    Adopt(AuthSession),
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Call the login endpoint.
    ///
    /// 调用登录接口。
    AttemptLogin,
    /// Call the registration endpoint.
    ///
    /// 调用注册接口。
    AttemptRegister,
    /// Store the session in memory and local storage.
    ///
    /// 保存会话到内存和本地存储。
    PersistSession(AuthSession),
    /// Both attempts failed.
    ///
    /// 两次尝试均失败。
    ReportFailure { login: String, register: String },
}

/// Pure authentication state machine.
///
/// 纯状态机：不包含副作用。
pub struct AuthStateMachine;

impl AuthStateMachine {
    pub fn transition(state: AuthPhase, event: AuthEvent) -> (AuthPhase, Vec<AuthAction>) {
        match (state, event) {
            (_, AuthEvent::Restore(_)) => (AuthPhase::Authenticated, Vec::new()),
            (_, AuthEvent::Adopt(session)) => (
                AuthPhase::Authenticated,
                vec![AuthAction::PersistSession(session)],
            ),
            (AuthPhase::Unauthenticated, AuthEvent::Begin) => (
                AuthPhase::Authenticating(AuthStage::Login),
                vec![AuthAction::AttemptLogin],
            ),
            (
                AuthPhase::Authenticating(AuthStage::Login),
                AuthEvent::Login(LoginResult::Success(session)),
            ) => (
                AuthPhase::Authenticated,
                vec![AuthAction::PersistSession(session)],
            ),
            (
                AuthPhase::Authenticating(AuthStage::Login),
                AuthEvent::Login(LoginResult::Failure(reason)),
            ) => (
                AuthPhase::Authenticating(AuthStage::Register {
                    login_failure: reason,
                }),
                vec![AuthAction::AttemptRegister],
            ),
            (
                AuthPhase::Authenticating(AuthStage::Register { .. }),
                AuthEvent::Register(RegisterResult::Success(session)),
            ) => (
                AuthPhase::Authenticated,
                vec![AuthAction::PersistSession(session)],
            ),
            (
                AuthPhase::Authenticating(AuthStage::Register { login_failure }),
                AuthEvent::Register(RegisterResult::Failure(reason)),
            ) => (
                AuthPhase::Unauthenticated,
                vec![AuthAction::ReportFailure {
                    login: login_failure,
                    register: reason,
                }],
            ),
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user: &str) -> AuthSession {
        AuthSession {
            token: Some(format!("token-{user}")),
            user_id: Some(user.into()),
        }
    }

    #[test]
    fn auth_state_machine_begin_attempts_login() {
        let (next, actions) =
            AuthStateMachine::transition(AuthPhase::Unauthenticated, AuthEvent::Begin);
        assert_eq!(next, AuthPhase::Authenticating(AuthStage::Login));
        assert_eq!(actions, vec![AuthAction::AttemptLogin]);
    }

    #[test]
    fn auth_state_machine_login_success_persists_session() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Authenticating(AuthStage::Login),
            AuthEvent::Login(LoginResult::Success(session("u1"))),
        );
        assert_eq!(next, AuthPhase::Authenticated);
        assert_eq!(actions, vec![AuthAction::PersistSession(session("u1"))]);
    }

    #[test]
    fn auth_state_machine_login_failure_falls_back_to_register() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Authenticating(AuthStage::Login),
            AuthEvent::Login(LoginResult::Failure("Invalid credentials".into())),
        );
        assert_eq!(
            next,
            AuthPhase::Authenticating(AuthStage::Register {
                login_failure: "Invalid credentials".into()
            })
        );
        assert_eq!(actions, vec![AuthAction::AttemptRegister]);
    }

    #[test]
    fn auth_state_machine_register_failure_reports_both_reasons() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Authenticating(AuthStage::Register {
                login_failure: "Invalid credentials".into(),
            }),
            AuthEvent::Register(RegisterResult::Failure("Email taken".into())),
        );
        assert_eq!(next, AuthPhase::Unauthenticated);
        assert_eq!(
            actions,
            vec![AuthAction::ReportFailure {
                login: "Invalid credentials".into(),
                register: "Email taken".into(),
            }]
        );
    }

    #[test]
    fn auth_state_machine_register_success_authenticates() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Authenticating(AuthStage::Register {
                login_failure: "nope".into(),
            }),
            AuthEvent::Register(RegisterResult::Success(session("u1"))),
        );
        assert_eq!(next, AuthPhase::Authenticated);
        assert_eq!(actions, vec![AuthAction::PersistSession(session("u1"))]);
    }

    #[test]
    fn auth_state_machine_begin_when_authenticated_is_noop() {
        let (next, actions) =
            AuthStateMachine::transition(AuthPhase::Authenticated, AuthEvent::Begin);
        assert_eq!(next, AuthPhase::Authenticated);
        assert!(actions.is_empty());
    }

    #[test]
    fn auth_state_machine_restore_does_not_persist_again() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Unauthenticated,
            AuthEvent::Restore(session("u1")),
        );
        assert_eq!(next, AuthPhase::Authenticated);
        assert!(actions.is_empty());
    }

    #[test]
    fn auth_state_machine_ignores_out_of_order_results() {
        let (next, actions) = AuthStateMachine::transition(
            AuthPhase::Unauthenticated,
            AuthEvent::Register(RegisterResult::Success(session("u1"))),
        );
        assert_eq!(next, AuthPhase::Unauthenticated);
        assert!(actions.is_empty());
    }
}
