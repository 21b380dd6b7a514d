use async_trait::async_trait;

use super::errors::ApiError;
use crate::auth::{AuthSession, Credentials};
use crate::wizard::Account;

/// Backend authentication endpoints.
#[async_trait]
pub trait AuthApiPort: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError>;

    /// `POST /auth/register` with the full account.
    async fn register(&self, account: &Account) -> Result<AuthSession, ApiError>;
}
