//! Backend HTTP client
//!
//! Implements both backend ports over one `reqwest::Client`:
//!
//! - `POST {base}/auth/login`
//! - `POST {base}/auth/register`
//! - `POST {base}/v1/audits/intakes`
//! - `PATCH {base}/v1/audits/intakes/{id}` (`application/merge-patch+json`)

use std::time::Duration;

use async_trait::async_trait;
use intake_core::ports::{ApiError, AuthApiPort, IntakeApiPort};
use intake_core::{Account, AuditId, AuthSession, Credentials, IntakePayload, UserId};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

pub struct HttpIntakeClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIntakeClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(response, fallback).await
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Read the body as JSON; non-2xx becomes [`ApiError::Status`] with the body's
/// `error` field, or `fallback` when there is none. An empty 2xx body is `null`.
async fn read_json(response: Response, fallback: &str) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        debug!(status = status.as_u16(), %message, "backend returned error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{fallback}: {e}")))
}

/// Ids arrive as strings or numbers depending on the backend version.
fn id_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn token_of(value: &Value) -> Option<String> {
    value
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AuthApiPort for HttpIntakeClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        let request = self.client.post(self.url("/auth/login")).json(&LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        });
        let body = self
            .send(request, "Login failed")
            .instrument(info_span!("http.auth.login"))
            .await?;

        Ok(AuthSession {
            token: token_of(&body),
            user_id: id_at(&body, "/user/id").map(UserId::from),
        })
    }

    async fn register(&self, account: &Account) -> Result<AuthSession, ApiError> {
        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(&RegisterRequest {
                email: &account.email,
                password: &account.password,
                first_name: &account.first_name,
                last_name: &account.last_name,
            });
        let body = self
            .send(request, "Registration failed")
            .instrument(info_span!("http.auth.register"))
            .await?;

        let user_id = id_at(&body, "/id").or_else(|| id_at(&body, "/user/id"));
        Ok(AuthSession {
            token: token_of(&body),
            user_id: user_id.map(UserId::from),
        })
    }
}

#[async_trait]
impl IntakeApiPort for HttpIntakeClient {
    async fn create_intake(
        &self,
        payload: &IntakePayload,
        token: Option<&str>,
    ) -> Result<AuditId, ApiError> {
        let request = with_bearer(
            self.client.post(self.url("/v1/audits/intakes")).json(payload),
            token,
        );
        let body = self
            .send(request, "Failed to create audit")
            .instrument(info_span!("http.intake.create"))
            .await?;

        id_at(&body, "/id")
            .map(AuditId::from)
            .ok_or_else(|| ApiError::Decode("Failed to create audit: response has no id".into()))
    }

    async fn update_intake(
        &self,
        audit_id: &AuditId,
        payload: &IntakePayload,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ApiError::Decode(format!("Failed to update audit: {e}")))?;
        let request = with_bearer(
            self.client
                .patch(self.url(&format!("/v1/audits/intakes/{audit_id}")))
                .header(CONTENT_TYPE, MERGE_PATCH_JSON)
                .body(body),
            token,
        );
        self.send(request, "Failed to update audit")
            .instrument(info_span!("http.intake.update", audit_id = %audit_id))
            .await?;
        Ok(())
    }
}
