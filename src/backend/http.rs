//! reqwest-backed implementation of [`DigestBackend`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::Token;
use crate::backend::{DigestBackend, check_token};
use crate::config::PopupConfig;
use crate::digest::Email;
use crate::error::ApiError;

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct UnreadResponse {
    #[serde(default)]
    emails: Vec<Email>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct MarkReadRequest<'a> {
    email_id: &'a str,
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
    emails: &'a [Email],
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Backend health report, as served by `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_provider: Option<String>,
    #[serde(default)]
    pub api_key_configured: bool,
}

// ── Client ──────────────────────────────────────────────────────────

/// HTTP client for the digest backend.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(config: &PopupConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Ping the backend's health endpoint. Informational only — the
    /// binary logs the result at startup.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let resp = self.client.get(self.url("/api/health")).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Network {
                reason: format!("health check returned status {}", resp.status()),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl DigestBackend for HttpBackend {
    async fn fetch_unread(&self, token: &Token) -> Result<Vec<Email>, ApiError> {
        check_token(token)?;

        let resp = self
            .client
            .get(self.url("/api/unread-emails"))
            .bearer_auth(token.expose())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Network {
                reason: format!("server responded with status {status}"),
            });
        }

        let body: UnreadResponse = resp.json().await?;
        if let Some(message) = body.error {
            return Err(ApiError::Backend { message });
        }
        Ok(body.emails)
    }

    async fn mark_read(&self, token: &Token, email_id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/api/mark-read"))
            .bearer_auth(token.expose())
            .json(&MarkReadRequest { email_id })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Network {
                reason: format!("server responded with status {status}"),
            });
        }
        Ok(())
    }

    async fn ask(&self, question: &str, context: &[Email]) -> Result<String, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/ask-question"))
            .json(&AskRequest {
                question,
                emails: context,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Network {
                reason: format!("server responded with status {status}"),
            });
        }

        let body: AskResponse = resp.json().await?;
        if let Some(message) = body.error {
            return Err(ApiError::Backend { message });
        }
        body.answer.ok_or_else(|| ApiError::Network {
            reason: "malformed response: missing answer".to_string(),
        })
    }
}
