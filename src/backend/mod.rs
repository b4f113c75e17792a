//! Backend HTTP API boundary.

pub mod http;

pub use http::{HealthStatus, HttpBackend};

use async_trait::async_trait;

use crate::auth::Token;
use crate::digest::Email;
use crate::error::ApiError;

/// Cheap sanity floor for bearer tokens. Guards against empty or
/// obviously-truncated tokens before any network call — not a security
/// check.
pub const MIN_TOKEN_LEN: usize = 10;

/// Validate the token sanity floor.
pub fn check_token(token: &Token) -> Result<(), ApiError> {
    if token.len() < MIN_TOKEN_LEN {
        return Err(ApiError::TokenTooShort {
            length: token.len(),
            minimum: MIN_TOKEN_LEN,
        });
    }
    Ok(())
}

/// The backend service that prioritizes unread mail and answers
/// questions about it.
///
/// Pure I/O — no session state. The orchestrator owns all sequencing.
#[async_trait]
pub trait DigestBackend: Send + Sync {
    /// Fetch the prioritized unread digest.
    ///
    /// An empty list is a successful result, distinct from every error,
    /// so the caller can render "all caught up" instead of a failure.
    async fn fetch_unread(&self, token: &Token) -> Result<Vec<Email>, ApiError>;

    /// Mark one email as read. The response body is ignored — only
    /// completion or failure matters.
    async fn mark_read(&self, token: &Token, email_id: &str) -> Result<(), ApiError>;

    /// Answer a free-form question using the given emails as context.
    async fn ask(&self, question: &str, context: &[Email]) -> Result<String, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_token_boundary() {
        assert!(check_token(&Token::new("123456789")).is_err()); // 9 chars
        assert!(check_token(&Token::new("1234567890")).is_ok()); // 10 chars
    }

    #[test]
    fn check_token_error_carries_lengths() {
        let err = check_token(&Token::new("abc")).unwrap_err();
        match err {
            ApiError::TokenTooShort { length, minimum } => {
                assert_eq!(length, 3);
                assert_eq!(minimum, MIN_TOKEN_LEN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
