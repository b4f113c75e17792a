//! Error types for the popup controller.

/// Top-level error type.
///
/// Nothing above the orchestrator ever sees one of these — every
/// externally-triggered failure is converted into a rendered state at
/// the boundary of the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Identity-provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The identity service reported a failure. Carries the provider's
    /// message verbatim for display.
    #[error("{message}")]
    Provider { message: String },

    #[error("identity provider returned an empty token")]
    EmptyToken,
}

/// Errors from the digest backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Local sanity check tripped before any network call. A guard
    /// against programming errors, not a security check.
    #[error("bearer token failed sanity check ({length} chars, minimum {minimum})")]
    TokenTooShort { length: usize, minimum: usize },

    /// The backend returned an explicit error payload. Usually an
    /// expired token or missing server-side configuration.
    #[error("{message}")]
    Backend { message: String },

    /// Transport failure: non-success status or unparseable body.
    #[error("{reason}")]
    Network { reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network {
            reason: e.to_string(),
        }
    }
}

/// Result type alias for the popup controller.
pub type Result<T> = std::result::Result<T, Error>;
