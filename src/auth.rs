//! Bearer-token acquisition from the external identity provider.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::AuthError;

/// Opaque bearer credential presented on each authenticated request.
///
/// Wraps [`SecretString`] so the raw value never shows up in `Debug`
/// output or logs.
#[derive(Debug, Clone)]
pub struct Token(SecretString);

impl Token {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    /// Raw token text, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn len(&self) -> usize {
        self.0.expose_secret().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single asynchronous operation that yields a bearer token, or fails
/// with a human-readable message from the identity service.
///
/// No retry is attempted here — retry is a user action (refreshing the
/// popup runs a fresh acquisition attempt).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire_token(&self) -> Result<Token, AuthError>;
}

/// Reads the token from an environment variable.
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new("INBOX_PILOT_TOKEN")
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn acquire_token(&self) -> Result<Token, AuthError> {
        match std::env::var(&self.var) {
            Ok(raw) if raw.is_empty() => Err(AuthError::EmptyToken),
            Ok(raw) => Ok(Token::new(raw)),
            Err(_) => Err(AuthError::Provider {
                message: format!("environment variable {} is not set", self.var),
            }),
        }
    }
}

/// Mints a token by running a helper command (e.g. an OAuth CLI that may
/// prompt the user interactively) and using its trimmed stdout.
pub struct CommandTokenProvider {
    program: String,
    args: Vec<String>,
}

impl CommandTokenProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a full command line of the form `program arg1 arg2 …`.
    /// Whitespace-split only — no shell quoting.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

#[async_trait]
impl TokenProvider for CommandTokenProvider {
    async fn acquire_token(&self) -> Result<Token, AuthError> {
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| AuthError::Provider {
                message: format!("failed to run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(AuthError::Provider {
                message: if stderr.is_empty() {
                    format!("{} exited with {}", self.program, output.status)
                } else {
                    stderr.to_string()
                },
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Token::new(token))
    }
}
