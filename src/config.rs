//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Popup controller configuration.
#[derive(Debug, Clone)]
pub struct PopupConfig {
    /// Base URL of the digest backend.
    pub api_url: String,
    /// Hard cap on each HTTP round-trip.
    pub request_timeout: Duration,
    /// Fade-out delay before a marked-read card is removed.
    pub removal_delay: Duration,
    /// Where to write the popup body as an HTML fragment after each
    /// render, if anywhere.
    pub html_snapshot: Option<PathBuf>,
    /// Canned questions offered alongside the free-form chat input.
    pub suggested_questions: Vec<String>,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            removal_delay: Duration::from_millis(300),
            html_snapshot: None,
            suggested_questions: vec![
                "Which of these emails should I answer first?".to_string(),
                "Summarize everything marked urgent.".to_string(),
                "Do any of these emails mention a deadline?".to_string(),
            ],
        }
    }
}

impl PopupConfig {
    /// Build from `INBOX_PILOT_*` environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url =
            std::env::var("INBOX_PILOT_API_URL").unwrap_or(defaults.api_url);

        let request_timeout = std::env::var("INBOX_PILOT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let removal_delay = std::env::var("INBOX_PILOT_REMOVAL_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.removal_delay);

        let html_snapshot = std::env::var("INBOX_PILOT_SNAPSHOT")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            api_url,
            request_timeout,
            removal_delay,
            html_snapshot,
            suggested_questions: defaults.suggested_questions,
        }
    }
}
