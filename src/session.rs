//! Session state — the email list, UI phase, and chat transcript for one
//! popup activation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::Email;

/// UI phase of the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiPhase {
    /// Fetch in progress. Initial phase, entered again on every refresh.
    Loading,
    /// Digest rendered; chat is available only here.
    ShowingEmails,
    /// Fetch succeeded with zero emails.
    Empty,
    /// A load-path failure was rendered.
    Error,
}

impl UiPhase {
    /// Check if this phase allows transitioning to another phase.
    ///
    /// Refresh re-enters `Loading` from anywhere; `Loading` resolves to
    /// any of the three terminal renderings. There is no other edge.
    pub fn can_transition_to(&self, target: UiPhase) -> bool {
        use UiPhase::*;

        matches!(
            (self, target),
            (_, Loading) | (Loading, ShowingEmails) | (Loading, Empty) | (Loading, Error)
        )
    }
}

impl std::fmt::Display for UiPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Loading => "loading",
            Self::ShowingEmails => "showing_emails",
            Self::Empty => "empty",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Chat participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatRole {
    User,
    Assistant,
    AssistantError,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Process-wide state for one popup activation.
///
/// Owned by the orchestrator and passed by reference to the few
/// operations that need it: the fetcher replaces the list, mark-read
/// removes from it, the chat reads it as context and appends to the
/// transcript. A fresh activation builds a fresh `SessionState`, which
/// is the only thing that clears the transcript.
#[derive(Debug)]
pub struct SessionState {
    emails: Vec<Email>,
    phase: UiPhase,
    transcript: Vec<ChatMessage>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            emails: Vec::new(),
            phase: UiPhase::Loading,
            transcript: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UiPhase {
        self.phase
    }

    /// Transition to a new phase.
    pub fn set_phase(&mut self, next: UiPhase) -> Result<(), String> {
        if !self.phase.can_transition_to(next) {
            return Err(format!("cannot transition from {} to {next}", self.phase));
        }
        self.phase = next;
        Ok(())
    }

    /// Emails in server response order.
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Replace the list with a fresh fetch result.
    pub fn replace_emails(&mut self, emails: Vec<Email>) {
        self.emails = emails;
    }

    /// Remove one email by id. Removing an absent id is a no-op.
    /// Returns whether anything was removed.
    pub fn remove_email(&mut self, id: &str) -> bool {
        let before = self.emails.len();
        self.emails.retain(|e| e.id != id);
        self.emails.len() != before
    }

    /// Append-only chat transcript, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }
}
