//! Digest entities as served by the backend.

use serde::{Deserialize, Serialize};

/// A prioritized unread email.
///
/// Server-provided and immutable on the client apart from removal. All
/// text fields are untrusted — they must go through
/// [`escape_html`](super::card::escape_html) before any rendering.
/// Serialized back out verbatim as chat context on ask-question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Opaque identifier, unique within a session.
    pub id: String,
    pub subject: String,
    pub sender: String,
    /// One-line summary produced by the backend's analysis.
    pub summary: String,
    /// Why the backend ranked it where it did.
    pub reason: String,
    /// Priority score in `[0, 10]`.
    pub priority: u8,
}
