//! Rendering surface — the popup's page, kept behind a trait so the
//! orchestrator stays testable without any UI.
//!
//! Implementations are pure presentation: no sequencing, no state
//! beyond what they need to draw.

use crate::digest::{EmailCard, ErrorView};
use crate::session::ChatMessage;

/// Text shown for the transient chat placeholder while a question is in
/// flight.
pub const THINKING_TEXT: &str = "Thinking…";

/// The rendering/event surface the orchestrator draws on.
pub trait PopupSurface: Send {
    /// Enter the loading state: digest hidden, spinner visible.
    fn show_loading(&mut self);

    /// Render the card list.
    fn show_digest(&mut self, cards: &[EmailCard]);

    /// Render the "all caught up" state.
    fn show_empty(&mut self);

    /// Render a full-panel error.
    fn show_error(&mut self, view: &ErrorView);

    /// Remove one card after its fade-out.
    fn remove_card(&mut self, email_id: &str);

    /// Enable or disable the chat input and send controls.
    fn set_chat_enabled(&mut self, enabled: bool);

    /// Show or clear the transient "Thinking…" placeholder. The
    /// placeholder is surface-only; it never enters the transcript.
    fn set_thinking(&mut self, thinking: bool);

    /// The transcript changed; redraw it.
    fn transcript_updated(&mut self, transcript: &[ChatMessage]);
}
