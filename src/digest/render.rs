//! HTML fragments for the popup body.
//!
//! Pure templating over already-escaped view models; the rendering
//! surface decides where the fragments go (the bundled terminal surface
//! writes them to a snapshot file).

use crate::digest::card::{EmailCard, ErrorView};

/// The loading indicator shown while the digest is being fetched.
pub fn loading_html() -> String {
    r#"<div class="loading">Loading your digest…</div>"#.to_string()
}

/// The full card list.
pub fn digest_html(cards: &[EmailCard]) -> String {
    cards.iter().map(card_html).collect::<Vec<_>>().join("\n")
}

/// One email card. All interpolated text is pre-escaped by the
/// view-model builder except `badge`/`css_class`, which are static.
pub fn card_html(card: &EmailCard) -> String {
    format!(
        r#"<div class="email-card {class}" data-id="{id}">
  <span class="priority-badge">{badge}</span>
  <div class="email-subject">{subject}</div>
  <div class="email-sender">From: {sender}</div>
  <div class="email-summary">{summary}</div>
  <div class="email-reason">📌 {reason}</div>
</div>"#,
        class = card.tier.css_class(),
        id = card.id,
        badge = card.badge(),
        subject = card.subject,
        sender = card.sender,
        summary = card.summary,
        reason = card.reason,
    )
}

/// The "all caught up" panel for an empty digest.
pub fn empty_html() -> String {
    r#"<div class="no-emails">
  <h3>All caught up!</h3>
  <p>No unread emails at the moment.</p>
</div>"#
        .to_string()
}

/// A full-panel error with its static hint. The view's message is
/// already escaped.
pub fn error_html(view: &ErrorView) -> String {
    format!(
        r#"<div class="error">
  <strong>{heading}:</strong> {message}
  <p>{hint}</p>
</div>"#,
        heading = view.heading,
        message = view.message,
        hint = view.hint,
    )
}
