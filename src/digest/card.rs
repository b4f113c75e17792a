//! View-model construction — pure transformations from entities and
//! errors to renderable data. No network or state access.

use crate::digest::Email;
use crate::error::{ApiError, Error};

/// Derived priority classification. Never stored — always recomputed
/// from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    /// Total mapping from the `[0, 10]` score.
    pub fn from_score(priority: u8) -> Self {
        match priority {
            7.. => Self::High,
            4..=6 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Display label shown on the card badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Urgent",
            Self::Medium => "Important",
            Self::Low => "Normal",
        }
    }

    /// CSS class carried by the card markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::High => "priority-high",
            Self::Medium => "priority-medium",
            Self::Low => "priority-low",
        }
    }
}

/// Renderable card data for one email.
///
/// All text fields are already escaped — safe to splice into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCard {
    pub id: String,
    pub tier: PriorityTier,
    pub priority: u8,
    pub subject: String,
    pub sender: String,
    pub summary: String,
    pub reason: String,
}

impl EmailCard {
    /// Badge text, e.g. `Urgent (8/10)`.
    pub fn badge(&self) -> String {
        format!("{} ({}/10)", self.tier.label(), self.priority)
    }
}

/// Build a renderable card from a raw email.
pub fn to_card(email: &Email) -> EmailCard {
    EmailCard {
        id: email.id.clone(),
        tier: PriorityTier::from_score(email.priority),
        priority: email.priority,
        subject: escape_html(&email.subject),
        sender: escape_html(&email.sender),
        summary: escape_html(&email.summary),
        reason: escape_html(&email.reason),
    }
}

/// Escape the HTML-special characters (`& < > " '`).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renderable full-panel error: heading, escaped message, static hint,
/// and whether the refresh control stays available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub heading: &'static str,
    /// Escaped — the raw provider/backend text is untrusted.
    pub message: String,
    pub hint: &'static str,
    pub show_refresh: bool,
}

const AUTH_HINT: &str =
    "Check that the identity provider is configured with the correct client id, \
     then reopen the popup.";
const BACKEND_HINT: &str =
    "This may mean your token expired or the AI API key is missing on the server.";
const CLIENT_HINT: &str = "If this is a token error, please close the popup and try again.";

impl ErrorView {
    pub fn from_error(err: &Error) -> Self {
        match err {
            // Auth failures hide the refresh affordance: the same
            // provider misconfiguration would recur on retry.
            Error::Auth(e) => Self {
                heading: "Authentication Required/Failed",
                message: escape_html(&e.to_string()),
                hint: AUTH_HINT,
                show_refresh: false,
            },
            Error::Api(ApiError::Backend { message }) => Self {
                heading: "Error from Backend",
                message: escape_html(message),
                hint: BACKEND_HINT,
                show_refresh: true,
            },
            Error::Api(e) => Self {
                heading: "Client-Side Error",
                message: escape_html(&e.to_string()),
                hint: CLIENT_HINT,
                show_refresh: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    fn email(priority: u8) -> Email {
        Email {
            id: "e1".into(),
            subject: "Subject".into(),
            sender: "sender@example.com".into(),
            summary: "Summary".into(),
            reason: "Reason".into(),
            priority,
        }
    }

    #[test]
    fn tier_boundaries() {
        // Explicit boundary cases: 3, 4, 6, 7.
        assert_eq!(PriorityTier::from_score(3), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(4), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(6), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(7), PriorityTier::High);
        // Extremes.
        assert_eq!(PriorityTier::from_score(0), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(10), PriorityTier::High);
    }

    #[test]
    fn tier_labels() {
        assert_eq!(PriorityTier::High.label(), "Urgent");
        assert_eq!(PriorityTier::Medium.label(), "Important");
        assert_eq!(PriorityTier::Low.label(), "Normal");
    }

    #[test]
    fn badge_text() {
        let card = to_card(&email(8));
        assert_eq!(card.badge(), "Urgent (8/10)");
    }

    #[test]
    fn escape_covers_all_special_characters() {
        let escaped = escape_html("<script>alert(\"x\") & 'y'</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        // Every remaining ampersand belongs to an entity we emitted.
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn escape_passes_plain_text_through() {
        assert_eq!(escape_html("plain text 123"), "plain text 123");
    }

    #[test]
    fn to_card_escapes_every_text_field() {
        let mut raw = email(5);
        raw.subject = "<b>bold</b>".into();
        raw.sender = "a<b@example.com".into();
        raw.summary = "1 > 0".into();
        raw.reason = "\"quoted\"".into();

        let card = to_card(&raw);
        assert_eq!(card.subject, "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(card.sender, "a&lt;b@example.com");
        assert_eq!(card.summary, "1 &gt; 0");
        assert_eq!(card.reason, "&quot;quoted&quot;");
        assert_eq!(card.tier, PriorityTier::Medium);
    }

    #[test]
    fn auth_error_view_hides_refresh() {
        let err = Error::Auth(AuthError::Provider {
            message: "access denied".into(),
        });
        let view = ErrorView::from_error(&err);
        assert_eq!(view.heading, "Authentication Required/Failed");
        assert_eq!(view.message, "access denied");
        assert!(!view.show_refresh);
    }

    #[test]
    fn backend_error_view_keeps_refresh_and_escapes() {
        let err = Error::Api(ApiError::Backend {
            message: "<img onerror=x>".into(),
        });
        let view = ErrorView::from_error(&err);
        assert_eq!(view.heading, "Error from Backend");
        assert!(view.show_refresh);
        assert!(!view.message.contains('<'));
    }

    #[test]
    fn network_and_validation_render_as_client_side() {
        let network = Error::Api(ApiError::Network {
            reason: "connection refused".into(),
        });
        assert_eq!(ErrorView::from_error(&network).heading, "Client-Side Error");

        let short = Error::Api(ApiError::TokenTooShort {
            length: 3,
            minimum: 10,
        });
        let view = ErrorView::from_error(&short);
        assert_eq!(view.heading, "Client-Side Error");
        assert!(view.show_refresh);
    }
}
