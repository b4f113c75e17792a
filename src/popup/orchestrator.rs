//! Top-level popup sequencing: authenticate → fetch → render, plus the
//! mark-read interaction.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::{Token, TokenProvider};
use crate::backend::DigestBackend;
use crate::config::PopupConfig;
use crate::digest::{EmailCard, ErrorView, to_card};
use crate::error::Error;
use crate::popup::chat::ChatOrchestrator;
use crate::popup::surface::PopupSurface;
use crate::session::{SessionState, UiPhase};

/// Drives one popup activation.
///
/// Owns the session state for its lifetime; a fresh activation is a
/// fresh orchestrator. Every failure on the load path is converted into
/// a rendered error panel — none of the public methods can fail.
pub struct PopupOrchestrator {
    provider: Arc<dyn TokenProvider>,
    backend: Arc<dyn DigestBackend>,
    surface: Box<dyn PopupSurface>,
    config: PopupConfig,
    session: SessionState,
    chat: ChatOrchestrator,
    /// Bearer in use by the currently rendered digest, for mark-read.
    token: Option<Token>,
}

impl PopupOrchestrator {
    pub fn new(
        config: PopupConfig,
        provider: Arc<dyn TokenProvider>,
        backend: Arc<dyn DigestBackend>,
        surface: Box<dyn PopupSurface>,
    ) -> Self {
        let chat = ChatOrchestrator::new(Arc::clone(&backend));
        Self {
            provider,
            backend,
            surface,
            config,
            session: SessionState::new(),
            chat,
            token: None,
        }
    }

    /// Run the load path from the top: acquire a token, fetch the
    /// digest, render the resulting state. Returns the phase it landed
    /// in.
    pub async fn run(&mut self) -> UiPhase {
        self.enter(UiPhase::Loading);
        self.surface.show_loading();
        self.surface.set_chat_enabled(false);
        self.token = None;

        let token = match self.provider.acquire_token().await {
            Ok(token) => token,
            Err(e) => return self.render_error(Error::Auth(e)),
        };
        debug!(token_len = token.len(), "token acquired");

        let emails = match self.backend.fetch_unread(&token).await {
            Ok(emails) => emails,
            Err(e) => return self.render_error(Error::Api(e)),
        };
        self.token = Some(token);

        if emails.is_empty() {
            self.session.replace_emails(Vec::new());
            self.enter(UiPhase::Empty);
            self.surface.show_empty();
            return UiPhase::Empty;
        }

        debug!(count = emails.len(), "digest fetched");
        let cards: Vec<EmailCard> = emails.iter().map(to_card).collect();
        self.session.replace_emails(emails);
        self.enter(UiPhase::ShowingEmails);
        self.surface.show_digest(&cards);
        self.surface.set_chat_enabled(true);
        UiPhase::ShowingEmails
    }

    /// Mark one email read.
    ///
    /// Optimistic: the item is removed locally whether or not the
    /// backend call succeeds; backend failures are logged and swallowed.
    /// When the removal empties the session, the whole load path is
    /// re-run so "all caught up" reflects server truth rather than the
    /// optimistic local removal.
    pub async fn mark_read(&mut self, email_id: &str) {
        let Some(token) = self.token.clone() else {
            warn!(email_id, "mark-read with no active digest; ignoring");
            return;
        };

        if let Err(e) = self.backend.mark_read(&token, email_id).await {
            warn!(email_id, error = %e, "mark-read failed; removing locally anyway");
        }

        // Fade-out transition, not a correctness mechanism.
        tokio::time::sleep(self.config.removal_delay).await;
        self.surface.remove_card(email_id);
        self.session.remove_email(email_id);

        if self.session.is_empty() {
            self.run().await;
        }
    }

    /// Run one chat exchange. A no-op unless the digest is showing —
    /// the chat affordance only exists in that state.
    pub async fn ask(&mut self, question: &str) {
        if self.session.phase() != UiPhase::ShowingEmails {
            debug!("question ignored; chat is only available with a digest showing");
            return;
        }
        self.chat
            .ask(&mut self.session, self.surface.as_mut(), question)
            .await;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> UiPhase {
        self.session.phase()
    }

    fn enter(&mut self, phase: UiPhase) {
        if let Err(reason) = self.session.set_phase(phase) {
            warn!(%reason, "phase transition rejected");
        }
    }

    fn render_error(&mut self, err: Error) -> UiPhase {
        warn!(error = %err, "load path failed");
        let view = ErrorView::from_error(&err);
        self.enter(UiPhase::Error);
        self.surface.show_error(&view);
        UiPhase::Error
    }
}
