//! Serialized question/answer exchanges against the backend.

use std::sync::Arc;

use crate::backend::DigestBackend;
use crate::error::ApiError;
use crate::popup::surface::PopupSurface;
use crate::session::{ChatMessage, ChatRole, SessionState};

/// Runs chat exchanges one at a time, using the session's email list as
/// context.
pub struct ChatOrchestrator {
    backend: Arc<dyn DigestBackend>,
    in_flight: bool,
}

impl ChatOrchestrator {
    pub fn new(backend: Arc<dyn DigestBackend>) -> Self {
        Self {
            backend,
            in_flight: false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Run one question/answer exchange.
    ///
    /// Empty input after trimming is a silent no-op, as is a question
    /// submitted while another is outstanding. Once an exchange starts,
    /// the chat controls are re-enabled on every exit path, and the
    /// transcript gains exactly one `user` entry followed by exactly one
    /// `assistant` or `assistant-error` entry.
    pub async fn ask(
        &mut self,
        session: &mut SessionState,
        surface: &mut dyn PopupSurface,
        question: &str,
    ) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }
        if self.in_flight {
            tracing::debug!("question ignored; one is already in flight");
            return;
        }

        self.in_flight = true;
        surface.set_chat_enabled(false);

        session.push_message(ChatMessage::new(ChatRole::User, question));
        surface.transcript_updated(session.transcript());
        surface.set_thinking(true);

        tracing::debug!(
            context_emails = session.emails().len(),
            "sending question to backend"
        );
        let result = self.backend.ask(question, session.emails()).await;

        surface.set_thinking(false);
        let reply = match result {
            Ok(answer) => ChatMessage::new(ChatRole::Assistant, answer),
            Err(ApiError::Backend { message }) => {
                ChatMessage::new(ChatRole::AssistantError, format!("API Error: {message}"))
            }
            Err(e) => {
                ChatMessage::new(ChatRole::AssistantError, format!("Connection error: {e}"))
            }
        };
        session.push_message(reply);
        surface.transcript_updated(session.transcript());

        surface.set_chat_enabled(true);
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::auth::Token;
    use crate::digest::Email;

    struct ScriptedBackend {
        answer: Result<String, ApiError>,
    }

    #[async_trait]
    impl DigestBackend for ScriptedBackend {
        async fn fetch_unread(&self, _token: &Token) -> Result<Vec<Email>, ApiError> {
            Ok(vec![])
        }

        async fn mark_read(&self, _token: &Token, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn ask(&self, _question: &str, _context: &[Email]) -> Result<String, ApiError> {
            match &self.answer {
                Ok(a) => Ok(a.clone()),
                Err(ApiError::Backend { message }) => Err(ApiError::Backend {
                    message: message.clone(),
                }),
                Err(e) => Err(ApiError::Network {
                    reason: e.to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct NullSurface {
        chat_enabled: Vec<bool>,
        thinking: Vec<bool>,
    }

    impl PopupSurface for NullSurface {
        fn show_loading(&mut self) {}
        fn show_digest(&mut self, _cards: &[crate::digest::EmailCard]) {}
        fn show_empty(&mut self) {}
        fn show_error(&mut self, _view: &crate::digest::ErrorView) {}
        fn remove_card(&mut self, _email_id: &str) {}
        fn set_chat_enabled(&mut self, enabled: bool) {
            self.chat_enabled.push(enabled);
        }
        fn set_thinking(&mut self, thinking: bool) {
            self.thinking.push(thinking);
        }
        fn transcript_updated(&mut self, _transcript: &[ChatMessage]) {}
    }

    fn chat(answer: Result<String, ApiError>) -> ChatOrchestrator {
        ChatOrchestrator::new(Arc::new(ScriptedBackend { answer }))
    }

    #[tokio::test]
    async fn empty_question_is_a_silent_noop() {
        let mut chat = chat(Ok("unused".into()));
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        chat.ask(&mut session, &mut surface, "   ").await;

        assert!(session.transcript().is_empty());
        assert!(surface.chat_enabled.is_empty());
    }

    #[tokio::test]
    async fn in_flight_guard_ignores_second_question() {
        let mut chat = chat(Ok("unused".into()));
        chat.in_flight = true;
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        chat.ask(&mut session, &mut surface, "Q2").await;

        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_then_assistant() {
        let mut chat = chat(Ok("Answer one.".into()));
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        chat.ask(&mut session, &mut surface, "  What first?  ").await;

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, ChatRole::User);
        assert_eq!(transcript[0].text, "What first?");
        assert_eq!(transcript[1].role, ChatRole::Assistant);
        assert_eq!(transcript[1].text, "Answer one.");
        // Controls disabled for the round-trip, re-enabled after.
        assert_eq!(surface.chat_enabled, vec![false, true]);
        assert_eq!(surface.thinking, vec![true, false]);
        assert!(!chat.is_in_flight());
    }

    #[tokio::test]
    async fn backend_error_becomes_assistant_error_and_reenables() {
        let mut chat = chat(Err(ApiError::Backend {
            message: "missing API key".into(),
        }));
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        chat.ask(&mut session, &mut surface, "Q").await;

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, ChatRole::AssistantError);
        assert!(last.text.contains("missing API key"));
        assert!(last.text.starts_with("API Error:"));
        assert_eq!(surface.chat_enabled.last(), Some(&true));
        assert!(!chat.is_in_flight());
    }

    #[tokio::test]
    async fn transport_error_becomes_connection_error() {
        let mut chat = chat(Err(ApiError::Network {
            reason: "connection refused".into(),
        }));
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        chat.ask(&mut session, &mut surface, "Q").await;

        let last = session.transcript().last().unwrap();
        assert_eq!(last.role, ChatRole::AssistantError);
        assert!(last.text.starts_with("Connection error:"));
        assert!(last.text.contains("connection refused"));
    }

    #[tokio::test]
    async fn sequential_exchanges_keep_submission_order() {
        let mut session = SessionState::new();
        let mut surface = NullSurface::default();

        let mut chat1 = chat(Ok("A1".into()));
        chat1.ask(&mut session, &mut surface, "Q1").await;
        let mut chat2 = chat(Ok("A2".into()));
        chat2.ask(&mut session, &mut surface, "Q2").await;

        let entries: Vec<_> = session
            .transcript()
            .iter()
            .map(|m| (m.role, m.text.clone()))
            .collect();
        assert_eq!(
            entries,
            vec![
                (ChatRole::User, "Q1".to_string()),
                (ChatRole::Assistant, "A1".to_string()),
                (ChatRole::User, "Q2".to_string()),
                (ChatRole::Assistant, "A2".to_string()),
            ]
        );
    }
}
