//! Terminal rendering surface — prints the popup state to stdout and
//! optionally mirrors it to an HTML snapshot file.

use std::path::PathBuf;

use tracing::warn;

use crate::digest::render;
use crate::digest::{EmailCard, ErrorView};
use crate::popup::surface::{PopupSurface, THINKING_TEXT};
use crate::session::{ChatMessage, ChatRole};

/// Stdout surface for the bundled binary.
pub struct TerminalSurface {
    snapshot: Option<PathBuf>,
    /// Cards currently on screen, kept for redraw after a removal.
    cards: Vec<EmailCard>,
}

impl TerminalSurface {
    pub fn new(snapshot: Option<PathBuf>) -> Self {
        Self {
            snapshot,
            cards: Vec::new(),
        }
    }

    fn write_snapshot(&self, body: &str) {
        let Some(path) = &self.snapshot else {
            return;
        };
        if let Err(e) = std::fs::write(path, body) {
            warn!(path = %path.display(), error = %e, "failed to write HTML snapshot");
        }
    }

    fn print_card(card: &EmailCard) {
        println!("  [{}] {}", card.badge(), card.subject);
        println!("      From: {}", card.sender);
        println!("      {}", card.summary);
        println!("      📌 {}  (id: {})", card.reason, card.id);
    }
}

impl PopupSurface for TerminalSurface {
    fn show_loading(&mut self) {
        println!("⏳ Loading your digest…");
        self.write_snapshot(&render::loading_html());
    }

    fn show_digest(&mut self, cards: &[EmailCard]) {
        self.cards = cards.to_vec();
        println!("\n📬 {} unread email(s), highest priority first:\n", cards.len());
        for card in cards {
            Self::print_card(card);
            println!();
        }
        self.write_snapshot(&render::digest_html(cards));
    }

    fn show_empty(&mut self) {
        self.cards.clear();
        println!("\n✨ All caught up! No unread emails at the moment.\n");
        self.write_snapshot(&render::empty_html());
    }

    fn show_error(&mut self, view: &ErrorView) {
        self.cards.clear();
        eprintln!("\n❌ {}: {}", view.heading, view.message);
        eprintln!("   {}", view.hint);
        if view.show_refresh {
            eprintln!("   Type `refresh` to try again.\n");
        } else {
            eprintln!();
        }
        self.write_snapshot(&render::error_html(view));
    }

    fn remove_card(&mut self, email_id: &str) {
        self.cards.retain(|c| c.id != email_id);
        println!("✓ Marked read: {email_id}");
        self.write_snapshot(&render::digest_html(&self.cards));
    }

    fn set_chat_enabled(&mut self, enabled: bool) {
        if enabled {
            println!("💬 Chat ready — ask anything about these emails.");
        }
    }

    fn set_thinking(&mut self, thinking: bool) {
        if thinking {
            println!("   {THINKING_TEXT}");
        }
    }

    fn transcript_updated(&mut self, transcript: &[ChatMessage]) {
        let Some(last) = transcript.last() else {
            return;
        };
        match last.role {
            ChatRole::User => println!("\nYou: {}", last.text),
            ChatRole::Assistant => println!("Assistant: {}\n", last.text),
            ChatRole::AssistantError => println!("⚠️  {}\n", last.text),
        }
    }
}
