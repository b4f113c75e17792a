//! Popup orchestration — the asynchronous control flow that sequences
//! authentication, data fetch, rendering, and the user-triggered
//! exchanges (mark-read, ask-question).

pub mod chat;
pub mod orchestrator;
pub mod surface;
pub mod terminal;

pub use chat::ChatOrchestrator;
pub use orchestrator::PopupOrchestrator;
pub use surface::PopupSurface;
pub use terminal::TerminalSurface;
