//! Inbox Pilot — popup controller for a prioritized unread-email digest.
//!
//! The library holds everything with real sequencing logic: token
//! acquisition, digest fetch, state rendering, mark-read, and the chat
//! exchanges. The binary wires a terminal surface onto it.

pub mod auth;
pub mod backend;
pub mod config;
pub mod digest;
pub mod error;
pub mod popup;
pub mod session;
