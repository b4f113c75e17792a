//! Digest entities and their renderable view models.

pub mod card;
pub mod model;
pub mod render;

pub use card::{EmailCard, ErrorView, PriorityTier, escape_html, to_card};
pub use model::Email;
