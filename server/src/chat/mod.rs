//! Discord Messages
//!
//! Message wire types and the formatters that build them from GitHub events.

pub mod format;
pub mod types;

pub use format::{format_pull_request, format_push};
pub use types::{ChatMessage, Embed, EmbedAuthor, EmbedField, EmbedFooter};
