//! Hookline Server
//!
//! Relays GitHub push and pull request webhooks to a Discord channel.
//! Deliveries are authenticated with the shared HMAC secret, formatted into
//! Discord embeds, and posted once to the configured Discord webhook.

pub mod api;
pub mod chat;
pub mod config;
pub mod webhooks;
