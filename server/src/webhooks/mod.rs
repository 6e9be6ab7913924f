//! GitHub Webhook Relay
//!
//! Receives signed GitHub deliveries, turns push and pull request events
//! into Discord messages, and posts them to a Discord webhook.

pub mod delivery;
pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod payload;
pub mod signing;
pub mod types;

pub use delivery::{Deliverer, DeliveryOutcome};
pub use events::GitHubEventKind;
pub use types::{DispatchOutcome, WebhookError};
