//! Discord Delivery
//!
//! Posts formatted messages to the configured Discord webhook. Exactly one
//! attempt per event: there is no queue to retry from.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::types::WebhookError;
use crate::chat::ChatMessage;
use crate::config::Config;

/// Longest slice of an error response body kept for diagnostics.
const ERROR_BODY_PREVIEW_CHARS: usize = 500;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Discord accepted the message (any 2xx).
    Delivered { status: u16, latency_ms: u64 },
    /// Transport error (`status` is `None`) or a non-success response.
    Failed { status: Option<u16>, detail: String },
}

impl DeliveryOutcome {
    pub fn into_result(self) -> Result<(), WebhookError> {
        match self {
            Self::Delivered { .. } => Ok(()),
            Self::Failed { status, detail } => Err(WebhookError::DeliveryFailed { status, detail }),
        }
    }
}

/// Sends messages to one Discord webhook URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Deliverer {
    client: reqwest::Client,
    url: String,
}

impl Deliverer {
    /// Build a deliverer whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hookline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.discord_webhook_url.clone(), config.delivery_timeout)
    }

    /// POST `message` as JSON and report what happened.
    pub async fn deliver(&self, message: &ChatMessage) -> DeliveryOutcome {
        let start = Instant::now();
        let result = self.client.post(&self.url).json(message).send().await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(resp) if resp.status().is_success() => {
                let status = resp.status().as_u16();
                debug!(status, latency_ms, "Discord accepted message");
                DeliveryOutcome::Delivered { status, latency_ms }
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                let detail = if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
                };
                warn!(status, latency_ms, error = %detail, "Discord rejected message");
                DeliveryOutcome::Failed {
                    status: Some(status),
                    detail,
                }
            }
            Err(e) => {
                let detail = e.to_string();
                warn!(
                    latency_ms,
                    timeout = e.is_timeout(),
                    error = %detail,
                    "Discord delivery failed"
                );
                DeliveryOutcome::Failed {
                    status: e.status().map(|s| s.as_u16()),
                    detail,
                }
            }
        }
    }
}
