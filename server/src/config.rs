//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Port used when neither `BIND_ADDRESS` nor `PORT` is set.
const DEFAULT_PORT: u16 = 3000;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000")
    pub bind_address: String,

    /// Shared secret GitHub uses to sign webhook payloads
    pub github_webhook_secret: String,

    /// Discord webhook URL that formatted messages are posted to
    pub discord_webhook_url: String,

    /// Timeout for the outbound Discord call (default: 10s)
    pub delivery_timeout: Duration,

    /// Maximum accepted inbound body size in bytes (default: 1MB)
    pub max_body_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let github_webhook_secret =
            env::var("GITHUB_WEBHOOK_SECRET").context("GITHUB_WEBHOOK_SECRET must be set")?;
        if github_webhook_secret.is_empty() {
            bail!("GITHUB_WEBHOOK_SECRET must not be empty");
        }

        let discord_webhook_url =
            env::var("DISCORD_WEBHOOK_URL").context("DISCORD_WEBHOOK_URL must be set")?;
        validate_webhook_url(&discord_webhook_url)?;

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| format!("0.0.0.0:{port}")),
            github_webhook_secret,
            discord_webhook_url,
            delivery_timeout: Duration::from_secs(
                env::var("DELIVERY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
        })
    }

    /// Create a default configuration for testing.
    ///
    /// The Discord URL points at a closed local port; tests that exercise
    /// delivery replace it with the address of a capture sink.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".into(),
            github_webhook_secret: "test-secret".into(),
            discord_webhook_url: "http://127.0.0.1:9/webhook".into(),
            delivery_timeout: Duration::from_secs(5),
            max_body_size: 1024 * 1024,
        }
    }
}

fn validate_webhook_url(url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("DISCORD_WEBHOOK_URL must start with http:// or https://");
    }
    Ok(())
}
