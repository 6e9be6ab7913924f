//! Webhook Types
//!
//! Request outcomes and the error taxonomy for the relay pipeline.

use axum::http::StatusCode;
use thiserror::Error;

/// Successful terminal states of a webhook request. All render as `200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A message was posted to Discord.
    Forwarded,
    /// Push event with no commits; nothing was sent.
    NoCommits,
    /// Event type the relay does not handle; nothing was sent.
    Ignored,
}

impl DispatchOutcome {
    /// Plain-text body returned to GitHub.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Forwarded => "Event forwarded",
            Self::NoCommits => "No commits to forward",
            Self::Ignored => "Event ignored",
        }
    }
}

/// Webhook errors.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Missing signature")]
    MissingSignature,
    #[error("Malformed signature header")]
    MalformedSignature,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Delivery failed ({}): {detail}", describe_status(.status))]
    DeliveryFailed { status: Option<u16>, detail: String },
}

fn describe_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |s| format!("HTTP {s}"))
}

impl WebhookError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignature | Self::MalformedSignature | Self::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::DeliveryFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WebhookError> for (StatusCode, String) {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::DeliveryFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to deliver message".to_string(),
            ),
            WebhookError::MalformedPayload(_) => {
                (StatusCode::BAD_REQUEST, "Malformed payload".to_string())
            }
            _ => (err.status_code(), err.to_string()),
        }
    }
}
