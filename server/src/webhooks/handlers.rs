//! Webhook HTTP Handlers
//!
//! Axum entry point for GitHub deliveries.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{error, field, instrument, warn, Span};

use super::dispatch::{dispatch, InboundEvent};
use super::types::WebhookError;
use crate::api::AppState;

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// POST /`webhook/github`
///
/// Takes the body as raw bytes so the signature is checked against exactly
/// what GitHub sent.
#[instrument(skip_all, fields(event = field::Empty, delivery_id = field::Empty))]
pub async fn receive_github(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), (StatusCode, String)> {
    let span = Span::current();
    let event_type = header_str(&headers, EVENT_HEADER);
    if let Some(event) = event_type {
        span.record("event", event);
    }
    if let Some(delivery_id) = header_str(&headers, DELIVERY_HEADER) {
        span.record("delivery_id", delivery_id);
    }

    let inbound = InboundEvent {
        body: &body,
        event_type,
        signature: header_str(&headers, SIGNATURE_HEADER),
    };

    match dispatch(&state.config, &state.deliverer, inbound).await {
        Ok(outcome) => Ok((StatusCode::OK, outcome.message())),
        Err(err) => {
            match &err {
                WebhookError::MissingSignature
                | WebhookError::MalformedSignature
                | WebhookError::InvalidSignature => {
                    warn!(error = %err, "Rejected unauthenticated webhook");
                }
                WebhookError::MalformedPayload(e) => {
                    warn!(error = %e, "Webhook payload did not decode");
                }
                WebhookError::DeliveryFailed { status, detail } => {
                    error!(status = ?status, error = %detail, "Failed to relay event to Discord");
                }
            }
            Err(err.into())
        }
    }
}
