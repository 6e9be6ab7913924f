//! Webhook Event Dispatch
//!
//! verify -> classify -> format -> deliver, for a single inbound delivery.
//! The Discord POST is the only I/O; every request is independent.

use chrono::Utc;
use tracing::{debug, info};

use super::delivery::Deliverer;
use super::events::GitHubEventKind;
use super::payload::{PullRequestEvent, PushEvent};
use super::signing;
use super::types::{DispatchOutcome, WebhookError};
use crate::chat::{format_pull_request, format_push, ChatMessage};
use crate::config::Config;

/// An inbound delivery as received on the wire.
#[derive(Debug, Clone, Copy)]
pub struct InboundEvent<'a> {
    /// Raw request body. Signatures are checked against these exact bytes.
    pub body: &'a [u8],
    /// `X-GitHub-Event`
    pub event_type: Option<&'a str>,
    /// `X-Hub-Signature-256`
    pub signature: Option<&'a str>,
}

/// Process one delivery end to end.
///
/// Authentication runs before the body is parsed; ignored event types are
/// never parsed at all.
pub async fn dispatch(
    config: &Config,
    deliverer: &Deliverer,
    event: InboundEvent<'_>,
) -> Result<DispatchOutcome, WebhookError> {
    signing::verify_signature(&config.github_webhook_secret, event.body, event.signature)?;

    let kind = GitHubEventKind::classify(event.event_type);
    match kind {
        GitHubEventKind::Ignored => {
            debug!(event = ?event.event_type, "Ignoring unsupported event");
            Ok(DispatchOutcome::Ignored)
        }
        GitHubEventKind::PullRequest => {
            let payload: PullRequestEvent = serde_json::from_slice(event.body)?;
            info!(
                event = %kind,
                repository = %payload.repository.full_name,
                number = payload.pull_request.number,
                action = %payload.action,
                "Forwarding pull request event"
            );
            let message = format_pull_request(&payload, Utc::now());
            send(deliverer, &message).await
        }
        GitHubEventKind::Push => {
            let payload: PushEvent = serde_json::from_slice(event.body)?;
            let Some(message) = format_push(&payload) else {
                debug!(
                    repository = %payload.repository.full_name,
                    git_ref = %payload.git_ref,
                    "Push carried no commits"
                );
                return Ok(DispatchOutcome::NoCommits);
            };
            info!(
                event = %kind,
                repository = %payload.repository.full_name,
                branch = %payload.branch(),
                commits = payload.commits().len(),
                "Forwarding push event"
            );
            send(deliverer, &message).await
        }
    }
}

async fn send(
    deliverer: &Deliverer,
    message: &ChatMessage,
) -> Result<DispatchOutcome, WebhookError> {
    deliverer.deliver(message).await.into_result()?;
    Ok(DispatchOutcome::Forwarded)
}
