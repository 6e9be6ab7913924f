//! Event Formatting
//!
//! Pure mappings from GitHub payloads to Discord messages. No I/O; the only
//! ambient input (the current time) is passed in by the caller.

use chrono::{DateTime, SecondsFormat, Utc};

use super::types::{ChatMessage, Embed, EmbedAuthor, EmbedField, EmbedFooter};
use crate::webhooks::payload::{CommitRecord, PullRequestEvent, PushEvent, Repository};

/// Accent colour for commit embeds.
pub const COMMIT_COLOR: u32 = 0x7289DA;
/// Pull request opened, reopened, synchronized, or any other non-closing action.
pub const PR_OPEN_COLOR: u32 = 0x2ECC71;
/// Pull request closed by merging.
pub const PR_MERGED_COLOR: u32 = 0x9B59B6;
/// Pull request closed without merging.
pub const PR_CLOSED_COLOR: u32 = 0xE74C3C;

/// Upper bound on commit embeds per push message.
pub const MAX_COMMIT_EMBEDS: usize = 10;

/// Pull request bodies longer than this are cut and marked with [`ELLIPSIS`].
pub const PR_BODY_PREVIEW_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

// Discord embed limits, in characters.
const EMBED_TITLE_LIMIT: usize = 256;
const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Build the message for a push. `None` when the push carries no commits.
pub fn format_push(event: &PushEvent) -> Option<ChatMessage> {
    let commits = event.commits();
    if commits.is_empty() {
        return None;
    }

    let branch = event.branch();
    let count = commits.len();
    let noun = if count == 1 { "commit" } else { "commits" };
    let content = format!(
        "**{}** pushed {count} {noun} to **{}:{branch}**",
        event.pusher.name, event.repository.full_name
    );

    let embeds = commits
        .iter()
        .take(MAX_COMMIT_EMBEDS)
        .map(|commit| commit_embed(&CommitRecord::new(commit, branch), &event.repository))
        .collect();

    Some(ChatMessage { content, embeds })
}

/// One embed per pushed commit.
pub fn commit_embed(record: &CommitRecord, repository: &Repository) -> Embed {
    Embed {
        color: COMMIT_COLOR,
        author: Some(EmbedAuthor {
            name: record.author_name.clone(),
            icon_url: record.author_username.as_deref().map(avatar_url),
        }),
        title: clamp(
            format!("[{}:{}]", repository.name, record.branch),
            EMBED_TITLE_LIMIT,
        ),
        description: clamp(
            format!("[`{}`]({}) {}", record.short_id, record.url, record.title),
            EMBED_DESCRIPTION_LIMIT,
        ),
        fields: Vec::new(),
        timestamp: Some(record.timestamp.clone()),
        footer: Some(EmbedFooter {
            text: repository.full_name.clone(),
        }),
    }
}

/// Build the single-embed message for a pull request event.
///
/// `now` stands in for the timestamp when the payload has no `updated_at`.
pub fn format_pull_request(event: &PullRequestEvent, now: DateTime<Utc>) -> ChatMessage {
    let pr = &event.pull_request;
    let repository = &event.repository;

    let mut description = format!(
        "**Action:** {}\n[View Pull Request]({})",
        event.action, pr.html_url
    );
    if let Some(body) = pr.body.as_deref().filter(|b| !b.is_empty()) {
        description.push_str("\n\n");
        description.push_str(&truncate_body(body));
    }

    let embed = Embed {
        color: pull_request_color(&event.action, event.is_merged()),
        author: Some(EmbedAuthor {
            name: pr.user.login.clone(),
            icon_url: pr.user.avatar_url.clone(),
        }),
        title: clamp(
            format!("[{}] Pull Request #{}: {}", repository.name, pr.number, pr.title),
            EMBED_TITLE_LIMIT,
        ),
        description: clamp(description, EMBED_DESCRIPTION_LIMIT),
        fields: vec![
            EmbedField {
                name: "Source".to_string(),
                value: pr.head.display_label(),
                inline: true,
            },
            EmbedField {
                name: "Target".to_string(),
                value: pr.base.display_label(),
                inline: true,
            },
        ],
        timestamp: Some(
            pr.updated_at
                .clone()
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ),
        footer: Some(EmbedFooter {
            text: repository.full_name.clone(),
        }),
    };

    ChatMessage {
        content: format!("Pull request update in **{}**", repository.full_name),
        embeds: vec![embed],
    }
}

/// Green unless closed; closed is purple when merged, red otherwise.
pub fn pull_request_color(action: &str, merged: bool) -> u32 {
    match (action, merged) {
        ("closed", true) => PR_MERGED_COLOR,
        ("closed", false) => PR_CLOSED_COLOR,
        _ => PR_OPEN_COLOR,
    }
}

/// First [`PR_BODY_PREVIEW_CHARS`] characters of a body, plus [`ELLIPSIS`]
/// when anything was cut.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(PR_BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &body[..cut]),
        None => body.to_string(),
    }
}

/// Conventional GitHub avatar location for a username. Not verified to exist.
fn avatar_url(username: &str) -> String {
    format!("https://github.com/{username}.png")
}

fn clamp(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}
