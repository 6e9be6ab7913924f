//! GitHub Webhook Payloads
//!
//! Typed views over the push and pull request event bodies. Only the fields
//! the relay reads are declared; unknown fields are ignored so upstream
//! schema additions never break decoding.

use serde::Deserialize;

/// Repository the event belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    /// `owner/name`
    pub full_name: String,
}

/// A GitHub account as it appears inside pull request payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Identity of whoever performed a push.
#[derive(Debug, Clone, Deserialize)]
pub struct Pusher {
    pub name: String,
}

/// Commit author as embedded in a push payload. `username` is only present
/// when the author email maps to a GitHub account.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub timestamp: String,
    pub url: String,
    pub author: CommitAuthor,
}

/// `push` event body.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub repository: Repository,
    pub pusher: Pusher,
    /// Absent on some deletions; treated the same as an empty list.
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,
}

impl PushEvent {
    /// Commits carried by the push, empty when the list is missing.
    pub fn commits(&self) -> &[Commit] {
        self.commits.as_deref().unwrap_or_default()
    }

    pub fn branch(&self) -> &str {
        branch_from_ref(&self.git_ref)
    }
}

/// Last `/`-separated segment of a git ref (`refs/heads/main` -> `main`).
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

/// Owner reference on a head/base repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RefRepository {
    pub owner: User,
}

/// Head or base side of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    /// `owner:branch`, as GitHub renders it.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Null when the fork backing the head branch was deleted.
    #[serde(default)]
    pub repo: Option<RefRepository>,
}

impl PullRequestRef {
    /// `owner:branch`, rebuilt from the repository owner (or `fork`) when
    /// GitHub omitted the label.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => {
                let owner = self
                    .repo
                    .as_ref()
                    .map_or("fork", |repo| repo.owner.login.as_str());
                format!("{owner}:{}", self.ref_name)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub merged: Option<bool>,
    pub user: User,
    pub head: PullRequestRef,
    pub base: PullRequestRef,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `pull_request` event body.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

impl PullRequestEvent {
    pub fn is_merged(&self) -> bool {
        self.pull_request.merged.unwrap_or(false)
    }
}

/// Flattened, display-ready view of one pushed commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// First 7 characters of the commit id.
    pub short_id: String,
    pub url: String,
    pub author_name: String,
    pub author_username: Option<String>,
    /// First line of the commit message.
    pub title: String,
    pub timestamp: String,
    pub branch: String,
}

impl CommitRecord {
    pub fn new(commit: &Commit, branch: &str) -> Self {
        Self {
            short_id: commit.id.chars().take(7).collect(),
            url: commit.url.clone(),
            author_name: commit.author.name.clone(),
            author_username: commit.author.username.clone(),
            title: commit.message.lines().next().unwrap_or_default().to_string(),
            timestamp: commit.timestamp.clone(),
            branch: branch.to_string(),
        }
    }
}
