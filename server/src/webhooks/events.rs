//! GitHub Event Classification
//!
//! Maps the `X-GitHub-Event` header onto the handling paths the relay knows.

/// Handling path selected for an inbound delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHubEventKind {
    /// Commits were pushed to a ref.
    Push,
    /// Pull request activity (opened, closed, synchronize, ...).
    PullRequest,
    /// Anything else, including a missing header. Acknowledged, never forwarded.
    Ignored,
}

impl GitHubEventKind {
    /// Classify an event-type header value.
    ///
    /// Total over every input: unknown, empty or absent values are `Ignored`.
    pub fn classify(event_type: Option<&str>) -> Self {
        match event_type.map(str::trim) {
            Some("push") => Self::Push,
            Some("pull_request") => Self::PullRequest,
            _ => Self::Ignored,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
            Self::Ignored => "ignored",
        }
    }
}

impl std::fmt::Display for GitHubEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
