//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full axum
//! router, plus a capture sink that stands in for the Discord webhook.
//!
//! ## Capture Sink
//!
//! Use [`spawn_capture_sink()`] to start a real HTTP server on `127.0.0.1:0`
//! that records every JSON body POSTed to it. Point the app's Discord URL at
//! [`CaptureSink::url`] and count deliveries with [`CaptureSink::received`].
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{self, Method, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use hookline_server::api::{create_router, AppState};
use hookline_server::config::Config;
use hookline_server::webhooks::signing;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower::ServiceExt;

// ============================================================================
// Capture sink (fake Discord)
// ============================================================================

#[derive(Clone)]
struct SinkState {
    received: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
}

/// A running fake Discord webhook.
pub struct CaptureSink {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
    _handle: JoinHandle<()>,
}

impl CaptureSink {
    /// Bodies received so far, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().expect("sink mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().expect("sink mutex poisoned").len()
    }
}

async fn capture(State(state): State<SinkState>, Json(body): Json<Value>) -> StatusCode {
    state
        .received
        .lock()
        .expect("sink mutex poisoned")
        .push(body);
    state.status
}

/// Spawn a sink that answers every POST with `status`.
///
/// Discord answers successful webhook executions with `204 No Content`.
pub async fn spawn_capture_sink(status: StatusCode) -> CaptureSink {
    let received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/webhook", post(capture))
        .with_state(SinkState {
            received: received.clone(),
            status,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind capture sink");
    let addr = listener.local_addr().expect("Failed to get local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Capture sink failed");
    });

    CaptureSink {
        url: format!("http://{addr}/webhook"),
        received,
        _handle: handle,
    }
}

/// A running fake Discord webhook that never answers in time.
pub struct StallingSink {
    pub url: String,
    _handle: JoinHandle<()>,
}

/// Spawn a sink that holds every POST for `delay` before answering `204`.
pub async fn spawn_stalling_sink(delay: Duration) -> StallingSink {
    let router = Router::new().route(
        "/webhook",
        post(move || async move {
            tokio::time::sleep(delay).await;
            StatusCode::NO_CONTENT
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stalling sink");
    let addr = listener.local_addr().expect("Failed to get local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stalling sink failed");
    });

    StallingSink {
        url: format!("http://{addr}/webhook"),
        _handle: handle,
    }
}

// ============================================================================
// TestApp
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub config: Config,
}

impl TestApp {
    /// Build an app that delivers to `discord_url`.
    pub fn new(discord_url: &str) -> Self {
        let config = Config {
            discord_webhook_url: discord_url.to_string(),
            ..Config::default_for_test()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::from_config(config.clone()).expect("Failed to build app state");
        Self {
            router: create_router(state),
            config,
        }
    }

    /// Start building a request.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// A GitHub delivery signed with the app's own secret.
    pub fn signed_webhook(&self, event: &str, body: &[u8]) -> Request<Body> {
        self.webhook_signed_with(&self.config.github_webhook_secret, event, body)
    }

    /// A GitHub delivery signed with an arbitrary secret.
    pub fn webhook_signed_with(&self, secret: &str, event: &str, body: &[u8]) -> Request<Body> {
        Self::request(Method::POST, "/webhook/github")
            .header("Content-Type", "application/json")
            .header("X-GitHub-Event", event)
            .header("X-GitHub-Delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958")
            .header("X-Hub-Signature-256", signing::signature_header(secret, body))
            .body(Body::from(body.to_vec()))
            .unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

pub async fn body_to_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

pub async fn body_to_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Response body was not UTF-8")
}

// ============================================================================
// Payload builders
// ============================================================================

/// A `push` payload with `commit_count` commits, in order.
pub fn push_payload(pusher: &str, full_name: &str, git_ref: &str, commit_count: usize) -> Value {
    let name = full_name.rsplit('/').next().unwrap_or(full_name);
    let commits: Vec<Value> = (0..commit_count)
        .map(|i| {
            json!({
                "id": format!("{i:040x}"),
                "tree_id": "4b825dc642cb6eb9a060e54bf8d69288fbee4904",
                "distinct": true,
                "message": format!("Change {i}\n\nDetails for change {i}."),
                "timestamp": "2024-03-01T10:00:00+01:00",
                "url": format!("https://github.com/{full_name}/commit/{i:040x}"),
                "author": { "name": "Alice Doe", "email": "alice@example.com", "username": pusher },
                "committer": { "name": "GitHub", "email": "noreply@github.com" },
                "added": [],
                "removed": [],
                "modified": ["README.md"],
            })
        })
        .collect();

    json!({
        "ref": git_ref,
        "before": "0000000000000000000000000000000000000000",
        "after": "1111111111111111111111111111111111111111",
        "repository": {
            "id": 1,
            "name": name,
            "full_name": full_name,
            "html_url": format!("https://github.com/{full_name}"),
            "private": false,
        },
        "pusher": { "name": pusher, "email": "alice@example.com" },
        "sender": { "login": pusher, "id": 2 },
        "commits": commits,
    })
}

/// A `pull_request` payload.
pub fn pull_request_payload(action: &str, merged: bool, body: Option<&str>) -> Value {
    let state = if action == "closed" { "closed" } else { "open" };
    json!({
        "action": action,
        "number": 7,
        "pull_request": {
            "id": 99,
            "number": 7,
            "state": state,
            "title": "Teach widgets to spin",
            "body": body,
            "html_url": "https://github.com/acme/widgets/pull/7",
            "merged": merged,
            "user": { "login": "bob", "avatar_url": "https://avatars.githubusercontent.com/u/3" },
            "head": {
                "label": "bob:spin",
                "ref": "spin",
                "repo": { "name": "widgets", "owner": { "login": "bob" } },
            },
            "base": {
                "label": "acme:main",
                "ref": "main",
                "repo": { "name": "widgets", "owner": { "login": "acme" } },
            },
            "updated_at": "2024-03-02T08:30:00Z",
        },
        "repository": { "name": "widgets", "full_name": "acme/widgets" },
        "sender": { "login": "bob" },
    })
}
