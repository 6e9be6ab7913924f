//! API Router and Application State
//!
//! Central routing configuration and shared state.

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::webhooks::{handlers, Deliverer};

/// Shared application state.
///
/// Immutable after startup; cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Discord delivery client
    pub deliverer: Deliverer,
    /// When the process started serving, for `/health` uptime
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, deliverer: Deliverer) -> Self {
        Self {
            config: Arc::new(config),
            deliverer,
            started_at: Instant::now(),
        }
    }

    /// Build state with a deliverer derived from `config`.
    pub fn from_config(config: Config) -> Result<Self, reqwest::Error> {
        let deliverer = Deliverer::from_config(&config)?;
        Ok(Self::new(config, deliverer))
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // GitHub deliveries
        .route("/webhook/github", post(handlers::receive_github))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_size))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Current server time (RFC 3339)
    pub timestamp: String,
    /// Seconds since startup
    pub uptime: f64,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health(state.started_at, Utc::now()))
}

fn health(started_at: Instant, now: DateTime<Utc>) -> HealthResponse {
    HealthResponse {
        status: "ok",
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: started_at.elapsed().as_secs_f64(),
    }
}
