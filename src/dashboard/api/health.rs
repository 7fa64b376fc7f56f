//! Health check API

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::store::ProfileStore;

/// Application state shared across dashboard handlers
#[derive(Clone)]
pub struct AppState {
    /// Server start time for uptime calculation
    pub start_time: Instant,
    /// Application version
    pub version: &'static str,
    /// Profile store, re-read on every stats request
    pub store: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
            store,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub timestamp: String,
}

/// Health check handler, used by monitoring.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Liveness probe (minimal response)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Create health check router
pub fn health_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(liveness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryProfileStore;

    #[test]
    fn uptime_starts_near_zero() {
        let state = AppState::new(Arc::new(MemoryProfileStore::new()));
        assert!(state.uptime_secs() < 10);
        assert!(!state.version.is_empty());
    }
}
