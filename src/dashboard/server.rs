//! Dashboard HTTP Server
//!
//! Axum-based server with embedded static files, CORS, and graceful shutdown.

use axum::{
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dashboard::api::{health_router, stats_router, AppState};
use crate::dashboard::config::DashboardConfig;
use crate::store::ProfileStore;

/// Embedded static files for the dashboard
#[derive(Embed)]
#[folder = "src/dashboard/static/"]
struct StaticAssets;

/// Dashboard server
pub struct DashboardServer {
    config: DashboardConfig,
    state: Arc<AppState>,
}

impl DashboardServer {
    /// Create a new dashboard server over the given profile store.
    pub fn new(config: DashboardConfig, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(store)),
        }
    }

    /// Build the router with all routes and middleware
    fn build_router(&self) -> Router {
        let cors = if self.config.cors_enabled {
            CorsLayer::new()
                .allow_origin(
                    self.config
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE])
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE])
        };

        let mut router = Router::new()
            .route("/", get(index_handler))
            .route("/{*path}", get(static_handler))
            .nest(
                "/api",
                health_router(self.state.clone()).merge(stats_router(self.state.clone())),
            )
            .layer(cors);

        if self.config.log_requests {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server and run until shutdown signal
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let router = self.build_router();

        info!("Starting dashboard server on {}", addr);
        if !self.config.is_localhost() {
            tracing::warn!("Dashboard bound to {} - patient data exposed beyond localhost", addr);
        }
        info!("Dashboard available at {}", self.config.base_url());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Dashboard server shut down gracefully");
        Ok(())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

/// Serve the index.html file
async fn index_handler() -> impl IntoResponse {
    match StaticAssets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => Html(FALLBACK_INDEX).into_response(),
    }
}

/// Serve any other embedded static asset
async fn static_handler(axum::extract::Path(path): axum::extract::Path<String>) -> Response {
    match StaticAssets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data.into_owned()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

const FALLBACK_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sampark Dashboard</title></head>
<body>
<h1>Sampark Dashboard</h1>
<p>Static assets not embedded. The API is live at <a href="/api/stats">/api/stats</a>.</p>
</body>
</html>"#;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
