//! Bot webhook server
//!
//! Axum server for the Twilio WhatsApp webhook. Each POST to /incoming is
//! one turn: parse the form, run the engine, answer with TwiML. The
//! onboarding media directory is served under /video.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::channels::{twiml_response, ChannelMessage, TwilioWebhookData};
use crate::engine::BotEngine;

/// Webhook server wiring the channel layer to the engine
pub struct WebhookServer {
    engine: Arc<BotEngine>,
    media_dir: PathBuf,
    addr: std::net::SocketAddr,
}

impl WebhookServer {
    pub fn new(engine: Arc<BotEngine>, media_dir: PathBuf, addr: std::net::SocketAddr) -> Self {
        Self {
            engine,
            media_dir,
            addr,
        }
    }

    fn build_router(&self) -> Router {
        Router::new()
            .route("/incoming", post(incoming_handler))
            .route("/healthz", get(|| async { StatusCode::OK }))
            .nest_service("/video", ServeDir::new(&self.media_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(self.engine.clone())
    }

    /// Run until shutdown signal.
    pub async fn run(self) -> anyhow::Result<()> {
        let router = self.build_router();
        info!("Starting webhook server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Webhook server shut down gracefully");
        Ok(())
    }
}

/// One inbound WhatsApp message, answered inline as TwiML.
async fn incoming_handler(
    State(engine): State<Arc<BotEngine>>,
    Form(data): Form<TwilioWebhookData>,
) -> impl IntoResponse {
    let message = ChannelMessage::from_webhook(&data);
    debug!("inbound message {} from {}", message.id, message.sender_id);

    let segments = engine
        .handle_message(&message.sender_id, &message.content)
        .await;

    (
        [(header::CONTENT_TYPE, "application/xml")],
        twiml_response(&segments),
    )
}

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
