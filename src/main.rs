//! Sampark Bot - Entry Point
//!
//! Modes:
//! - Default: WhatsApp webhook server (Twilio)
//! - --dashboard / -d: operator dashboard server

use sampark_bot::{
    BotEngine, Config, DashboardConfig, DashboardServer, KnowledgeHub, MenuDispatcher,
    PharmacyDirectory, SqliteProfileStore, WebhookServer,
};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Parse args
    let args: Vec<String> = std::env::args().collect();
    let dashboard_mode = args.iter().any(|a| a == "--dashboard" || a == "-d");
    let help_mode = args.iter().any(|a| a == "--help" || a == "-h");

    if help_mode {
        println!("Sampark Bot v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage: sampark-bot [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --dashboard, -d    Run the operator dashboard");
        println!("  --help, -h         Show this help");
        println!();
        println!("Default: Run the WhatsApp webhook server");
        println!();
        println!("Environment variables:");
        println!("  SAMPARK_DB_PATH        Profile database path");
        println!("  SAMPARK_PHARMACY_CSV   Pharmacy dataset (CSV)");
        println!("  SAMPARK_MEDIA_DIR      Directory served under /video");
        println!("  SAMPARK_BIND_ADDR      Webhook bind address (default: 0.0.0.0)");
        println!("  SAMPARK_PORT           Webhook port (default: 5050)");
        println!("  DASHBOARD_BIND_ADDR    Dashboard bind address (default: 127.0.0.1)");
        println!("  DASHBOARD_PORT         Dashboard port (default: 8080)");
        return Ok(());
    }

    // Setup logging
    let log_level = std::env::var("RUST_LOG")
        .map(|s| match s.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let store = Arc::new(SqliteProfileStore::open(&config.db_path)?);

    if dashboard_mode {
        info!("Sampark Dashboard v{}", env!("CARGO_PKG_VERSION"));

        let server = DashboardServer::new(DashboardConfig::from_env(), store);
        server.run().await?;
    } else {
        info!("Sampark Bot v{}", env!("CARGO_PKG_VERSION"));

        let dispatcher = MenuDispatcher::new(
            PharmacyDirectory::new(&config.pharmacy_csv_path),
            KnowledgeHub::new(),
        );
        let engine = Arc::new(BotEngine::new(store, dispatcher));
        let server = WebhookServer::new(engine, config.media_dir.clone(), config.socket_addr());
        server.run().await?;
    }

    Ok(())
}
