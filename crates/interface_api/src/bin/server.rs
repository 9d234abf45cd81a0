//! Participant Registration - API Server Binary
//!
//! This binary starts the HTTP API server that registers event participants
//! into the configured Notion database.
//!
//! # Usage
//!
//! ```bash
//! # Run with a .env file in the working directory
//! cargo run --bin registration-api
//!
//! # Run with environment variables
//! NOTION_API_KEY=secret_... NOTION_DATABASE_ID=... API_PORT=8080 cargo run --bin registration-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_NOTION_API_KEY` / `NOTION_API_KEY` - Notion integration secret (required)
//! * `API_NOTION_DATABASE_ID` / `NOTION_DATABASE_ID` - Target database (required)
//! * `API_NOTION_BASE_URL` - Notion API base URL
//! * `API_NOTION_VERSION` - Notion-Version header (default: 2022-06-28)
//! * `API_REQUEST_TIMEOUT_SECS` - Timeout for Notion calls
//! * `API_SCHEMA_VERSION` - Database property layout: v1 or v2 (default: v1)
//! * `API_PACING_THRESHOLD` - Batch size above which writes are paced (default: 3)
//! * `API_PACING_DELAY_MS` - Pause between paced writes (default: 350)
//! * `API_FRAME_ANCESTORS` - Sources allowed to frame the pages

use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, builds the Notion client,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - An environment variable holds a value of the wrong type
/// - Notion credentials are missing or unusable
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        schema = %config.schema_version,
        pacing_threshold = config.pacing_threshold,
        pacing_delay_ms = config.pacing_delay_ms,
        "Starting Participant Registration API Server"
    );

    let addr: SocketAddr = config.server_addr().parse()?;

    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight submissions finish before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
