//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Creates the database pool and runs migrations
//! - Starts the HTTP server with graceful shutdown support

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

// Module declarations
mod config;
mod database;
mod error;
mod fetch;
mod handler;
mod middleware;
mod model;
mod route;

use config::AppConfig;
use database::{init_db, AppState};
use fetch::HttpLinkProbe;
use route::create_app;

/// Application entry point
///
/// 1. Loads environment variables from a .env file when present
/// 2. Reads configuration (DATABASE_URL, API_KEY, PORT)
/// 3. Creates the PostgreSQL pool and applies migrations
/// 4. Builds the outbound HTTP probe and application state
/// 5. Serves the router with graceful shutdown handling
///
/// Only pool/migration setup and listener binding are allowed to terminate
/// the process; request failures never do.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("bookmarks=debug,tower_http=debug")
        .init();

    let config = AppConfig::from_env();

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    let probe = HttpLinkProbe::new().expect("Failed to build HTTP client");

    let port = config.port;
    let state = AppState {
        db,
        probe: Arc::new(probe),
        config: Arc::new(config),
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    info!("Server running at http://localhost:{}", port);

    // The server keeps running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received; axum then
/// stops accepting connections and lets in-flight requests complete.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server.");
}
