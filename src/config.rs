//! Application configuration
//!
//! Configuration is read once from the environment at startup and passed
//! around as an explicit struct; nothing in the request path touches
//! environment variables.

use std::env;

/// Runtime configuration for the bookmark service
///
/// # Environment Variables
///
/// - `DATABASE_URL` - PostgreSQL connection string
/// - `API_KEY` - shared secret expected in the `X-BOOKMARKS-API-KEY` header;
///   when unset or empty, the key check is skipped
/// - `PORT` - server port number (default: 8085)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Shared API secret; empty disables the header check
    pub api_key: String,

    /// Port the HTTP listener binds to
    pub port: u16,
}

impl AppConfig {
    /// Reads configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/bookmarks".to_string()),
            api_key: env::var("API_KEY").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8085),
        }
    }
}
