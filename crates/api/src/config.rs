//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the TimeMesh API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `ACCESS_TOKEN_TTL_SECONDS`: Lifetime of access tokens (default: 300)
//! - `REFRESH_TOKEN_TTL_SECONDS`: Lifetime of refresh tokens (default: 86400)
//! - `TOKEN_CLEANUP_INTERVAL_SECONDS`: How often expired tokens are purged (default: 3600)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

pub const DEFAULT_ACCESS_TOKEN_TTL: i64 = 300;
pub const DEFAULT_REFRESH_TOKEN_TTL: i64 = 86_400;
pub const DEFAULT_TOKEN_CLEANUP_INTERVAL: i64 = 3_600;

/// Configuration for the TimeMesh API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use timemesh_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Access token lifetime in seconds
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: i64,

    /// Seconds between expired-token purges
    pub token_cleanup_interval: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from the process environment
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or a numeric setting cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;

        let log_level = parse_log_level(lookup("LOG_LEVEL").as_deref());

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Token lifetimes
        let access_token_ttl = parse_seconds(lookup("ACCESS_TOKEN_TTL_SECONDS"), "ACCESS_TOKEN_TTL_SECONDS")?
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL);
        let refresh_token_ttl = parse_seconds(lookup("REFRESH_TOKEN_TTL_SECONDS"), "REFRESH_TOKEN_TTL_SECONDS")?
            .unwrap_or(DEFAULT_REFRESH_TOKEN_TTL);

        // Maintenance
        let token_cleanup_interval = parse_seconds(
            lookup("TOKEN_CLEANUP_INTERVAL_SECONDS"),
            "TOKEN_CLEANUP_INTERVAL_SECONDS",
        )?
        .unwrap_or(DEFAULT_TOKEN_CLEANUP_INTERVAL) as u64;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            access_token_ttl,
            refresh_token_ttl,
            token_cleanup_interval,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8000")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, falling back to INFO.
pub fn parse_log_level(value: Option<&str>) -> Level {
    match value.unwrap_or("info").to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn parse_seconds(value: Option<String>, name: &str) -> Result<Option<i64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let seconds: i64 = value.parse().wrap_err_with(|| format!("Invalid {name} value"))?;
    if seconds <= 0 {
        eyre::bail!("{name} must be positive");
    }
    Ok(Some(seconds))
}
