//! # Client Configuration
//!
//! - `TIMEMESH_API_URL`: Base URL of the API server (default: "http://localhost:8000")
//! - `TIMEMESH_SESSION_PATH`: JSON file holding the session; in-memory when unset
//! - `TIMEMESH_POLL_INTERVAL_SECONDS`: Teams/invites refresh interval (default: 30)
//! - `TIMEMESH_USERNAME` / `TIMEMESH_PASSWORD`: Credentials for unattended sign-in
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, WrapErr, eyre};
use std::{env, path::PathBuf, time::Duration};
use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub session_path: Option<PathBuf>,
    pub poll_interval: Duration,
    pub username: Option<String>,
    pub password: Option<String>,
    pub log_level: Level,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TIMEMESH_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(eyre!("TIMEMESH_API_URL must start with http:// or https://"));
        }

        let session_path = lookup("TIMEMESH_SESSION_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let poll_interval = match lookup("TIMEMESH_POLL_INTERVAL_SECONDS") {
            Some(value) => {
                let seconds: u64 = value
                    .parse()
                    .wrap_err("Invalid TIMEMESH_POLL_INTERVAL_SECONDS value")?;
                if seconds == 0 {
                    return Err(eyre!("TIMEMESH_POLL_INTERVAL_SECONDS must be positive"));
                }
                Duration::from_secs(seconds)
            }
            None => DEFAULT_POLL_INTERVAL,
        };

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            api_url,
            session_path,
            poll_interval,
            username: lookup("TIMEMESH_USERNAME"),
            password: lookup("TIMEMESH_PASSWORD"),
            log_level,
        })
    }

    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}
