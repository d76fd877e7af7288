//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Default per-request deadline in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Deadline for one orchestration run; `None` disables it.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ANON_API_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `ANON_REQUEST_TIMEOUT_SECS` | Run deadline, `0` disables | `30` |
    ///
    /// Model settings (`GEMINI_*`) are read by the orchestrator.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ANON_API_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let timeout_secs = match env::var("ANON_REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(value))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            addr,
            request_timeout,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ANON_API_ADDR format")]
    InvalidAddr,

    #[error("Invalid ANON_REQUEST_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}
