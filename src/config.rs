use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Upper bound on each phase of handling a single connection.
pub const PHASE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = ServerConfig::default();

        let host = env::var("SERVER_HOST").unwrap_or(defaults.host);
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid SERVER_PORT".to_string()))?;

        Ok(Config {
            server: ServerConfig { host, port },
        })
    }
}

/// Per-connection timing bounds enforced while the server is listening.
///
/// Each field caps one phase of a connection's life: reading the request
/// body, reading its headers, writing the response, and sitting idle
/// between keep-alive requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub read: Duration,
    pub read_header: Duration,
    pub write: Duration,
    pub idle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: PHASE_TIMEOUT,
            read_header: PHASE_TIMEOUT,
            write: PHASE_TIMEOUT,
            idle: PHASE_TIMEOUT,
        }
    }
}

impl Timeouts {
    /// The deadline applied to each in-flight request.
    ///
    /// The middleware stack exposes a single whole-request timeout, so the
    /// tightest of the in-request phase bounds becomes that deadline.
    pub fn request_deadline(&self) -> Duration {
        self.read.min(self.read_header).min(self.write)
    }
}
