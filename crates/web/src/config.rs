//! Web application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ASSISTANT_HOST` - Bind address (default: 127.0.0.1)
//! - `ASSISTANT_PORT` - Listen port (default: 3000)
//! - `ASSISTANT_BASE_URL` - Public URL of the app (default: <http://localhost:3000>)
//! - `SEARCH_API_URL` - Base URL of the product search service (default: <http://localhost:8000>)
//! - `SESSION_IDLE_MINUTES` - Minutes of inactivity before a session is dropped (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_SEARCH_API_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the app
    pub base_url: String,
    /// Base URL of the product search service
    pub search_api_url: Url,
    /// Inactivity after which a session and its preferences are dropped
    pub session_idle: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            search_api_url: default_search_api_url(),
            session_idle: Duration::from_secs(60 * 60),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get("ASSISTANT_HOST") {
            Some(v) => v.parse::<IpAddr>().map_err(|e| invalid("ASSISTANT_HOST", e))?,
            None => defaults.host,
        };
        let port = match get("ASSISTANT_PORT") {
            Some(v) => v.parse::<u16>().map_err(|e| invalid("ASSISTANT_PORT", e))?,
            None => defaults.port,
        };
        let base_url = get("ASSISTANT_BASE_URL").unwrap_or(defaults.base_url);
        let search_api_url = match get("SEARCH_API_URL") {
            Some(v) => parse_base_url("SEARCH_API_URL", &v)?,
            None => defaults.search_api_url,
        };
        let session_idle = match get("SESSION_IDLE_MINUTES") {
            Some(v) => parse_minutes("SESSION_IDLE_MINUTES", &v)?,
            None => defaults.session_idle,
        };
        let sentry_sample_rate = match get("SENTRY_SAMPLE_RATE") {
            Some(v) => parse_rate("SENTRY_SAMPLE_RATE", &v)?,
            None => defaults.sentry_sample_rate,
        };
        let sentry_traces_sample_rate = match get("SENTRY_TRACES_SAMPLE_RATE") {
            Some(v) => parse_rate("SENTRY_TRACES_SAMPLE_RATE", &v)?,
            None => defaults.sentry_traces_sample_rate,
        };

        Ok(Self {
            host,
            port,
            base_url,
            search_api_url,
            session_idle,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the app is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

fn default_search_api_url() -> Url {
    Url::parse(DEFAULT_SEARCH_API_URL).expect("default search API URL is valid")
}

/// Parse an absolute http(s) URL.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| invalid(key, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(key, format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

/// Parse a positive number of minutes.
fn parse_minutes(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let minutes = value.parse::<u64>().map_err(|e| invalid(key, e))?;
    if minutes == 0 {
        return Err(invalid(key, "must be at least 1"));
    }
    Ok(Duration::from_secs(minutes * 60))
}

/// Parse a sample rate in `[0, 1]`.
fn parse_rate(key: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value.parse::<f32>().map_err(|e| invalid(key, e))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(invalid(key, format!("{rate} is outside 0.0..=1.0")));
    }
    Ok(rate)
}
