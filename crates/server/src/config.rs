//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DELIVERY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `DELIVERY_HOST` - Bind address (default: 127.0.0.1)
//! - `DELIVERY_PORT` - Listen port (default: 8080)
//! - `VIACEP_BASE_URL` - ViaCEP endpoint (default: <https://viacep.com.br>)
//! - `VIACEP_TIMEOUT_MS` - Outbound lookup timeout in milliseconds (default: 5000)
//! - `VIACEP_USER_AGENT` - User-Agent sent to ViaCEP (default: delivery-server/<version>)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
const DEFAULT_VIACEP_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_USER_AGENT: &str = concat!("delivery-server/", env!("CARGO_PKG_VERSION"));

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Outbound address lookup configuration
    pub viacep: ViaCepConfig,
    /// Emit JSON logs instead of human-readable text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// ViaCEP address lookup client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViaCepConfig {
    /// Base URL; requests go to `{base_url}/ws/{cep}/json/`
    pub base_url: Url,
    /// Whole-request timeout for one lookup
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_VIACEP_BASE_URL).expect("default ViaCEP URL is valid"),
            timeout: Duration::from_millis(DEFAULT_VIACEP_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("DELIVERY_DATABASE_URL")?;
        let host = get_env_or_default("DELIVERY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DELIVERY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("DELIVERY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DELIVERY_PORT".to_string(), e.to_string()))?;

        let viacep = ViaCepConfig::from_env()?;
        let json_logs =
            get_optional_env("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json"));

        Ok(Self {
            database_url,
            host,
            port,
            viacep,
            json_logs,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ViaCepConfig {
    /// Load only the lookup client settings (used by the CLI as well).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an unparsable URL or timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_env_or_default(
            "VIACEP_BASE_URL",
            DEFAULT_VIACEP_BASE_URL,
        ))?;
        let timeout = parse_timeout_ms(&get_env_or_default(
            "VIACEP_TIMEOUT_MS",
            &DEFAULT_VIACEP_TIMEOUT_MS.to_string(),
        ))?;
        let user_agent = get_env_or_default("VIACEP_USER_AGENT", DEFAULT_USER_AGENT);

        Ok(Self {
            base_url,
            timeout,
            user_agent,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse the lookup base URL; it must be an absolute http(s) URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("VIACEP_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "VIACEP_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a timeout in milliseconds; zero is rejected.
fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    let millis = raw
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("VIACEP_TIMEOUT_MS".to_string(), e.to_string()))?;
    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "VIACEP_TIMEOUT_MS".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(millis))
}
