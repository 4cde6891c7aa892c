//! Probe target configuration.

use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Environment variable naming the gateway host.
pub const HOST_ENV: &str = "HEALTH_CHECK_HOST";

/// Environment variable naming the gateway port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable naming the probe timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "HEALTH_CHECK_TIMEOUT";

/// Default gateway host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default gateway port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default probe timeout (5 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Ping endpoint path on the gateway.
pub const DEFAULT_PATH: &str = "/ping";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held an unparseable value.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    /// Configuration validation failed.
    #[error("config validation error: {0}")]
    Validation(String),
}

// =============================================================================
// Probe Configuration
// =============================================================================

/// Configuration for a single gateway probe.
///
/// Built once per invocation, either from the process environment
/// ([`ProbeConfig::from_env`]) or explicitly, and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Gateway host.
    pub host: String,
    /// Gateway port.
    pub port: u16,
    /// Hard timeout for the whole probe.
    pub timeout: Duration,
    /// Request path on the gateway.
    pub path: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Create a probe configuration for the given target.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Build the configuration from the process environment.
    ///
    /// Reads `HEALTH_CHECK_HOST`, `PORT` and `HEALTH_CHECK_TIMEOUT`,
    /// falling back to the defaults for unset variables.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidEnv` if a variable is set but does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_env(PORT_ENV, DEFAULT_PORT)?;
        let timeout_secs: u64 = parse_env(TIMEOUT_ENV, DEFAULT_TIMEOUT.as_secs())?;

        Ok(Self {
            host,
            port,
            timeout: Duration::from_secs(timeout_secs),
            path: DEFAULT_PATH.to_string(),
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Validation(
                "host must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Target address as `host:port`.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full probe URL.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.target(), self.path)
    }

    /// Set the probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                var,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}
