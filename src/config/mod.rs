//! Application configuration module
//!
//! Configuration is environment-driven: `REMOTE_URL` points at the remote
//! data service and `SERVER_PORT` selects the listen port. Both fall back
//! to development defaults so a bare `cargo run` works against a locally
//! running backend.

use thiserror::Error;

/// Default base URL of the remote data service
pub const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:8090";

/// Default HTTP listen port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote data service (no trailing slash)
    pub remote_url: String,
    /// Port the HTTP server listens on
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `REMOTE_URL` and `SERVER_PORT`, falling back to defaults when
    /// unset or unparseable. Logs what it ended up with so misconfigured
    /// deployments are visible at startup.
    pub fn from_env() -> Self {
        let remote_url = match std::env::var("REMOTE_URL") {
            Ok(url) => normalize_url(&url),
            Err(_) => {
                tracing::warn!(
                    "REMOTE_URL not set, using default: {}",
                    DEFAULT_REMOTE_URL
                );
                DEFAULT_REMOTE_URL.to_string()
            }
        };

        let server_port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        tracing::info!("Remote data service: {}", remote_url);

        Self {
            remote_url,
            server_port,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote_url.is_empty() {
            return Err(ConfigError::MissingValue("remote_url"));
        }
        if !self.remote_url.starts_with("http://") && !self.remote_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.remote_url.clone()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    remote_url: Option<String>,
    server_port: Option<u16>,
}

impl AppConfigBuilder {
    /// Set the remote data service URL
    pub fn remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(normalize_url(&url.into()));
        self
    }

    /// Set the server port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            remote_url: self
                .remote_url
                .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
        };
        config.validate()?;
        Ok(config)
    }
}

// The client joins paths as "{remote_url}/api/...", so the base must not
// end with a slash.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
