//! Application configuration module
//!
//! Configuration is layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`$CONFIG_DIR/remotedesk/config.toml`)
//! 3. `REMOTEDESK_*` environment variables
//!
//! ```toml
//! server_url = "https://remotedesk.example.com"
//! api_prefix = "/api"
//! request_timeout_secs = 30
//! start_route = "/dashboard"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_SERVER_URL: &str = "REMOTEDESK_API_URL";
pub const ENV_API_PREFIX: &str = "REMOTEDESK_API_PREFIX";
pub const ENV_REQUEST_TIMEOUT: &str = "REMOTEDESK_REQUEST_TIMEOUT_SECS";
pub const ENV_START_ROUTE: &str = "REMOTEDESK_START_ROUTE";

const APP_DIR: &str = "remotedesk";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Server origin, without trailing slash
    pub server_url: String,
    /// Path prefix every API route lives under
    pub api_prefix: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Where the credential token is persisted
    pub credentials_path: PathBuf,
    /// Page to open on launch, e.g. `/subscribe`
    pub start_route: Option<String>,
}

/// Shape of the optional config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    api_prefix: Option<String>,
    request_timeout_secs: Option<u64>,
    credentials_path: Option<PathBuf>,
    start_route: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            credentials_path: default_credentials_path(),
            start_route: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the default config file location and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = default_config_path().filter(|path| path.exists());
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from an optional file and an environment lookup.
    pub fn from_sources<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(path) = file {
            let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let parsed: FileConfig =
                toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
            tracing::debug!("Loaded config file {}", path.display());

            if let Some(url) = parsed.server_url {
                builder = builder.server_url(url);
            }
            if let Some(prefix) = parsed.api_prefix {
                builder = builder.api_prefix(prefix);
            }
            if let Some(secs) = parsed.request_timeout_secs {
                builder = builder.request_timeout_secs(secs);
            }
            if let Some(path) = parsed.credentials_path {
                builder = builder.credentials_path(path);
            }
            if let Some(route) = parsed.start_route {
                builder = builder.start_route(route);
            }
        }

        if let Some(url) = env(ENV_SERVER_URL) {
            builder = builder.server_url(url);
        }
        if let Some(prefix) = env(ENV_API_PREFIX) {
            builder = builder.api_prefix(prefix);
        }
        if let Some(raw) = env(ENV_REQUEST_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_REQUEST_TIMEOUT,
                message: format!("expected whole seconds, got '{}'", raw),
            })?;
            builder = builder.request_timeout_secs(secs);
        }
        if let Some(route) = env(ENV_START_ROUTE) {
            builder = builder.start_route(route);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.server_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.server_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.server_url,
                url.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Full URL for an API route such as `/auth/login`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.server_url, self.api_prefix, path)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    api_prefix: Option<String>,
    request_timeout_secs: Option<u64>,
    credentials_path: Option<PathBuf>,
    start_route: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    pub fn start_route(mut self, route: impl Into<String>) -> Self {
        self.start_route = Some(route.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            api_prefix: self
                .api_prefix
                .map(|prefix| normalize_prefix(&prefix))
                .unwrap_or(defaults.api_prefix),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            credentials_path: self.credentials_path.unwrap_or(defaults.credentials_path),
            start_route: self
                .start_route
                .map(|route| route.trim().to_string())
                .filter(|route| !route.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// `api/` and `/api/` both become `/api`; an empty prefix stays empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

pub fn default_credentials_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("credentials.json")
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("failed to parse config file: {0}")]
    Parse(String),
}
