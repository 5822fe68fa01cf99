//! Client configuration.
//!
//! # Responsibility
//! - Hold the fixed API base URL and optional request timeout.
//! - Name the environment variables front ends read overrides from.
//!
//! # Invariants
//! - `base_url` never ends with `/`; endpoint paths always start with one.
//! - A validated config always carries an absolute http(s) URL.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use url::Url;

/// Default API root used by the reference backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "SMARTNOTES_API_URL";
pub const TIMEOUT_SECS_ENV: &str = "SMARTNOTES_TIMEOUT_SECS";
pub const LOG_LEVEL_ENV: &str = "SMARTNOTES_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SMARTNOTES_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, message: String },
    UnsupportedScheme(String),
    InvalidTimeout(String),
    /// HTTP client could not be constructed from this config.
    HttpClient(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { value, message } => {
                write!(f, "invalid api base url `{value}`: {message}")
            }
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported api url scheme `{scheme}`; expected http|https")
            }
            Self::InvalidTimeout(value) => {
                write!(f, "invalid timeout `{value}`; expected whole seconds > 0")
            }
            Self::HttpClient(message) => write!(f, "failed to build http client: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Transport-level configuration for [`crate::HttpApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout. `None` keeps the transport default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            message: err.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Joins an endpoint path (leading `/`) onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Parses a positive whole-second timeout.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}
