//! Client configuration
//!
//! Defaults can be overridden through the environment:
//! - `CHALLENGES_API_URL`
//! - `CHALLENGES_API_KEY`
//! - `CHALLENGES_TIMEOUT_SECS`

use serde::{Deserialize, Serialize};

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "https://api3.themonetizr.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the challenge backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as a bearer token when present
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a config for `base_url` with default timeout and no key
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load from environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CHALLENGES_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("CHALLENGES_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            timeout_secs: std::env::var("CHALLENGES_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}
