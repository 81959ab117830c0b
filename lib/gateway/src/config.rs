//! Where the clinic services live.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Base URLs and request timeout for the clinic services.
///
/// Base URLs are stored without a trailing slash so endpoint paths can be
/// appended directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// App service: directory, booking, profile and slots.
    #[serde(deserialize_with = "base_url")]
    pub app_base_url: String,
    /// Auth service: login and registration.
    #[serde(deserialize_with = "base_url")]
    pub auth_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn base_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize(&String::deserialize(deserializer)?))
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl GatewayConfig {
    #[must_use]
    pub fn new(app_base_url: &str, auth_base_url: &str) -> Self {
        Self {
            app_base_url: normalize(app_base_url),
            auth_base_url: normalize(auth_base_url),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(crate) fn app_url(&self, path: &str) -> String {
        format!("{}{path}", self.app_base_url)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}{path}", self.auth_base_url)
    }
}
