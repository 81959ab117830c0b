//! Server configuration.
//!
//! Loaded via the `config` crate from environment variables, with `__`
//! separating nested keys (for example `GATEWAY__APP_BASE_URL`).
//!
//! See [`GatewayConfig`] for where the clinic services live.

use clinic_gateway::GatewayConfig;
use serde::Deserialize;

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Clinic service endpoints.
    pub gateway: GatewayConfig,

    /// Credential cookie settings.
    #[serde(default)]
    pub cookie: CookieConfig,
}

/// How the credential cookie is issued.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CookieConfig {
    /// Whether to set the Secure flag (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure")]
    pub secure: bool,

    /// Cookie lifetime in minutes. Matches the auth service's token lifetime;
    /// the API still decides when the token itself stops working.
    #[serde(default = "default_max_age_minutes")]
    pub max_age_minutes: i64,
}

fn default_secure() -> bool {
    true
}

fn default_max_age_minutes() -> i64 {
    60
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: default_secure(),
            max_age_minutes: default_max_age_minutes(),
        }
    }
}

impl WebConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a service URL is missing or a value does not parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
