use serde::{Deserialize, Serialize};

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
}

/// Where the user resource lives and how to talk to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base address of the user resource, e.g. `https://localhost:7006/api/v1/user`
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Accept self-signed certificates (local development backends)
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// chrono format string for the date-of-birth column of the user table
    pub date_format: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `USERFORM__` prefix and `__` separator
            // e.g., USERFORM__API__BASE_URL="http://localhost:5000/api/v1/user"
            .add_source(
                config::Environment::with_prefix("USERFORM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:7006/api/v1/user".to_string(),
            timeout_seconds: 30,
            accept_invalid_certs: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
