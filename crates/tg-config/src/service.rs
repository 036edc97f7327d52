//! Remote scoring/ledger service configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "trustguard/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the scoring/ledger service (no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    /// Base URL with any trailing `/` removed, ready for path joining.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check the fields a client cannot work without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or non-http(s) base URL
    /// or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "service.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "service.base_url".into(),
                reason: format!("'{url}' must start with http:// or https://"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
