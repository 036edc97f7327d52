//! # tg-config
//!
//! Layered configuration loading for TrustGuard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TRUSTGUARD_*` prefix, `__` as separator)
//! 2. Project-level `.trustguard/config.toml`
//! 3. User-level `~/.config/trustguard/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TRUSTGUARD_SERVICE__BASE_URL` -> `service.base_url`,
//! `TRUSTGUARD_SESSION__BACKEND` -> `session.backend`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tg_config::TrustGuardConfig;
//!
//! let config = TrustGuardConfig::load().expect("config");
//! println!("scoring service: {}", config.service.base_url());
//! ```

mod error;
mod general;
mod service;
mod session;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use service::ServiceConfig;
pub use session::{SessionBackend, SessionConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrustGuardConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TrustGuardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; the binary loads it before building the figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or the service section is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or the service section is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.service.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".trustguard/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TRUSTGUARD_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trustguard").join("config.toml"))
    }
}
