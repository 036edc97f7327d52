//! Session persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_key() -> String {
    "user".to_string()
}

/// Where the signed-in identity is kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// JSON file under the user config directory.
    #[default]
    File,
    /// OS keychain, falling back to the file when unavailable.
    Keyring,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Override for the session file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Fixed key the identity is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: None,
            key: default_key(),
        }
    }
}

impl SessionConfig {
    /// Resolved session file path: the override, or
    /// `<config_dir>/trustguard/session.json`.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("trustguard").join("session.json"))
        })
    }
}
