//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default output format name.
fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default output format for view commands (`json`, `table`, `raw`).
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}
