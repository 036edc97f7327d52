use anyhow::Context;

use tg_config::TrustGuardConfig;

use crate::cli::GlobalFlags;

/// Load configuration: `.env`, config files, `TRUSTGUARD_*`, then flags.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TrustGuardConfig> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            tracing::warn!(%error, "ignoring unreadable .env file");
        }
    }

    let mut figment = TrustGuardConfig::figment();
    if let Some(base_url) = &flags.base_url {
        figment = figment.merge(("service.base_url", base_url));
    }

    TrustGuardConfig::from_figment(&figment).context("failed to load trustguard configuration")
}
