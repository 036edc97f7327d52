use anyhow::Context;

use tg_client::HttpFraudApi;
use tg_config::TrustGuardConfig;
use tg_session::{SessionPersistence, SessionStore};

/// Everything a command needs: configuration and the device's session.
pub struct AppContext {
    pub config: TrustGuardConfig,
    pub session: SessionStore<Box<dyn SessionPersistence>>,
}

impl AppContext {
    pub fn init(config: TrustGuardConfig) -> anyhow::Result<Self> {
        let persistence = tg_session::persistence_from_config(&config.session)
            .context("failed to set up session storage")?;
        Ok(Self {
            session: SessionStore::open(persistence),
            config,
        })
    }

    pub fn api(&self) -> anyhow::Result<HttpFraudApi> {
        HttpFraudApi::new(&self.config.service).context("failed to build scoring service client")
    }
}
