//! # tg-session
//!
//! Session state for the TrustGuard client.
//!
//! [`SessionStore`] is a two-state machine (`Anonymous` / `Authenticated`)
//! published over a `tokio::sync::watch` channel so screens subscribe rather
//! than poll. The signed-in identity survives restarts through a
//! [`SessionPersistence`] collaborator: a JSON file, the OS keychain (with
//! file fallback), or memory for tests.

pub mod error;
pub mod keychain;
pub mod persistence;
pub mod store;

pub use error::SessionError;
pub use keychain::KeyringPersistence;
pub use persistence::{FilePersistence, MemoryPersistence, SessionPersistence};
pub use store::{SessionReceiver, SessionState, SessionStore};

/// Build the persistence backend selected in configuration.
///
/// # Errors
///
/// Returns `SessionError::NoLocation` if the session file location cannot be
/// determined.
pub fn persistence_from_config(
    config: &tg_config::SessionConfig,
) -> Result<Box<dyn SessionPersistence>, SessionError> {
    let file = FilePersistence::from_config(config)?;
    Ok(match config.backend {
        tg_config::SessionBackend::File => Box::new(file),
        tg_config::SessionBackend::Keyring => {
            Box::new(KeyringPersistence::new(config.key.clone(), file))
        }
    })
}
