use tg_core::Identity;

use crate::error::SessionError;
use crate::persistence::{FilePersistence, SessionPersistence};

const DEFAULT_KEYRING_SERVICE: &str = "trustguard-cli";

/// Returns the keyring service name.
///
/// Defaults to `"trustguard-cli"`. Override via `TRUSTGUARD_KEYRING_SERVICE`
/// for testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("TRUSTGUARD_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// OS keychain storage with a file fallback.
///
/// Writes go to the keychain; if the keychain is unavailable they go to the
/// file instead. Reads check the keychain first, then the file.
#[derive(Debug, Clone)]
pub struct KeyringPersistence {
    key: String,
    fallback: FilePersistence,
}

impl KeyringPersistence {
    #[must_use]
    pub fn new(key: impl Into<String>, fallback: FilePersistence) -> Self {
        Self {
            key: key.into(),
            fallback,
        }
    }

    fn entry(&self) -> Result<::keyring::Entry, SessionError> {
        ::keyring::Entry::new(&keyring_service(), &self.key)
            .map_err(|e| SessionError::Keyring(e.to_string()))
    }
}

impl SessionPersistence for KeyringPersistence {
    fn load(&self) -> Result<Option<Identity>, SessionError> {
        if let Ok(entry) = self.entry() {
            if let Ok(raw) = entry.get_password() {
                if !raw.trim().is_empty() {
                    return serde_json::from_str(&raw)
                        .map(Some)
                        .map_err(|e| SessionError::Corrupt(format!("keyring entry: {e}")));
                }
            }
        }
        self.fallback.load()
    }

    fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity)
            .map_err(|e| SessionError::Persistence(format!("serialize identity: {e}")))?;
        match self.entry() {
            Ok(entry) => match entry.set_password(&raw) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.fallback.save(identity)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.fallback.save(identity)
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        // Ignore keyring errors: the entry may not exist.
        if let Ok(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        self.fallback.clear()
    }
}
