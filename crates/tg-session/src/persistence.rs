//! Device-local key-value persistence for the signed-in identity.
//!
//! The identity is serialized as JSON under a fixed key. It is read once at
//! startup, written on login and removed on logout.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tg_core::Identity;

use crate::error::SessionError;

/// Storage collaborator for [`crate::SessionStore`].
pub trait SessionPersistence {
    /// Read the stored identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing store cannot be read or holds
    /// something that is not an identity.
    fn load(&self) -> Result<Option<Identity>, SessionError>;

    /// Store `identity`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing store cannot be written.
    fn save(&self, identity: &Identity) -> Result<(), SessionError>;

    /// Remove the stored identity. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing store cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

impl<T: SessionPersistence + ?Sized> SessionPersistence for Box<T> {
    fn load(&self) -> Result<Option<Identity>, SessionError> {
        (**self).load()
    }

    fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        (**self).save(identity)
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

// --- File ---

/// JSON file holding `{ "<key>": <identity> }`.
///
/// On unix the parent directory is created `0700` and the file `0600`.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
    key: String,
}

impl FilePersistence {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Build from `[session]` configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoLocation` if no override is set and the user
    /// config directory cannot be determined.
    pub fn from_config(config: &tg_config::SessionConfig) -> Result<Self, SessionError> {
        let path = config.file_path().ok_or(SessionError::NoLocation)?;
        Ok(Self::new(path, config.key.clone()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, serde_json::Value>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(SessionError::Persistence(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| SessionError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn write_entries(
        &self,
        entries: &BTreeMap<String, serde_json::Value>,
    ) -> Result<(), SessionError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    SessionError::Persistence(format!(
                        "failed to delete {}: {e}",
                        self.path.display()
                    ))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SessionError::Persistence(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| SessionError::Persistence(format!("serialize session: {e}")))?;
        fs::write(&self.path, body).map_err(|e| {
            SessionError::Persistence(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                SessionError::Persistence(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }
}

impl SessionPersistence for FilePersistence {
    fn load(&self) -> Result<Option<Identity>, SessionError> {
        let mut entries = self.read_entries()?;
        entries
            .remove(&self.key)
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| SessionError::Corrupt(format!("key '{}': {e}", self.key)))
            })
            .transpose()
    }

    fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        let mut entries = self.read_entries().unwrap_or_else(|error| {
            tracing::warn!(%error, "discarding unreadable session file");
            BTreeMap::new()
        });
        let value = serde_json::to_value(identity)
            .map_err(|e| SessionError::Persistence(format!("serialize identity: {e}")))?;
        entries.insert(self.key.clone(), value);
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.remove(&self.key);
        self.write_entries(&entries)
    }
}

// --- Memory ---

/// In-process store. Clones share the same entries, so a clone handed to a
/// second [`crate::SessionStore`] behaves like the same device after a restart.
#[derive(Debug, Clone)]
pub struct MemoryPersistence {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    key: String,
}

impl Default for MemoryPersistence {
    fn default() -> Self {
        Self::new("user")
    }
}

impl MemoryPersistence {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            key: key.into(),
        }
    }

    /// Raw serialized value under the store's key.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&self.key).cloned())
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> R,
    ) -> Result<R, SessionError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| SessionError::Persistence("memory store poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Identity>, SessionError> {
        let raw = self.with_entries(|entries| entries.get(&self.key).cloned())?;
        raw.map(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| SessionError::Corrupt(format!("key '{}': {e}", self.key)))
        })
        .transpose()
    }

    fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity)
            .map_err(|e| SessionError::Persistence(format!("serialize identity: {e}")))?;
        self.with_entries(|entries| {
            entries.insert(self.key.clone(), raw);
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.with_entries(|entries| {
            entries.remove(&self.key);
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn alice() -> Identity {
        Identity::new("alice@x.com")
            .expect("valid")
            .with_display_name("Alice")
    }

    #[test]
    fn file_save_load_clear_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FilePersistence::new(tmp.path().join("tg").join("session.json"), "user");

        assert_eq!(store.load().expect("empty load"), None);

        store.save(&alice()).expect("save");
        assert_eq!(store.load().expect("load"), Some(alice()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "session file should be 0600");
        }

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load after clear"), None);
        assert!(!store.path().exists(), "empty session file is removed");
    }

    #[test]
    fn file_clear_keeps_other_keys() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        let user = FilePersistence::new(&path, "user");
        let other = FilePersistence::new(&path, "other");

        user.save(&alice()).expect("save user");
        other.save(&alice()).expect("save other");
        user.clear().expect("clear user");

        assert_eq!(user.load().expect("load user"), None);
        assert_eq!(other.load().expect("load other"), Some(alice()));
    }

    #[test]
    fn file_with_garbage_is_corrupt() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        fs::write(&path, "not json").expect("write");

        let store = FilePersistence::new(&path, "user");
        assert!(matches!(store.load(), Err(SessionError::Corrupt(_))));

        // A fresh login overwrites the unreadable file.
        store.save(&alice()).expect("save over garbage");
        assert_eq!(store.load().expect("load"), Some(alice()));
    }

    #[test]
    fn whitespace_only_file_is_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        fs::write(&path, "   \n  ").expect("write");
        let store = FilePersistence::new(&path, "user");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn memory_clones_share_entries() {
        let first = MemoryPersistence::default();
        let second = first.clone();
        first.save(&alice()).expect("save");
        assert_eq!(second.load().expect("load"), Some(alice()));
        assert!(first.raw().is_some_and(|raw| raw.contains("alice@x.com")));
    }
}
