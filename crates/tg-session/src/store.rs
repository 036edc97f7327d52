use tokio::sync::watch;

use tg_core::Identity;

use crate::error::SessionError;
use crate::persistence::SessionPersistence;

/// Who is signed in.
///
/// ```text
/// Anonymous ──login──▶ Authenticated(identity)
///     ▲                        │
///     └─────────logout─────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Receiving half handed to screens. Every change is observable via
/// [`watch::Receiver::changed`].
pub type SessionReceiver = watch::Receiver<SessionState>;

/// Observable owner of the session state.
///
/// The only writer of the signed-in identity; everything else subscribes.
pub struct SessionStore<P> {
    persistence: P,
    state: watch::Sender<SessionState>,
}

impl<P: SessionPersistence> SessionStore<P> {
    /// Open the store, restoring a persisted identity if one exists.
    ///
    /// An unreadable stored session is logged and treated as signed out.
    pub fn open(persistence: P) -> Self {
        let initial = match persistence.load() {
            Ok(Some(identity)) => {
                tracing::debug!(email = %identity.email, "restored persisted session");
                SessionState::Authenticated(identity)
            }
            Ok(None) => SessionState::Anonymous,
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable persisted session");
                SessionState::Anonymous
            }
        };
        let (state, _) = watch::channel(initial);
        Self { persistence, state }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Current identity, if signed in.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionReceiver {
        self.state.subscribe()
    }

    /// Sign in as `identity`, replacing any current identity.
    ///
    /// The identity is persisted before subscribers are notified; if it
    /// cannot be persisted the state does not change.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the persistence collaborator fails.
    pub fn login(&self, identity: Identity) -> Result<(), SessionError> {
        self.persistence.save(&identity)?;
        tracing::debug!(email = %identity.email, "session authenticated");
        self.state.send_replace(SessionState::Authenticated(identity));
        Ok(())
    }

    /// Sign out.
    ///
    /// The in-memory state always becomes `Anonymous`, even when clearing the
    /// persisted copy fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the persisted identity could not be removed.
    pub fn logout(&self) -> Result<(), SessionError> {
        let cleared = self.persistence.clear();
        self.state.send_replace(SessionState::Anonymous);
        tracing::debug!("session cleared");
        cleared
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::persistence::MemoryPersistence;

    fn alice() -> Identity {
        Identity::new("alice@x.com").expect("valid")
    }

    #[test]
    fn starts_anonymous_without_persisted_identity() {
        let store = SessionStore::open(MemoryPersistence::default());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.identity().is_none());
    }

    #[test]
    fn login_then_logout_transitions() {
        let persistence = MemoryPersistence::default();
        let store = SessionStore::open(persistence.clone());

        store.login(alice()).expect("login");
        assert_eq!(store.state(), SessionState::Authenticated(alice()));
        assert!(persistence.raw().is_some());

        store.logout().expect("logout");
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(persistence.raw().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_every_transition() {
        let store = SessionStore::open(MemoryPersistence::default());
        let mut rx = store.subscribe();

        store.login(alice()).expect("login");
        rx.changed().await.expect("sender alive");
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout().expect("logout");
        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
    }
}
