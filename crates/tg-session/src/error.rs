use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Persistence(String),

    #[error("stored session is unreadable: {0}")]
    Corrupt(String),

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("cannot locate session file; set TRUSTGUARD_SESSION__PATH")]
    NoLocation,
}
