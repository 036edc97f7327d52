//! Cross-cutting error types for TrustGuard.
//!
//! Transport and service errors live in `tg-client`; a unified error is
//! deferred to `tg-cli` where all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any TrustGuard crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Client-side input failed validation (amount, email, recipient).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
