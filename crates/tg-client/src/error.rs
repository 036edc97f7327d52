//! Client error types.

use thiserror::Error;

use tg_core::CoreError;

/// Errors raised by the scoring/ledger clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never reached the service, or its response was undecodable.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Service {
        /// HTTP status code returned by the service.
        status: u16,
        /// The `error` (or `detail`) field of the response body, if present.
        message: Option<String>,
    },

    /// Identity resolution did not produce an account id.
    #[error("could not resolve an account id for {email}: {reason}")]
    Resolution { email: String, reason: String },

    /// A call that needs a resolved account id was made without one.
    #[error("no resolved account id; resolve the identity before fetching history")]
    UnresolvedIdentity,

    /// Client-side input was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] CoreError),
}

impl ClientError {
    /// Message the service sent with a non-success response, if any.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Service { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
