//! Suspicious-activity reasons.

use crate::api::FraudApi;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct SuspiciousActivityClient<A> {
    api: A,
}

impl<A: FraudApi> SuspiciousActivityClient<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Reasons the service considers the account's activity suspicious.
    ///
    /// An empty list means nothing suspicious was found. Reasons are only
    /// produced by the recalculation endpoint, so this call also persists a
    /// fresh score server-side.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` or `ClientError::Service`.
    pub async fn list_reasons(&self, email: &str) -> Result<Vec<String>, ClientError> {
        Ok(self.api.calculate_score(email).await?.reasons)
    }
}
