//! Email → account id resolution.

use tg_core::AccountId;

use crate::api::FraudApi;
use crate::error::ClientError;

/// Resolves a signed-in email to the ledger account id.
///
/// The service offers no dedicated lookup; the id rides along on the score
/// lookup, so every resolution is also a (discarded) score read.
#[derive(Debug, Clone)]
pub struct IdentityResolver<A> {
    api: A,
}

impl<A: FraudApi> IdentityResolver<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// - `ClientError::Resolution` if the service rejects the lookup or the
    ///   response carries no id.
    /// - `ClientError::Network` if the service could not be reached.
    pub async fn resolve(&self, email: &str) -> Result<AccountId, ClientError> {
        let lookup = self.api.lookup_score(email).await.map_err(|error| match error {
            ClientError::Service { status, message } => ClientError::Resolution {
                email: email.to_string(),
                reason: message.unwrap_or_else(|| format!("service returned {status}")),
            },
            other => other,
        })?;
        lookup.account_id.ok_or_else(|| ClientError::Resolution {
            email: email.to_string(),
            reason: "response has no user_id".into(),
        })
    }
}
