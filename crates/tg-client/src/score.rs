//! Trust score reads and recalculation.

use tg_core::ScoreSnapshot;

use crate::api::FraudApi;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct TrustScoreClient<A> {
    api: A,
}

impl<A: FraudApi> TrustScoreClient<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Current score, flag, and warning for `email`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` or `ClientError::Service`.
    pub async fn fetch_current(&self, email: &str) -> Result<ScoreSnapshot, ClientError> {
        Ok(self.api.lookup_score(email).await?.snapshot)
    }

    /// Ask the service to recompute the score and return the new value.
    ///
    /// The service persists the result. Flag and warning are not returned;
    /// callers keep whatever they had.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` or `ClientError::Service`, or
    /// `ClientError::Network` if a success response has no score.
    pub async fn recalculate(&self, email: &str) -> Result<f64, ClientError> {
        self.api
            .calculate_score(email)
            .await?
            .score
            .ok_or_else(|| ClientError::Network("response has no score_calculated".into()))
    }
}
