//! The scoring/ledger service contract and its HTTP implementation.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use tg_config::ServiceConfig;
use tg_core::{AccountId, PendingTransfer, ScoreSnapshot, Transaction};

use crate::error::ClientError;
use crate::http::check_response;
use crate::wire::{
    CalculateResponse, EmailRequest, ScoreResponse, TransactionRequest, TransactionsResponse,
};

/// Outcome of `POST /score`.
///
/// The same call reports the user's current score and their ledger account
/// id, so both come back together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLookup {
    pub snapshot: ScoreSnapshot,
    pub account_id: Option<AccountId>,
}

/// Outcome of `POST /score/calculate`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recalculation {
    pub score: Option<f64>,
    /// Suspicious-activity reasons. Empty means none were found.
    pub reasons: Vec<String>,
}

/// The four operations of the scoring/ledger service.
///
/// Every call may fail with [`ClientError::Network`] or
/// [`ClientError::Service`]. No call is retried.
#[allow(async_fn_in_trait)]
pub trait FraudApi {
    /// Read-only score lookup. Also the only source of the account id.
    async fn lookup_score(&self, email: &str) -> Result<ScoreLookup, ClientError>;

    /// Recompute the score server-side. Not idempotent: the service persists
    /// the new score.
    async fn calculate_score(&self, email: &str) -> Result<Recalculation, ClientError>;

    /// Create a transaction. The service may echo the stored record back.
    async fn create_transaction(
        &self,
        transfer: &PendingTransfer,
    ) -> Result<Option<Transaction>, ClientError>;

    /// Transaction history for a resolved account.
    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, ClientError>;
}

impl<T: FraudApi + ?Sized> FraudApi for &T {
    async fn lookup_score(&self, email: &str) -> Result<ScoreLookup, ClientError> {
        (**self).lookup_score(email).await
    }

    async fn calculate_score(&self, email: &str) -> Result<Recalculation, ClientError> {
        (**self).calculate_score(email).await
    }

    async fn create_transaction(
        &self,
        transfer: &PendingTransfer,
    ) -> Result<Option<Transaction>, ClientError> {
        (**self).create_transaction(transfer).await
    }

    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, ClientError> {
        (**self).list_transactions(account_id).await
    }
}

// ── HTTP ───────────────────────────────────────────────────────────

/// [`FraudApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpFraudApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFraudApi {
    /// Build from the `[service]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }
}

impl FraudApi for HttpFraudApi {
    async fn lookup_score(&self, email: &str) -> Result<ScoreLookup, ClientError> {
        let response: ScoreResponse = self.post_json("/score", &EmailRequest { email }).await?;
        Ok(ScoreLookup {
            snapshot: response.snapshot(),
            account_id: response.account_id(),
        })
    }

    async fn calculate_score(&self, email: &str) -> Result<Recalculation, ClientError> {
        let response: CalculateResponse = self
            .post_json("/score/calculate", &EmailRequest { email })
            .await?;
        Ok(Recalculation {
            score: response.score_calculated,
            reasons: response.reasons.unwrap_or_default(),
        })
    }

    async fn create_transaction(
        &self,
        transfer: &PendingTransfer,
    ) -> Result<Option<Transaction>, ClientError> {
        tracing::debug!(recipient = %transfer.recipient_email, "POST /transactions");
        let resp = self
            .http
            .post(self.url("/transactions"))
            .json(&TransactionRequest::from(transfer))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body = resp.bytes().await?;
        Ok(parse_echo(&body))
    }

    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, ClientError> {
        let path = format!(
            "/transactions/{}",
            urlencoding::encode(account_id.as_str())
        );
        tracing::debug!(path, "GET");
        let resp = self.http.get(self.url(&path)).send().await?;
        let resp = check_response(resp).await?;
        let body: TransactionsResponse = resp.json().await?;
        Ok(body.into_transactions())
    }
}

/// Best-effort read of the record echoed by `POST /transactions`.
///
/// The submission already succeeded, so an empty or unrecognized body is
/// not an error.
fn parse_echo(body: &[u8]) -> Option<Transaction> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(transaction) => Some(transaction),
        Err(error) => {
            tracing::debug!(%error, "ignoring unrecognized transaction echo");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tg_core::TransactionStatus;

    use super::*;

    #[test]
    fn builds_from_config_without_trailing_slash() {
        let config = ServiceConfig {
            base_url: "http://fraud.internal:5000/".into(),
            ..ServiceConfig::default()
        };
        let api = HttpFraudApi::new(&config).expect("client builds");
        assert_eq!(api.base_url(), "http://fraud.internal:5000");
        assert_eq!(api.url("/score"), "http://fraud.internal:5000/score");
    }

    #[test]
    fn echo_parses_stored_record() {
        let body = br#"{"recipient": {"user_email": "bob@x.com"}, "amount": 50, "status": "approved"}"#;
        let echo = parse_echo(body).expect("echo");
        assert_eq!(echo.recipient_email, "bob@x.com");
        assert_eq!(echo.status, TransactionStatus::Approved);
    }

    #[test]
    fn echo_tolerates_empty_or_foreign_bodies() {
        assert_eq!(parse_echo(b""), None);
        assert_eq!(parse_echo(b"  \n"), None);
        assert_eq!(parse_echo(br#"{"message": "created"}"#), None);
        assert_eq!(parse_echo(b"OK"), None);
    }
}
