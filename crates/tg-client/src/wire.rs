//! Request and response bodies of the scoring/ledger service.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use tg_core::{AccountId, Amount, PendingTransfer, ScoreSnapshot, Transaction, TransactionStatus};

/// Body of `POST /score` and `POST /score/calculate`.
#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

/// `POST /score` response.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreResponse {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
}

impl ScoreResponse {
    #[must_use]
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot::new(
            self.score,
            self.flag.clone().unwrap_or_default(),
            self.message.clone().unwrap_or_default(),
        )
    }

    /// The identifier field, accepting string or numeric ids.
    #[must_use]
    pub fn account_id(&self) -> Option<AccountId> {
        match self.user_id.as_ref()? {
            serde_json::Value::String(id) => AccountId::new(id.clone()),
            serde_json::Value::Number(id) => AccountId::new(id.to_string()),
            _ => None,
        }
    }
}

/// `POST /score/calculate` response.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateResponse {
    #[serde(default)]
    pub score_calculated: Option<f64>,
    #[serde(default)]
    pub reasons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartyRef {
    pub user_email: String,
}

/// `POST /transactions` body.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub sender: PartyRef,
    pub recipient: PartyRef,
    pub amount: Amount,
    pub status: TransactionStatus,
    pub timestamp: String,
}

impl From<&PendingTransfer> for TransactionRequest {
    fn from(transfer: &PendingTransfer) -> Self {
        Self {
            sender: PartyRef {
                user_email: transfer.sender_email.clone(),
            },
            recipient: PartyRef {
                user_email: transfer.recipient_email.clone(),
            },
            amount: transfer.amount,
            status: transfer.status(),
            timestamp: transfer
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// `GET /transactions/{user_id}` response: wrapped, empty object, or bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransactionsResponse {
    Bare(Vec<Transaction>),
    Wrapped {
        #[serde(default)]
        transactions: Vec<Transaction>,
    },
}

impl TransactionsResponse {
    #[must_use]
    pub fn into_transactions(self) -> Vec<Transaction> {
        match self {
            Self::Bare(transactions) | Self::Wrapped { transactions } => transactions,
        }
    }
}
