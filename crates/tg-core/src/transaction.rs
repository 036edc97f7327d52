//! Transaction records as seen by the client.
//!
//! A [`PendingTransfer`] is what the client built and sent; a [`Transaction`]
//! is what the ledger service reported back. Views hold both through
//! [`TransactionRecord`] until the next successful history fetch replaces
//! everything with server-confirmed entries.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::amount::Amount;
use crate::enums::TransactionStatus;
use crate::errors::CoreError;
use crate::identity::{Identity, validate_email};

/// A transaction as reported by the ledger service.
///
/// Deserialization accepts both the flat (`recipient_email`) and nested
/// (`recipient.user_email`) party shapes the service has used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTransaction")]
pub struct Transaction {
    pub sender_email: String,
    pub recipient_email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Party {
    #[serde(default)]
    user_email: String,
}

#[derive(Deserialize)]
struct RawTransaction {
    #[serde(default)]
    sender_email: Option<String>,
    #[serde(default)]
    sender: Option<Party>,
    #[serde(default)]
    recipient_email: Option<String>,
    #[serde(default)]
    recipient: Option<Party>,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(default)]
    status: Option<TransactionStatus>,
    #[serde(default)]
    flag_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        let party = |flat: Option<String>, nested: Option<Party>| {
            flat.filter(|email| !email.is_empty())
                .or_else(|| nested.map(|p| p.user_email))
                .unwrap_or_default()
        };
        Self {
            sender_email: party(raw.sender_email, raw.sender),
            recipient_email: party(raw.recipient_email, raw.recipient),
            amount: raw.amount,
            status: raw.status.unwrap_or(TransactionStatus::Pending),
            flag_reason: raw.flag_reason.filter(|reason| !reason.is_empty()),
            timestamp: raw.timestamp,
        }
    }
}

/// Accept RFC 3339 or a naive ISO-8601 timestamp (taken as UTC).
///
/// Unparseable values, including non-string JSON, become `None` rather than
/// failing the whole history.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_timestamp))
}

#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// A transfer the client has built but the service has not yet confirmed.
///
/// Its status is always `pending`, whatever the service answers to the
/// submission. Later states are only learned by re-reading the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransfer {
    pub sender_email: String,
    pub recipient_email: String,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

impl PendingTransfer {
    /// Build a pending transfer from the signed-in sender.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the recipient is not an email address.
    pub fn new(
        sender: &Identity,
        recipient_email: impl Into<String>,
        amount: Amount,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let recipient_email = recipient_email.into().trim().to_string();
        validate_email(&recipient_email)?;
        Ok(Self {
            sender_email: sender.email.clone(),
            recipient_email,
            amount,
            timestamp,
        })
    }

    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        TransactionStatus::Pending
    }
}

/// One row of a transaction history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransactionRecord {
    /// Optimistic record held by the client after a send.
    Pending(PendingTransfer),
    /// Record read back from the ledger service.
    Confirmed(Transaction),
}

impl TransactionRecord {
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        match self {
            Self::Pending(transfer) => transfer.status(),
            Self::Confirmed(transaction) => transaction.status.clone(),
        }
    }

    #[must_use]
    pub fn recipient_email(&self) -> &str {
        match self {
            Self::Pending(transfer) => &transfer.recipient_email,
            Self::Confirmed(transaction) => &transaction.recipient_email,
        }
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Pending(transfer) => transfer.amount.value(),
            Self::Confirmed(transaction) => transaction.amount,
        }
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_nested_party_shape() {
        let json = r#"{
            "sender": {"user_email": "alice@x.com", "user_fname": "Alice"},
            "recipient": {"user_email": "bob@x.com"},
            "amount": 50,
            "status": "flagged",
            "flag_reason": "Amount exceeds band limit",
            "timestamp": "2025-03-01T10:00:00.123456"
        }"#;
        let tx: Transaction = serde_json::from_str(json).expect("nested shape");
        assert_eq!(tx.sender_email, "alice@x.com");
        assert_eq!(tx.recipient_email, "bob@x.com");
        assert_eq!(tx.amount, Decimal::new(50, 0));
        assert_eq!(tx.status, TransactionStatus::Flagged);
        assert_eq!(tx.flag_reason.as_deref(), Some("Amount exceeds band limit"));
        assert!(tx.timestamp.is_some());
    }

    #[test]
    fn flat_party_shape_wins_over_nested() {
        let json = r#"{
            "recipient_email": "carol@x.com",
            "recipient": {"user_email": "bob@x.com"},
            "amount": 12.5,
            "status": "approved",
            "timestamp": "2025-03-01T10:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).expect("flat shape");
        assert_eq!(tx.recipient_email, "carol@x.com");
        assert_eq!(tx.sender_email, "");
        assert_eq!(tx.status, TransactionStatus::Approved);
    }

    #[rstest]
    #[case::unparseable_text(r#""yesterday""#)]
    #[case::epoch_number("1700000000")]
    #[case::object(r#"{"$date": "2025-03-01"}"#)]
    #[case::null("null")]
    fn bad_timestamp_does_not_fail_record(#[case] timestamp: &str) {
        let json = format!(
            r#"{{"recipient_email": "bob@x.com", "amount": 1, "timestamp": {timestamp}}}"#
        );
        let tx: Transaction = serde_json::from_str(&json).expect("lenient timestamp");
        assert!(tx.timestamp.is_none());
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn numeric_timestamp_does_not_fail_history() {
        let json = r#"[
            {"recipient_email": "bob@x.com", "amount": 5, "status": "approved", "timestamp": 1700000000},
            {"recipient_email": "carol@x.com", "amount": 7, "timestamp": "2025-03-01T10:00:00Z"}
        ]"#;
        let history: Vec<Transaction> = serde_json::from_str(json).expect("history");
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp.is_none());
        assert!(history[1].timestamp.is_some());
    }

    #[test]
    fn pending_transfer_is_always_pending() {
        let sender = Identity::new("alice@x.com").expect("valid");
        let amount = Amount::parse("50.00").expect("valid");
        let transfer =
            PendingTransfer::new(&sender, " bob@x.com ", amount, Utc::now()).expect("valid");
        assert_eq!(transfer.recipient_email, "bob@x.com");
        assert_eq!(transfer.status(), TransactionStatus::Pending);

        let record = TransactionRecord::Pending(transfer);
        assert!(!record.is_confirmed());
        assert_eq!(record.status(), TransactionStatus::Pending);
    }

    #[test]
    fn pending_transfer_rejects_bad_recipient() {
        let sender = Identity::new("alice@x.com").expect("valid");
        let amount = Amount::parse("1").expect("valid");
        assert!(PendingTransfer::new(&sender, "", amount, Utc::now()).is_err());
    }

    #[test]
    fn record_serializes_with_state_tag() {
        let sender = Identity::new("alice@x.com").expect("valid");
        let amount = Amount::parse("5").expect("valid");
        let transfer =
            PendingTransfer::new(&sender, "bob@x.com", amount, Utc::now()).expect("valid");
        let value = serde_json::to_value(TransactionRecord::Pending(transfer)).expect("json");
        assert_eq!(value["state"], "pending");
        assert_eq!(value["recipient_email"], "bob@x.com");
    }
}
