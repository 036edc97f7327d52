//! Status and classification enums for TrustGuard.
//!
//! `TransactionStatus` is owned by the ledger service: the client creates
//! transfers as `pending` and only ever re-reads later states.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Status of a transaction as reported by the ledger service.
///
/// ```text
/// pending → approved
///         → rejected
///         → flagged
/// ```
///
/// Transitions happen server-side only. Values the client does not know are
/// preserved verbatim in [`TransactionStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
    Other(String),
}

impl TransactionStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Flagged => "flagged",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the service has not yet settled this transaction.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "flagged" => Self::Flagged,
            _ => Self::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrustBand
// ---------------------------------------------------------------------------

/// Score bands used by the scoring service to derive its flag and warning.
///
/// The client uses this table for display hints only; the service's own
/// flag/warning text is always what gets shown.
///
/// ```text
/// 90–100 Trusted │ 75–89 Normal │ 50–74 Risky │ 30–49 Fraud Prone │ 0–29 Critical
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    Trusted,
    Normal,
    Risky,
    FraudProne,
    Critical,
}

impl TrustBand {
    pub const ALL: [Self; 5] = [
        Self::Trusted,
        Self::Normal,
        Self::Risky,
        Self::FraudProne,
        Self::Critical,
    ];

    /// Band containing `score`, or `None` outside `0..=100`.
    ///
    /// Fractional scores fall into the band of their integer part.
    #[must_use]
    pub fn for_score(score: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&score) {
            return None;
        }
        let band = match score.floor() {
            s if s >= 90.0 => Self::Trusted,
            s if s >= 75.0 => Self::Normal,
            s if s >= 50.0 => Self::Risky,
            s if s >= 30.0 => Self::FraudProne,
            _ => Self::Critical,
        };
        Some(band)
    }

    /// Flag text the service reports for this band.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Trusted => "Trusted",
            Self::Normal => "Normal",
            Self::Risky => "Risky",
            Self::FraudProne => "Fraud Prone",
            Self::Critical => "Critical",
        }
    }

    /// Warning text the service reports for this band, if any.
    #[must_use]
    pub const fn warning(self) -> Option<&'static str> {
        match self {
            Self::Trusted => None,
            Self::Normal => Some("You can make transactions up to €5,000 in 3 months"),
            Self::Risky => Some("You can make up to 3 transactions over €1,000 in 1 month"),
            Self::FraudProne => {
                Some("You can make up to 10 transactions per month, each under €100")
            }
            Self::Critical => Some("Your account is locked. Identity verification required"),
        }
    }

    /// Look up a band by the service's flag text (case-insensitive).
    #[must_use]
    pub fn from_flag(flag: &str) -> Option<Self> {
        let flag = flag.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.flag().eq_ignore_ascii_case(flag))
    }
}

impl fmt::Display for TrustBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}
