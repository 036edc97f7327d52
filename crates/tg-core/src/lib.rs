//! # tg-core
//!
//! Core types and error types for TrustGuard.
//!
//! This crate provides the foundational types shared across all TrustGuard crates:
//! - `Identity` and the opaque `AccountId` issued by the scoring service
//! - `ScoreSnapshot` and the service's trust band table
//! - `Amount`, a positive cent-precision money value
//! - Transactions: server-confirmed records, optimistic pending transfers, and
//!   the `TransactionRecord` view that keeps the two apart
//! - Cross-cutting error types

pub mod amount;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod score;
pub mod transaction;

pub use amount::Amount;
pub use enums::{TransactionStatus, TrustBand};
pub use errors::CoreError;
pub use identity::{AccountId, Identity};
pub use score::ScoreSnapshot;
pub use transaction::{PendingTransfer, Transaction, TransactionRecord};
