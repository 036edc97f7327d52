//! # tg-client
//!
//! Typed clients for the TrustGuard scoring/ledger service.
//!
//! [`FraudApi`] is the wire contract (four JSON endpoints); [`HttpFraudApi`]
//! implements it over reqwest. The domain clients wrap a `FraudApi` and add
//! the per-operation rules:
//!
//! - [`IdentityResolver`]: email → account id
//! - [`TrustScoreClient`]: score snapshot and recalculation
//! - [`SuspiciousActivityClient`]: suspicious-activity reasons
//! - [`TransactionClient`]: transfer submission and history
//!
//! Clients hold no state between calls and never retry.

mod api;
mod error;
mod http;
mod resolver;
mod score;
mod suspicious;
mod transactions;
pub mod wire;

pub use api::{FraudApi, HttpFraudApi, Recalculation, ScoreLookup};
pub use error::ClientError;
pub use resolver::IdentityResolver;
pub use score::TrustScoreClient;
pub use suspicious::SuspiciousActivityClient;
pub use transactions::{Submission, TransactionClient};
