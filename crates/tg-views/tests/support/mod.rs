//! Scripted in-memory scoring/ledger service.
//!
//! Each endpoint has a queue of replies. A reply is either ready at once or
//! held behind a `oneshot` until the test releases it, which makes request
//! interleavings deterministic.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use tokio::sync::oneshot;

use tg_client::{ClientError, FraudApi, Recalculation, ScoreLookup};
use tg_core::{AccountId, Identity, PendingTransfer, ScoreSnapshot, Transaction, TransactionStatus};

pub type Gate<T> = oneshot::Sender<Result<T, ClientError>>;

enum Reply<T> {
    Ready(Result<T, ClientError>),
    Gated(oneshot::Receiver<Result<T, ClientError>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LookupScore(String),
    CalculateScore(String),
    CreateTransaction(PendingTransfer),
    ListTransactions(AccountId),
}

#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<Vec<Call>>,
    lookups: RefCell<VecDeque<Reply<ScoreLookup>>>,
    calculations: RefCell<VecDeque<Reply<Recalculation>>>,
    creations: RefCell<VecDeque<Reply<Option<Transaction>>>>,
    listings: RefCell<VecDeque<Reply<Vec<Transaction>>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn push_lookup(&self, reply: Result<ScoreLookup, ClientError>) -> &Self {
        self.lookups.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn gate_lookup(&self) -> Gate<ScoreLookup> {
        gate(&self.lookups)
    }

    pub fn push_calculation(&self, reply: Result<Recalculation, ClientError>) -> &Self {
        self.calculations.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn push_creation(&self, reply: Result<Option<Transaction>, ClientError>) -> &Self {
        self.creations.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    pub fn gate_creation(&self) -> Gate<Option<Transaction>> {
        gate(&self.creations)
    }

    pub fn push_listing(&self, reply: Result<Vec<Transaction>, ClientError>) -> &Self {
        self.listings.borrow_mut().push_back(Reply::Ready(reply));
        self
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn gate<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Gate<T> {
    let (tx, rx) = oneshot::channel();
    queue.borrow_mut().push_back(Reply::Gated(rx));
    tx
}

async fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>, endpoint: &str) -> Result<T, ClientError> {
    let reply = queue.borrow_mut().pop_front();
    match reply {
        Some(Reply::Ready(result)) => result,
        Some(Reply::Gated(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(ClientError::Network(format!("{endpoint} gate dropped")))),
        None => Err(ClientError::Network(format!("no scripted reply for {endpoint}"))),
    }
}

impl FraudApi for FakeApi {
    async fn lookup_score(&self, email: &str) -> Result<ScoreLookup, ClientError> {
        self.record(Call::LookupScore(email.to_string()));
        next(&self.lookups, "lookup_score").await
    }

    async fn calculate_score(&self, email: &str) -> Result<Recalculation, ClientError> {
        self.record(Call::CalculateScore(email.to_string()));
        next(&self.calculations, "calculate_score").await
    }

    async fn create_transaction(
        &self,
        transfer: &PendingTransfer,
    ) -> Result<Option<Transaction>, ClientError> {
        self.record(Call::CreateTransaction(transfer.clone()));
        next(&self.creations, "create_transaction").await
    }

    async fn list_transactions(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Transaction>, ClientError> {
        self.record(Call::ListTransactions(account_id.clone()));
        next(&self.listings, "list_transactions").await
    }
}

// ── Fixtures ───────────────────────────────────────────────────────

pub fn alice() -> Identity {
    Identity::new("alice@x.com")
        .expect("valid")
        .with_display_name("Alice")
}

pub fn lookup(score: f64, flag: &str, warning: &str, user_id: Option<&str>) -> ScoreLookup {
    ScoreLookup {
        snapshot: ScoreSnapshot::new(Some(score), flag, warning),
        account_id: user_id.and_then(AccountId::new),
    }
}

pub fn confirmed(recipient: &str, amount: i64, status: TransactionStatus) -> Transaction {
    Transaction {
        sender_email: "alice@x.com".into(),
        recipient_email: recipient.into(),
        amount: amount.into(),
        status,
        flag_reason: None,
        timestamp: None,
    }
}

pub fn rejected(status: u16, message: Option<&str>) -> ClientError {
    ClientError::Service {
        status,
        message: message.map(str::to_string),
    }
}
