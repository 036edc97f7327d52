//! Transactions: history for the resolved account, plus sending.
//!
//! Every history load resolves the account id first; if that fails no
//! history request is made. A send shows the transfer immediately as a
//! pending record, then re-reads the history once the service accepts it.
//! History reads replace the whole list, pending records included.

use std::cell::RefCell;

use chrono::Utc;
use serde::Serialize;

use tg_client::{FraudApi, IdentityResolver, TransactionClient};
use tg_core::{Identity, TransactionRecord};

use crate::notify::{Notice, Notifier};
use crate::screen::{ActionOutcome, InFlight, Screen};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionsState {
    pub email: Option<String>,
    pub history: Vec<TransactionRecord>,
    pub loading: bool,
    pub sending: bool,
}

pub struct TransactionsView<A, N> {
    resolver: IdentityResolver<A>,
    transactions: TransactionClient<A>,
    notifier: N,
    identity: RefCell<Option<Identity>>,
    history: RefCell<Vec<TransactionRecord>>,
    loading: InFlight,
    sending: InFlight,
}

impl<A: FraudApi + Clone, N: Notifier> TransactionsView<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            resolver: IdentityResolver::new(api.clone()),
            transactions: TransactionClient::new(api),
            notifier,
            identity: RefCell::new(None),
            history: RefCell::new(Vec::new()),
            loading: InFlight::default(),
            sending: InFlight::default(),
        }
    }
}

impl<A: FraudApi, N: Notifier> TransactionsView<A, N> {
    #[must_use]
    pub fn history(&self) -> Vec<TransactionRecord> {
        self.history.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.sending.is_active()
    }

    #[must_use]
    pub fn state(&self) -> TransactionsState {
        TransactionsState {
            email: self.current_email(),
            history: self.history(),
            loading: self.is_loading(),
            sending: self.is_sending(),
        }
    }

    /// Re-read the history. Refused while a load or a send is running.
    pub async fn refresh(&self) -> ActionOutcome {
        if self.sending.is_active() {
            return ActionOutcome::Busy;
        }
        let Some(_in_flight) = self.loading.try_enter() else {
            return ActionOutcome::Busy;
        };
        let Some(email) = self.current_email() else {
            self.notifier.notify(Notice::error("Please log in"));
            return ActionOutcome::Failed;
        };
        self.fetch_history(&email).await
    }

    /// Send `amount` to `recipient_email` from the signed-in identity.
    ///
    /// The pending record is visible before the request completes. On
    /// success the history is re-read exactly once; on failure the pending
    /// record is withdrawn. Refused while a load or another send is running.
    pub async fn send(&self, recipient_email: &str, amount: &str) -> ActionOutcome {
        if self.loading.is_active() {
            return ActionOutcome::Busy;
        }
        let Some(_sending) = self.sending.try_enter() else {
            return ActionOutcome::Busy;
        };
        let sender = self.identity.borrow().clone();
        let Some(sender) = sender else {
            self.notifier.notify(Notice::error("Please log in"));
            return ActionOutcome::Failed;
        };

        let transfer = match TransactionClient::<A>::prepare(
            &sender,
            recipient_email,
            amount,
            Utc::now(),
        ) {
            Ok(transfer) => transfer,
            Err(error) => {
                self.notifier
                    .notify(Notice::failure(&error, "Transaction failed"));
                return ActionOutcome::Failed;
            }
        };

        let pending = TransactionRecord::Pending(transfer.clone());
        self.history.borrow_mut().push(pending.clone());

        match self.transactions.submit(transfer).await {
            Ok(_) => {
                self.notifier.notify(Notice::info("Transaction sent"));
                self.fetch_history(&sender.email).await;
                ActionOutcome::Completed
            }
            Err(error) => {
                self.withdraw(&pending);
                self.notifier
                    .notify(Notice::failure(&error, "Transaction failed"));
                ActionOutcome::Failed
            }
        }
    }

    fn current_email(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|id| id.email.clone())
    }

    fn withdraw(&self, pending: &TransactionRecord) {
        let mut history = self.history.borrow_mut();
        if let Some(index) = history.iter().rposition(|record| record == pending) {
            history.remove(index);
        }
    }

    async fn fetch_history(&self, email: &str) -> ActionOutcome {
        let _in_flight = self.loading.enter();
        let account_id = match self.resolver.resolve(email).await {
            Ok(account_id) => account_id,
            Err(error) => {
                self.notifier
                    .notify(Notice::failure(&error, "Could not fetch user ID"));
                return ActionOutcome::Failed;
            }
        };
        match self.transactions.list_history(Some(&account_id)).await {
            Ok(transactions) => {
                tracing::debug!(%account_id, count = transactions.len(), "history loaded");
                *self.history.borrow_mut() = transactions
                    .into_iter()
                    .map(TransactionRecord::Confirmed)
                    .collect();
                ActionOutcome::Completed
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::failure(&error, "Failed to fetch transactions"));
                ActionOutcome::Failed
            }
        }
    }
}

impl<A: FraudApi, N: Notifier> Screen for TransactionsView<A, N> {
    async fn load(&self, identity: &Identity) {
        if self.identity.replace(Some(identity.clone())).as_ref() != Some(identity) {
            self.history.borrow_mut().clear();
        }
        self.fetch_history(&identity.email).await;
    }

    fn reset(&self) {
        self.identity.replace(None);
        self.history.borrow_mut().clear();
    }
}
