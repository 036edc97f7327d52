//! Transaction creation and history.

use chrono::{DateTime, Utc};

use tg_core::{AccountId, Amount, Identity, PendingTransfer, Transaction};

use crate::api::FraudApi;
use crate::error::ClientError;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// The transfer as the client built it. Always `pending`.
    pub record: PendingTransfer,
    /// The stored record, if the service echoed one back.
    pub server_echo: Option<Transaction>,
}

#[derive(Debug, Clone)]
pub struct TransactionClient<A> {
    api: A,
}

impl<A: FraudApi> TransactionClient<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Validate the inputs and build the pending record. Makes no request.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for an invalid recipient or amount.
    pub fn prepare(
        sender: &Identity,
        recipient_email: &str,
        amount: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<PendingTransfer, ClientError> {
        let amount = Amount::parse(amount)?;
        Ok(PendingTransfer::new(sender, recipient_email, amount, timestamp)?)
    }

    /// Send a prepared transfer.
    ///
    /// The returned record keeps status `pending` whatever the service
    /// answers; later states come only from [`Self::list_history`].
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Network` or `ClientError::Service`.
    pub async fn submit(&self, transfer: PendingTransfer) -> Result<Submission, ClientError> {
        let server_echo = self.api.create_transaction(&transfer).await?;
        tracing::info!(
            recipient = %transfer.recipient_email,
            amount = %transfer.amount,
            "transaction submitted"
        );
        Ok(Submission {
            record: transfer,
            server_echo,
        })
    }

    /// [`Self::prepare`] then [`Self::submit`].
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any request is made.
    pub async fn submit_transfer(
        &self,
        sender: &Identity,
        recipient_email: &str,
        amount: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Submission, ClientError> {
        let transfer = Self::prepare(sender, recipient_email, amount, timestamp)?;
        self.submit(transfer).await
    }

    /// Transaction history in service order.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::UnresolvedIdentity` without making a request
    /// when `account_id` is `None`, otherwise `ClientError::Network` or
    /// `ClientError::Service`.
    pub async fn list_history(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<Transaction>, ClientError> {
        let account_id = account_id.ok_or(ClientError::UnresolvedIdentity)?;
        self.api.list_transactions(account_id).await
    }
}
