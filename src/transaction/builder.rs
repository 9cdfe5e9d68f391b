//! Unsigned transaction construction.

use crate::api::SuggestedParams;
use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::transaction::types::{OnComplete, Transaction, TransactionType};
use crate::types::{Address, AppId, MicroAlgos};

/// Builder for unsigned transactions.
///
/// Every transaction needs a sender, a fresh parameter snapshot, and
/// exactly one payload. [`build`](Self::build) rejects incomplete input
/// before anything reaches the network.
///
/// # Example
///
/// ```rust
/// use algotrust_sdk::api::SuggestedParams;
/// use algotrust_sdk::transaction::TransactionBuilder;
/// use algotrust_sdk::types::MicroAlgos;
///
/// # fn example(params: SuggestedParams) -> anyhow::Result<()> {
/// let sender = "A".repeat(58).parse()?;
/// let receiver = "B".repeat(58).parse()?;
/// let txn = TransactionBuilder::new()
///     .sender(sender)
///     .params(params)
///     .payment(receiver, MicroAlgos(2_500_000))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    sender: Option<Address>,
    params: Option<SuggestedParams>,
    txn_type: Option<TransactionType>,
}

impl TransactionBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sending account.
    #[must_use]
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Sets the network parameter snapshot.
    #[must_use]
    pub fn params(mut self, params: SuggestedParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Makes this a payment transaction.
    #[must_use]
    pub fn payment(mut self, receiver: Address, amount: MicroAlgos) -> Self {
        self.txn_type = Some(TransactionType::Payment { receiver, amount });
        self
    }

    /// Makes this an application call. The first argument should name the
    /// method being invoked.
    #[must_use]
    pub fn app_call(mut self, app_id: AppId, app_args: Vec<Vec<u8>>) -> Self {
        self.txn_type = Some(TransactionType::AppCall {
            app_id,
            on_complete: OnComplete::NoOp,
            app_args,
        });
        self
    }

    /// Makes this an application opt-in, allocating local state for the
    /// sender.
    #[must_use]
    pub fn opt_in(mut self, app_id: AppId) -> Self {
        self.txn_type = Some(TransactionType::AppCall {
            app_id,
            on_complete: OnComplete::OptIn,
            app_args: Vec::new(),
        });
        self
    }

    /// Builds the unsigned transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::Construction`] when the sender, parameters,
    /// or payload have not been set.
    pub fn build(self) -> AlgoTrustResult<Transaction> {
        let sender = self
            .sender
            .ok_or_else(|| AlgoTrustError::construction("Sender is required"))?;
        let params = self
            .params
            .ok_or_else(|| AlgoTrustError::construction("Suggested params are required"))?;
        let txn_type = self
            .txn_type
            .ok_or_else(|| AlgoTrustError::construction("Transaction payload is required"))?;

        Ok(Transaction {
            sender,
            params,
            group: None,
            txn_type,
        })
    }
}
