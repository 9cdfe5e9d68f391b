//! Shared-expense settlement workflow.

use crate::api::{AlgodClient, ConfirmationResult};
use crate::config::AlgoTrustConfig;
use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::signing::WalletSigner;
use crate::transaction::{TransactionBuilder, TransactionGroup, MAX_GROUP_SIZE};
use crate::types::{Address, MicroAlgos};
use crate::workflows::sign_submit_confirm;
use tracing::debug;

/// A settlement plan: who gets paid, and how much each.
///
/// The per-head share is the total divided evenly, rounded half-up to the
/// nearest microAlgo. Rounding drift of a microAlgo across the group is
/// accepted rather than redistributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// The participants to pay, in input order.
    pub participants: Vec<Address>,
    /// The amount each participant receives.
    pub share: MicroAlgos,
}

/// Expense-splitting operations, borrowed from the facade.
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    algod: &'a AlgodClient,
    config: &'a AlgoTrustConfig,
}

impl<'a> Split<'a> {
    pub(crate) fn new(algod: &'a AlgodClient, config: &'a AlgoTrustConfig) -> Self {
        Self { algod, config }
    }

    /// Parses a newline-separated participant list and computes the
    /// per-head share of the total.
    ///
    /// Blank lines and surrounding whitespace are ignored. No network
    /// interaction takes place.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::Construction`] when the list is empty or
    /// larger than one atomic group can hold, an invalid-address error for
    /// a malformed entry, or a construction error for a bad total.
    pub fn calculate_shares(total_algos: f64, participant_list: &str) -> AlgoTrustResult<SplitPlan> {
        let participants = participant_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Address::new)
            .collect::<AlgoTrustResult<Vec<_>>>()?;

        let share = Self::share_of(total_algos, &participants)?;
        Ok(SplitPlan {
            participants,
            share,
        })
    }

    fn share_of(total_algos: f64, participants: &[Address]) -> AlgoTrustResult<MicroAlgos> {
        if participants.is_empty() {
            return Err(AlgoTrustError::construction(
                "At least one participant is required",
            ));
        }
        if participants.len() > MAX_GROUP_SIZE {
            return Err(AlgoTrustError::construction(format!(
                "{} participants exceed the atomic group limit of {MAX_GROUP_SIZE}",
                participants.len()
            )));
        }
        MicroAlgos::from_algos(total_algos / participants.len() as f64)
    }

    /// Settles an expense by paying every participant their share in one
    /// atomic group.
    ///
    /// The participant count is validated against the group limit before
    /// anything is fetched from the network.
    ///
    /// # Errors
    ///
    /// Fails on an empty or oversized participant list, an invalid total,
    /// a cancelled or failed wallet prompt, node rejection, or
    /// confirmation timeout.
    pub async fn settle(
        &self,
        sender: &Address,
        total_algos: f64,
        participants: &[Address],
        signer: &dyn WalletSigner,
    ) -> AlgoTrustResult<ConfirmationResult> {
        let share = Self::share_of(total_algos, participants)?;
        debug!(
            sender = %sender.truncate(),
            participants = participants.len(),
            %share,
            "building settlement group"
        );

        let params = self.algod.suggested_params().await?;

        let payments = participants
            .iter()
            .map(|participant| {
                TransactionBuilder::new()
                    .sender(sender.clone())
                    .params(params.clone())
                    .payment(participant.clone(), share)
                    .build()
            })
            .collect::<AlgoTrustResult<Vec<_>>>()?;

        let group = TransactionGroup::assign(payments)?;
        sign_submit_confirm(self.algod, group, signer, self.config.max_wait_rounds()).await
    }
}
