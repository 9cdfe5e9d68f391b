//! Governance voting workflow.

use crate::api::{AlgodClient, ConfirmationResult, IndexerClient};
use crate::config::AlgoTrustConfig;
use crate::error::AlgoTrustResult;
use crate::signing::WalletSigner;
use crate::transaction::{encode_uint64, TransactionBuilder, TransactionGroup};
use crate::types::Address;
use crate::workflows::sign_submit_confirm;
use tracing::{debug, warn};

/// Global-state keys written by the voting contract.
const KEY_PROPOSAL_TITLE: &str = "proposal_title";
const KEY_VOTES_YES: &str = "votes_yes";
const KEY_VOTES_NO: &str = "votes_no";
const KEY_VOTING_ACTIVE: &str = "voting_active";

/// Title shown when the contract has no proposal set.
const NO_PROPOSAL_TITLE: &str = "No active proposal";

/// A vote on the current proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChoice {
    /// Vote against.
    No,
    /// Vote in favor.
    Yes,
}

impl VoteChoice {
    /// The integer encoding the contract expects.
    pub fn as_u64(self) -> u64 {
        match self {
            VoteChoice::No => 0,
            VoteChoice::Yes => 1,
        }
    }
}

/// A snapshot of the proposal's on-chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalInfo {
    /// The proposal title, or a placeholder when none is set.
    pub title: String,
    /// Votes in favor.
    pub votes_yes: u64,
    /// Votes against.
    pub votes_no: u64,
    /// Whether voting is open.
    pub active: bool,
}

/// Voting operations, borrowed from the facade.
#[derive(Debug, Clone, Copy)]
pub struct Voting<'a> {
    algod: &'a AlgodClient,
    indexer: &'a IndexerClient,
    config: &'a AlgoTrustConfig,
}

impl<'a> Voting<'a> {
    pub(crate) fn new(
        algod: &'a AlgodClient,
        indexer: &'a IndexerClient,
        config: &'a AlgoTrustConfig,
    ) -> Self {
        Self {
            algod,
            indexer,
            config,
        }
    }

    /// Reads the proposal state, with the typed error preserved.
    ///
    /// An unset or empty title falls back to a placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the application lookup fails.
    pub async fn try_proposal_data(&self) -> AlgoTrustResult<ProposalInfo> {
        let state = self
            .indexer
            .application_global_state(self.config.app_id())
            .await?;

        let title = state
            .text(KEY_PROPOSAL_TITLE)
            .filter(|t| !t.is_empty())
            .unwrap_or(NO_PROPOSAL_TITLE)
            .to_string();

        Ok(ProposalInfo {
            title,
            votes_yes: state.uint(KEY_VOTES_YES),
            votes_no: state.uint(KEY_VOTES_NO),
            active: state.flag(KEY_VOTING_ACTIVE),
        })
    }

    /// Reads the proposal state, collapsing any failure to `None`.
    pub async fn proposal_data(&self) -> Option<ProposalInfo> {
        match self.try_proposal_data().await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "failed to read proposal state");
                None
            }
        }
    }

    /// Casts a vote on the current proposal.
    ///
    /// A sender voting for the first time has not allocated local state
    /// yet, so an opt-in transaction is prepended and the pair is grouped
    /// atomically. A sender already opted in submits the vote call alone.
    ///
    /// # Errors
    ///
    /// Fails on a cancelled or failed wallet prompt, node rejection
    /// (including double votes, which the contract rejects), or
    /// confirmation timeout.
    pub async fn cast_vote(
        &self,
        sender: &Address,
        choice: VoteChoice,
        signer: &dyn WalletSigner,
    ) -> AlgoTrustResult<ConfirmationResult> {
        let account = self.algod.account_information(sender).await?;
        let needs_opt_in = !account.is_opted_in(self.config.app_id());
        debug!(
            sender = %sender.truncate(),
            choice = choice.as_u64(),
            needs_opt_in,
            "building vote group"
        );

        let params = self.algod.suggested_params().await?;
        let mut transactions = Vec::with_capacity(2);

        if needs_opt_in {
            transactions.push(
                TransactionBuilder::new()
                    .sender(sender.clone())
                    .params(params.clone())
                    .opt_in(self.config.app_id())
                    .build()?,
            );
        }

        transactions.push(
            TransactionBuilder::new()
                .sender(sender.clone())
                .params(params)
                .app_call(
                    self.config.app_id(),
                    vec![b"cast_vote".to_vec(), encode_uint64(choice.as_u64())],
                )
                .build()?,
        );

        let group = TransactionGroup::assign(transactions)?;
        sign_submit_confirm(self.algod, group, signer, self.config.max_wait_rounds()).await
    }
}
