//! Atomic transaction grouping.
//!
//! A group binds up to [`MAX_GROUP_SIZE`] transactions together with a
//! shared digest so the node accepts all of them or none. A group of one
//! carries no digest; the transaction is submitted alone.

use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::transaction::types::{GroupDigest, Transaction};
use crate::types::Address;
use sha2::{Digest, Sha512Trunc256};

/// Maximum number of transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

/// Domain-separation prefix for the group digest.
const GROUP_DOMAIN_PREFIX: &[u8] = b"TG";

/// An ordered set of transactions bound into one atomic unit.
///
/// Order is significant: the digest commits to the exact sequence, and the
/// node validates the group in that sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionGroup {
    transactions: Vec<Transaction>,
    digest: Option<GroupDigest>,
}

impl TransactionGroup {
    /// Binds the given transactions into an atomic group, stamping each
    /// with the shared digest when more than one transaction is present.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::Construction`] when the input is empty or
    /// exceeds [`MAX_GROUP_SIZE`].
    pub fn assign(transactions: Vec<Transaction>) -> AlgoTrustResult<Self> {
        if transactions.is_empty() {
            return Err(AlgoTrustError::construction(
                "Cannot group zero transactions",
            ));
        }
        if transactions.len() > MAX_GROUP_SIZE {
            return Err(AlgoTrustError::construction(format!(
                "Group of {} transactions exceeds the maximum of {MAX_GROUP_SIZE}",
                transactions.len()
            )));
        }
        if transactions.len() == 1 {
            return Ok(Self {
                transactions,
                digest: None,
            });
        }

        let digest = Self::compute_digest(&transactions)?;
        let transactions = transactions
            .into_iter()
            .map(|txn| txn.with_group(digest))
            .collect();

        Ok(Self {
            transactions,
            digest: Some(digest),
        })
    }

    /// The digest over the ungrouped canonical encodings, domain-separated
    /// so it can never collide with a transaction hash.
    fn compute_digest(transactions: &[Transaction]) -> AlgoTrustResult<GroupDigest> {
        let mut hasher = Sha512Trunc256::new();
        hasher.update(GROUP_DOMAIN_PREFIX);
        for txn in transactions {
            hasher.update(txn.canonical_bytes()?);
        }
        Ok(GroupDigest(hasher.finalize().into()))
    }

    /// Returns the transactions in group order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns the shared digest, absent for a group of one.
    pub fn digest(&self) -> Option<GroupDigest> {
        self.digest
    }

    /// Returns the number of transactions in the group.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the group holds no transactions. Never true for a
    /// group produced by [`assign`](Self::assign).
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Produces the payload handed to a wallet for signing.
    pub fn signing_request(&self) -> SigningRequest {
        let entries = self
            .transactions
            .iter()
            .map(|txn| SigningEntry {
                signers: vec![txn.sender.clone()],
                transaction: txn.clone(),
            })
            .collect();
        SigningRequest { entries }
    }
}

/// A signing payload for an external wallet: the full group in order, each
/// entry naming who must sign it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// The transactions to sign, in group order.
    pub entries: Vec<SigningEntry>,
}

/// One transaction of a signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningEntry {
    /// The unsigned transaction, group digest already stamped.
    pub transaction: Transaction,
    /// The accounts whose signatures are required.
    pub signers: Vec<Address>,
}
