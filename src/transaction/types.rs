//! Unsigned transaction types.

use crate::api::SuggestedParams;
use crate::types::{Address, AppId, MicroAlgos};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;

/// Encodes an unsigned integer as 8 big-endian bytes, the representation
/// the application expects for integer arguments.
pub fn encode_uint64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// What the application should do when an application call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnComplete {
    /// Plain application call.
    NoOp,
    /// Allocate local state for the sender.
    OptIn,
}

/// The type-specific payload of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransactionType {
    /// An Algo payment.
    Payment {
        /// The receiving account.
        receiver: Address,
        /// The amount to transfer.
        amount: MicroAlgos,
    },
    /// A call into a deployed application.
    AppCall {
        /// The application to call.
        app_id: AppId,
        /// Completion behavior of the call.
        on_complete: OnComplete,
        /// Raw argument bytes. The first argument names the method; integer
        /// arguments are 8-byte big-endian.
        #[serde(serialize_with = "serialize_args")]
        app_args: Vec<Vec<u8>>,
    },
}

fn serialize_args<S: Serializer>(args: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(args.len()))?;
    for arg in args {
        seq.serialize_element(&base64::encode(arg))?;
    }
    seq.end()
}

/// An unsigned transaction, ready for grouping and signing.
///
/// Instances are immutable once built except for the group digest, which
/// the group coordinator stamps in exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// The sending account.
    pub sender: Address,
    /// The network parameter snapshot the transaction was built against.
    pub params: SuggestedParams,
    /// Shared digest binding this transaction to its atomic group; absent
    /// for a transaction submitted alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupDigest>,
    /// The type-specific payload.
    #[serde(flatten)]
    pub txn_type: TransactionType,
}

impl Transaction {
    /// Canonical byte encoding of the transaction, used for group-digest
    /// computation and for wallet signing payloads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub(crate) fn with_group(mut self, digest: GroupDigest) -> Self {
        self.group = Some(digest);
        self
    }
}

/// A 32-byte digest binding the transactions of an atomic group together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDigest(pub [u8; 32]);

impl Serialize for GroupDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::encode(self.0))
    }
}

impl fmt::Display for GroupDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base64::encode(self.0))
    }
}

/// An opaque signed-transaction blob produced by a wallet.
///
/// The SDK never inspects these bytes; they pass straight through to the
/// node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransactionBytes(pub Vec<u8>);

impl SignedTransactionBytes {
    /// Returns the raw blob.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}
