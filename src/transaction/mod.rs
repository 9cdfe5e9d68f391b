//! Transaction building and atomic grouping.
//!
//! The pipeline is: build unsigned [`Transaction`]s with a
//! [`TransactionBuilder`], assemble them into a [`TransactionGroup`] (which
//! stamps a shared [`GroupDigest`] when more than one transaction is
//! present), hand the group's [`SigningRequest`](crate::signing) payload to
//! a wallet, and submit the signed bytes through the algod client.

mod builder;
mod group;
mod types;

pub use builder::TransactionBuilder;
pub use group::{SigningEntry, SigningRequest, TransactionGroup, MAX_GROUP_SIZE};
pub use types::{
    encode_uint64, GroupDigest, OnComplete, SignedTransactionBytes, Transaction, TransactionType,
};
