//! The external wallet signing boundary.
//!
//! The SDK never sees a private key. Write workflows hand fully-formed
//! transaction groups to a [`WalletSigner`] implementation and receive
//! opaque signed blobs back. Production implementations wrap a browser
//! wallet such as Pera; tests inject in-memory signers.

use crate::error::AlgoTrustResult;
use crate::transaction::{SignedTransactionBytes, SigningRequest};
use async_trait::async_trait;

/// An external wallet that can sign transaction groups.
///
/// Implementations surface a user cancelling the wallet prompt as
/// [`AlgoTrustError::SigningAborted`](crate::AlgoTrustError::SigningAborted)
/// and any other wallet failure as
/// [`AlgoTrustError::SigningFailed`](crate::AlgoTrustError::SigningFailed).
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Establishes a session with the wallet.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet refuses or fails to connect.
    async fn connect(&self) -> AlgoTrustResult<()>;

    /// Re-establishes a previously approved session without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if no prior session exists or the wallet fails.
    async fn reconnect(&self) -> AlgoTrustResult<()>;

    /// Signs the given transaction groups, one prompt per request.
    ///
    /// The returned outer vector matches `requests` in length and order;
    /// each inner vector matches its request's entries in length and order.
    ///
    /// # Errors
    ///
    /// Returns `SigningAborted` when the user cancels, `SigningFailed` for
    /// any other wallet failure.
    async fn sign_transactions(
        &self,
        requests: &[SigningRequest],
    ) -> AlgoTrustResult<Vec<Vec<SignedTransactionBytes>>>;

    /// Ends the wallet session.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet fails to tear down the session.
    async fn disconnect(&self) -> AlgoTrustResult<()>;
}
