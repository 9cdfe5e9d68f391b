//! Error types for the AlgoTrust SDK.
//!
//! This module provides a unified error type [`AlgoTrustError`] covering
//! every failure mode of the SDK, from transaction construction through
//! signing, submission, and confirmation.

use thiserror::Error;

/// A specialized Result type for AlgoTrust SDK operations.
pub type AlgoTrustResult<T> = Result<T, AlgoTrustError>;

/// The main error type for the AlgoTrust SDK.
#[derive(Error, Debug)]
pub enum AlgoTrustError {
    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error occurred during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid Algorand account address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A transaction or group could not be constructed from the given
    /// parameters (oversized group, negative amount, missing builder field).
    /// Raised before any network interaction takes place.
    #[error("Construction error: {0}")]
    Construction(String),

    /// The user cancelled the wallet signing prompt.
    ///
    /// Distinct from [`AlgoTrustError::SigningFailed`] so callers and log
    /// layers can treat a deliberate cancel as a non-error outcome.
    #[error("Signing aborted by user")]
    SigningAborted,

    /// The wallet failed to produce signatures
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The node rejected the submitted transaction group (invalid group,
    /// insufficient balance, bad arguments, stale validity window)
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// The transaction was not confirmed within the polling bound
    #[error("Transaction {tx_id} not confirmed after waiting {waited_rounds} rounds")]
    ConfirmationTimeout {
        /// The transaction id that was being polled
        tx_id: String,
        /// How many rounds were polled before giving up
        waited_rounds: u64,
    },

    /// API returned an error response
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AlgoTrustError {
    /// Creates a new construction error
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Creates a new API error from response details
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Returns true if the user cancelled signing
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::SigningAborted)
    }

    /// Returns true if this is a confirmation timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConfirmationTimeout { .. })
    }

    /// Returns true if this is a "not found" API error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status_code: 404,
                ..
            }
        )
    }
}
