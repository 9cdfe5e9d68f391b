//! REST API clients for the Algorand node (algod) and indexer.

mod algod;
mod indexer;
mod response;

pub use algod::AlgodClient;
pub use indexer::IndexerClient;
pub use response::{
    AccountInfo, Application, ApplicationLocalState, ApplicationParams, ApplicationResponse,
    ConfirmationResult, NodeStatus, PendingTransactionResponse, SubmitResponse, SuggestedParams,
};
