//! API response types.

use crate::state::TealKeyValue;
use crate::types::AppId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of rounds a transaction stays valid after its first-valid round.
const VALIDITY_WINDOW_ROUNDS: u64 = 1000;

/// Suggested transaction parameters from algod.
///
/// Fetched fresh before every operation and embedded into each transaction
/// as an immutable snapshot; the SDK never caches these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// The suggested fee in microAlgos per byte.
    pub fee: u64,
    /// The minimum flat fee in microAlgos.
    #[serde(rename = "min-fee")]
    pub min_fee: u64,
    /// The last round seen by the node.
    #[serde(rename = "last-round")]
    pub last_round: u64,
    /// The genesis id of the network.
    #[serde(rename = "genesis-id")]
    pub genesis_id: String,
    /// The base64-encoded genesis hash of the network.
    #[serde(rename = "genesis-hash")]
    pub genesis_hash: String,
}

impl SuggestedParams {
    /// First round at which a transaction built from these parameters is valid.
    pub fn first_valid(&self) -> u64 {
        self.last_round
    }

    /// Last round at which a transaction built from these parameters is valid.
    pub fn last_valid(&self) -> u64 {
        self.last_round + VALIDITY_WINDOW_ROUNDS
    }
}

/// Node status from algod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatus {
    /// The last committed round.
    #[serde(rename = "last-round")]
    pub last_round: u64,
}

/// Response when submitting signed transaction bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// The transaction id assigned by the node.
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// Pending-transaction lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransactionResponse {
    /// The round the transaction was confirmed in, absent while pending.
    #[serde(rename = "confirmed-round", default)]
    pub confirmed_round: Option<u64>,
    /// Non-empty when the node dropped the transaction from its pool.
    #[serde(rename = "pool-error", default)]
    pub pool_error: String,
    /// Base64-encoded log payloads emitted by the application.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl PendingTransactionResponse {
    /// Returns true once the transaction has been included in a round.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_round.is_some_and(|r| r > 0)
    }

    /// Decodes the application log payloads, skipping any that fail to decode.
    pub fn decoded_logs(&self) -> Vec<Vec<u8>> {
        self.logs
            .iter()
            .filter_map(|l| match base64::decode(l) {
                Ok(bytes) => Some(bytes),
                Err(_) => {
                    warn!("skipping undecodable application log entry");
                    None
                }
            })
            .collect()
    }
}

/// Outcome of a confirmed transaction group.
///
/// Created only after the poller observes inclusion; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationResult {
    /// The transaction id that was confirmed.
    pub tx_id: String,
    /// The round the transaction was included in.
    pub confirmed_round: u64,
    /// Application-emitted log payloads, decoded.
    pub logs: Vec<Vec<u8>>,
}

/// Local state of an application an account has opted into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationLocalState {
    /// The application id.
    pub id: u64,
}

/// Account information from algod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// The account address.
    pub address: String,
    /// The account balance in microAlgos.
    pub amount: u64,
    /// Applications the account has opted into.
    #[serde(rename = "apps-local-state", default)]
    pub apps_local_state: Vec<ApplicationLocalState>,
}

impl AccountInfo {
    /// Returns true if the account has opted into the given application.
    pub fn is_opted_in(&self, app_id: AppId) -> bool {
        self.apps_local_state.iter().any(|a| a.id == app_id.0)
    }
}

/// Application lookup response from the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    /// The application.
    pub application: Application,
}

/// An on-chain application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// The application id.
    pub id: u64,
    /// The application parameters.
    pub params: ApplicationParams,
}

/// Application parameters, including its global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationParams {
    /// The raw global key/value state.
    #[serde(rename = "global-state", default)]
    pub global_state: Vec<TealKeyValue>,
}
