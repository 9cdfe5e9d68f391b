//! Feature workflows: crowdfunding, expense splitting, and voting.
//!
//! Each workflow is a borrowing handle obtained from the
//! [`AlgoTrust`](crate::AlgoTrust) facade. Write operations run the same
//! sequential pipeline: fetch fresh parameters, build unsigned transactions,
//! group them, hand the group to the wallet, submit the signed bytes, and
//! poll for confirmation. Read operations fetch and decode global state and
//! collapse every failure to `None`; the `try_` variants keep the typed
//! error for callers that need it.

mod crowdfunding;
mod split;
mod voting;

pub use crowdfunding::{CampaignInfo, Crowdfunding};
pub use split::{Split, SplitPlan};
pub use voting::{ProposalInfo, VoteChoice, Voting};

use crate::api::{AlgodClient, ConfirmationResult};
use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::signing::WalletSigner;
use crate::transaction::TransactionGroup;
use tracing::{debug, info, warn};

/// Runs the tail of every write workflow: sign, submit, confirm.
///
/// A user abort is logged at debug and propagated untouched so callers can
/// treat it as a non-error outcome. Any other signing failure is logged at
/// warn before propagating.
pub(crate) async fn sign_submit_confirm(
    algod: &AlgodClient,
    group: TransactionGroup,
    signer: &dyn WalletSigner,
    max_wait_rounds: u64,
) -> AlgoTrustResult<ConfirmationResult> {
    let request = group.signing_request();

    let mut signed_groups = match signer.sign_transactions(std::slice::from_ref(&request)).await {
        Ok(signed) => signed,
        Err(e) if e.is_aborted() => {
            debug!("wallet signing cancelled by user");
            return Err(e);
        }
        Err(e) => {
            warn!(error = %e, "wallet signing failed");
            return Err(e);
        }
    };

    let signed = match signed_groups.pop() {
        Some(signed) if signed_groups.is_empty() && signed.len() == group.len() => signed,
        _ => {
            return Err(AlgoTrustError::SigningFailed(format!(
                "wallet returned a signature set not matching the {} requested transactions",
                group.len()
            )));
        }
    };

    let tx_id = algod.submit_raw(&signed).await?;
    info!(%tx_id, group_size = group.len(), "transaction group submitted");

    algod.wait_for_confirmation(&tx_id, max_wait_rounds).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{AlgoTrustConfig, AppConfig};
    use crate::types::Address;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn test_address(c: char) -> Address {
        c.to_string().repeat(58).parse().unwrap()
    }

    pub(crate) fn test_config(server: &MockServer) -> AlgoTrustConfig {
        let app = AppConfig::new(123456789, test_address('Z'));
        AlgoTrustConfig::custom(&server.uri(), &server.uri(), app).unwrap()
    }

    /// Mounts the mocks a successful write pipeline touches: parameter
    /// fetch, submission, status reads, and a confirmed pending lookup.
    pub(crate) async fn mount_write_pipeline(server: &MockServer, tx_id: &str) {
        Mock::given(method("GET"))
            .and(path("/v2/transactions/params"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "fee": 0,
                "min-fee": 1000,
                "last-round": 35000000,
                "genesis-id": "testnet-v1.0",
                "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI="
            })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v2/transactions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "txId": tx_id })),
            )
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "last-round": 35000000 })),
            )
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/v2/transactions/pending/{tx_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "confirmed-round": 35000002,
                "pool-error": ""
            })))
            .mount(server)
            .await;
    }
}
