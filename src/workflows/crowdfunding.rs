//! Crowdfunding campaign workflow.

use crate::api::{AlgodClient, ConfirmationResult, IndexerClient};
use crate::config::AlgoTrustConfig;
use crate::error::AlgoTrustResult;
use crate::signing::WalletSigner;
use crate::transaction::{TransactionBuilder, TransactionGroup};
use crate::types::{Address, MicroAlgos};
use crate::workflows::sign_submit_confirm;
use tracing::{debug, warn};

/// Global-state keys written by the crowdfunding contract.
const KEY_CAMPAIGN_GOAL: &str = "campaign_goal";
const KEY_TOTAL_RAISED: &str = "total_raised";
const KEY_CAMPAIGN_ACTIVE: &str = "campaign_active";

/// A snapshot of the campaign's on-chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignInfo {
    /// The funding goal.
    pub goal: MicroAlgos,
    /// The total contributed so far.
    pub raised: MicroAlgos,
    /// Whether the campaign is accepting contributions.
    pub active: bool,
}

/// Crowdfunding operations, borrowed from the facade.
#[derive(Debug, Clone, Copy)]
pub struct Crowdfunding<'a> {
    algod: &'a AlgodClient,
    indexer: &'a IndexerClient,
    config: &'a AlgoTrustConfig,
}

impl<'a> Crowdfunding<'a> {
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

    /// Reads the campaign state, with the typed error preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the application lookup fails.
    pub async fn try_campaign_info(&self) -> AlgoTrustResult<CampaignInfo> {
        let state = self
            .indexer
            .application_global_state(self.config.app_id())
            .await?;

        Ok(CampaignInfo {
            goal: MicroAlgos(state.uint(KEY_CAMPAIGN_GOAL)),
            raised: MicroAlgos(state.uint(KEY_TOTAL_RAISED)),
            active: state.flag(KEY_CAMPAIGN_ACTIVE),
        })
    }

    /// Reads the campaign state, collapsing any failure to `None`.
    pub async fn campaign_info(&self) -> Option<CampaignInfo> {
        match self.try_campaign_info().await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "failed to read campaign state");
                None
            }
        }
    }

    /// Contributes the given amount of Algos to the campaign.
    ///
    /// Builds an atomic group of two transactions: a payment from the
    /// sender to the application's escrow account and a `contribute`
    /// application call, so the contract books exactly the amount that
    /// moved.
    ///
    /// # Errors
    ///
    /// Fails on an invalid amount, a cancelled or failed wallet prompt,
    /// node rejection, or confirmation timeout.
    pub async fn contribute(
        &self,
        sender: &Address,
        amount_algos: f64,
        signer: &dyn WalletSigner,
    ) -> AlgoTrustResult<ConfirmationResult> {
        let amount = MicroAlgos::from_algos(amount_algos)?;
        debug!(sender = %sender.truncate(), %amount, "building contribution group");

        let params = self.algod.suggested_params().await?;

        let payment = TransactionBuilder::new()
            .sender(sender.clone())
            .params(params.clone())
            .payment(self.config.app_address().clone(), amount)
            .build()?;
        let call = TransactionBuilder::new()
            .sender(sender.clone())
            .params(params)
            .app_call(self.config.app_id(), vec![b"contribute".to_vec()])
            .build()?;

        let group = TransactionGroup::assign(vec![payment, call])?;
        sign_submit_confirm(self.algod, group, signer, self.config.max_wait_rounds()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::testing::{AbortingSigner, RecordingSigner};
    use crate::transaction::TransactionType;
    use crate::workflows::test_support::{mount_write_pipeline, test_address, test_config};
    use crate::AlgoTrustError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn campaign_state_body() -> serde_json::Value {
        serde_json::json!({
            "application": {
                "id": 123456789,
                "params": {
                    "global-state": [
                        {"key": base64::encode("campaign_goal"), "value": {"type": 2, "uint": 5000000000u64}},
                        {"key": base64::encode("total_raised"), "value": {"type": 2, "uint": 1200000000u64}},
                        {"key": base64::encode("campaign_active"), "value": {"type": 2, "uint": 1}}
                    ]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_campaign_info_decodes_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/applications/123456789"))
            .respond_with(ResponseTemplate::new(200).set_body_json(campaign_state_body()))
            .mount(&server)
            .await;

        let config = test_config(&server);
        let algod = AlgodClient::new(&config).unwrap();
        let indexer = IndexerClient::new(&config).unwrap();
        let info = Crowdfunding::new(&algod, &indexer, &config)
            .campaign_info()
            .await
            .unwrap();

        assert_eq!(info.goal, MicroAlgos(5_000_000_000));
        assert_eq!(info.raised, MicroAlgos(1_200_000_000));
        assert!(info.active);
    }

    #[tokio::test]
    async fn test_campaign_info_collapses_errors_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/applications/123456789"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "no application found"
            })))
            .mount(&server)
            .await;

        let config = test_config(&server);
        let algod = AlgodClient::new(&config).unwrap();
        let indexer = IndexerClient::new(&config).unwrap();
        let handle = Crowdfunding::new(&algod, &indexer, &config);

        assert_eq!(handle.campaign_info().await, None);
        assert!(handle.try_campaign_info().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_contribute_groups_payment_and_call() {
        let server = MockServer::start().await;
        mount_write_pipeline(&server, "CONTRIBTX").await;

        let config = test_config(&server);
        let algod = AlgodClient::new(&config).unwrap();
        let indexer = IndexerClient::new(&config).unwrap();
        let signer = RecordingSigner::default();

        let result = Crowdfunding::new(&algod, &indexer, &config)
            .contribute(&test_address('A'), 2.5, &signer)
            .await
            .unwrap();

        assert_eq!(result.tx_id, "CONTRIBTX");
        assert_eq!(result.confirmed_round, 35000002);

        let requests = signer.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let entries = &requests[0].entries;
        assert_eq!(entries.len(), 2);
        // Both members carry the same group digest.
        assert!(entries[0].transaction.group.is_some());
        assert_eq!(entries[0].transaction.group, entries[1].transaction.group);

        match &entries[0].transaction.txn_type {
            TransactionType::Payment { receiver, amount } => {
                assert_eq!(receiver, config.app_address());
                assert_eq!(*amount, MicroAlgos(2_500_000));
            }
            other => panic!("expected payment first, got {other:?}"),
        }
        match &entries[1].transaction.txn_type {
            TransactionType::AppCall { app_args, .. } => {
                assert_eq!(app_args[0], b"contribute".to_vec());
            }
            other => panic!("expected app call second, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_contribute_rejects_bad_amount_before_network() {
        let server = MockServer::start().await;

        let config = test_config(&server);
        let algod = AlgodClient::new(&config).unwrap();
        let indexer = IndexerClient::new(&config).unwrap();
        let signer = RecordingSigner::default();

        let err = Crowdfunding::new(&algod, &indexer, &config)
            .contribute(&test_address('A'), -1.0, &signer)
            .await
            .unwrap_err();

        assert!(matches!(err, AlgoTrustError::Construction(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contribute_abort_propagates() {
        let server = MockServer::start().await;
        mount_write_pipeline(&server, "CONTRIBTX").await;

        let config = test_config(&server);
        let algod = AlgodClient::new(&config).unwrap();
        let indexer = IndexerClient::new(&config).unwrap();

        let err = Crowdfunding::new(&algod, &indexer, &config)
            .contribute(&test_address('A'), 2.5, &AbortingSigner)
            .await
            .unwrap_err();

        assert!(err.is_aborted());
        // Nothing was submitted after the cancel.
        let submitted = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .any(|r| r.method.to_string() == "POST");
        assert!(!submitted);
    }
}
