//! Algod REST API client and confirmation polling.

use crate::api::response::{
    AccountInfo, ConfirmationResult, NodeStatus, PendingTransactionResponse, SubmitResponse,
    SuggestedParams,
};
use crate::config::AlgoTrustConfig;
use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::transaction::SignedTransactionBytes;
use crate::types::Address;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

const BINARY_CONTENT_TYPE: &str = "application/x-binary";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the algod node REST API.
///
/// Covers everything the write-side workflows need: suggested transaction
/// parameters, account lookups, raw submission, and round-bounded
/// confirmation polling.
///
/// # Example
///
/// ```rust,no_run
/// use algotrust_sdk::api::AlgodClient;
/// use algotrust_sdk::{AlgoTrustConfig, AppConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let app = AppConfig::new(123456789, "A".repeat(58).parse()?);
/// let client = AlgodClient::new(&AlgoTrustConfig::testnet(app))?;
/// let params = client.suggested_params().await?;
/// println!("current round: {}", params.last_round);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlgodClient {
    base_url: Url,
    client: Client,
}

impl AlgodClient {
    /// Creates a new algod client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AlgoTrustConfig) -> AlgoTrustResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(AlgoTrustError::Http)?;

        Ok(Self {
            base_url: config.algod_url().clone(),
            client,
        })
    }

    /// Returns the base URL of the node.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Gets the suggested parameters for building a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code, or the response cannot be parsed as JSON.
    pub async fn suggested_params(&self) -> AlgoTrustResult<SuggestedParams> {
        let url = self.build_url("v2/transactions/params");
        self.get_json(url).await
    }

    /// Gets the current node status.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code, or the response cannot be parsed as JSON.
    pub async fn status(&self) -> AlgoTrustResult<NodeStatus> {
        let url = self.build_url("v2/status");
        self.get_json(url).await
    }

    /// Waits for the node to progress past the given round, then returns
    /// its status. This is the long-polling primitive behind confirmation
    /// polling.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code, or the response cannot be parsed as JSON.
    pub async fn status_after_round(&self, round: u64) -> AlgoTrustResult<NodeStatus> {
        let url = self.build_url(&format!("v2/status/wait-for-block-after/{round}"));
        self.get_json(url).await
    }

    /// Gets account information, including the applications the account has
    /// opted into.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code, or the response cannot be parsed as JSON.
    pub async fn account_information(&self, address: &Address) -> AlgoTrustResult<AccountInfo> {
        let url = self.build_url(&format!("v2/accounts/{address}"));
        self.get_json(url).await
    }

    /// Submits wallet-signed transaction bytes to the node.
    ///
    /// Blobs belonging to one atomic group are concatenated into a single
    /// request body; the node validates the group as a unit.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::SubmissionRejected`] when the node refuses
    /// the transactions (invalid group, insufficient balance, bad arguments,
    /// stale validity window), or other errors for transport failures.
    pub async fn submit_raw(
        &self,
        signed: &[SignedTransactionBytes],
    ) -> AlgoTrustResult<String> {
        let url = self.build_url("v2/transactions");
        let body: Vec<u8> = signed.iter().flat_map(|s| s.as_slice().to_vec()).collect();

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, BINARY_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        match Self::handle_response::<SubmitResponse>(response).await {
            Ok(resp) => {
                debug!(tx_id = %resp.tx_id, "submitted signed transaction bytes");
                Ok(resp.tx_id)
            }
            Err(AlgoTrustError::Api {
                status_code,
                message,
            }) if (400..500).contains(&status_code) => {
                Err(AlgoTrustError::SubmissionRejected(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Looks up a transaction in the node's pending pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code, or the response cannot be parsed as JSON.
    pub async fn pending_transaction(
        &self,
        tx_id: &str,
    ) -> AlgoTrustResult<PendingTransactionResponse> {
        let url = self.build_url(&format!("v2/transactions/pending/{tx_id}"));
        self.get_json(url).await
    }

    /// Polls for a transaction's confirmation, bounded by `max_rounds`.
    ///
    /// Inclusion is checked once per round: the poller reads the current
    /// round, then alternates a pending-pool lookup with a wait for the next
    /// round. It terminates after at most `max_rounds` lookups.
    ///
    /// # Errors
    ///
    /// - [`AlgoTrustError::SubmissionRejected`] when the node reports a pool
    ///   error for the transaction.
    /// - [`AlgoTrustError::ConfirmationTimeout`] when `max_rounds` rounds
    ///   elapse without inclusion.
    /// - Transport/API errors from the underlying requests.
    pub async fn wait_for_confirmation(
        &self,
        tx_id: &str,
        max_rounds: u64,
    ) -> AlgoTrustResult<ConfirmationResult> {
        let start = self.status().await?.last_round + 1;
        let mut current = start;

        while current < start + max_rounds {
            let pending = self.pending_transaction(tx_id).await?;

            if let Some(round) = pending.confirmed_round.filter(|r| *r > 0) {
                debug!(%tx_id, round, "transaction confirmed");
                return Ok(ConfirmationResult {
                    tx_id: tx_id.to_string(),
                    confirmed_round: round,
                    logs: pending.decoded_logs(),
                });
            }

            if !pending.pool_error.is_empty() {
                return Err(AlgoTrustError::SubmissionRejected(pending.pool_error));
            }

            self.status_after_round(current).await?;
            current += 1;
        }

        Err(AlgoTrustError::ConfirmationTimeout {
            tx_id: tx_id.to_string(),
            waited_rounds: max_rounds,
        })
    }

    // === Helper Methods ===

    fn build_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        url.set_path(&format!("{}{}", url.path(), path));
        url
    }

    async fn get_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        url: Url,
    ) -> AlgoTrustResult<T> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: for<'de> serde::Deserialize<'de>>(
        response: reqwest::Response,
    ) -> AlgoTrustResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            Err(AlgoTrustError::api(status.as_u16(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use wiremock::matchers::{body_bytes, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app() -> AppConfig {
        AppConfig::new(42, "A".repeat(58).parse().unwrap())
    }

    async fn create_mock_client(server: &MockServer) -> AlgodClient {
        let config =
            AlgoTrustConfig::custom(&server.uri(), &server.uri(), test_app()).unwrap();
        AlgodClient::new(&config).unwrap()
    }

    fn params_body() -> serde_json::Value {
        serde_json::json!({
            "consensus-version": "future",
            "fee": 0,
            "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
            "genesis-id": "testnet-v1.0",
            "last-round": 35000000,
            "min-fee": 1000
        })
    }

    #[test]
    fn test_build_url() {
        let config = AlgoTrustConfig::testnet(test_app());
        let client = AlgodClient::new(&config).unwrap();
        let url = client.build_url("v2/transactions/params");
        assert!(url.as_str().ends_with("/v2/transactions/params"));
    }

    #[tokio::test]
    async fn test_suggested_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/transactions/params"))
            .respond_with(ResponseTemplate::new(200).set_body_json(params_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let params = client.suggested_params().await.unwrap();

        assert_eq!(params.last_round, 35000000);
        assert_eq!(params.min_fee, 1000);
    }

    #[tokio::test]
    async fn test_account_information() {
        let server = MockServer::start().await;
        let sender: Address = "A".repeat(58).parse().unwrap();

        Mock::given(method("GET"))
            .and(path(format!("/v2/accounts/{sender}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": sender.as_str(),
                "amount": 4000000,
                "apps-local-state": [{"id": 42}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let account = client.account_information(&sender).await.unwrap();

        assert_eq!(account.amount, 4000000);
        assert!(account.is_opted_in(crate::types::AppId(42)));
    }

    #[tokio::test]
    async fn test_submit_raw_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/transactions"))
            .and(body_bytes(b"blob1blob2".to_vec()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"txId": "TXID123"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let signed = vec![
            SignedTransactionBytes(b"blob1".to_vec()),
            SignedTransactionBytes(b"blob2".to_vec()),
        ];
        let tx_id = client.submit_raw(&signed).await.unwrap();

        assert_eq!(tx_id, "TXID123");
    }

    #[tokio::test]
    async fn test_submit_raw_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/transactions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "message": "TransactionPool.Remember: transaction groups not allowed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let result = client
            .submit_raw(&[SignedTransactionBytes(b"bad".to_vec())])
            .await;

        match result {
            Err(AlgoTrustError::SubmissionRejected(msg)) => {
                assert!(msg.contains("not allowed"));
            }
            other => panic!("expected SubmissionRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_success_after_pending() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"last-round": 100})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/status/wait-for-block-after/101"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"last-round": 102})),
            )
            .mount(&server)
            .await;

        // Not yet included on the first lookup, confirmed on the second.
        Mock::given(method("GET"))
            .and(path("/v2/transactions/pending/TXID123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"pool-error": ""})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/transactions/pending/TXID123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "confirmed-round": 102,
                "pool-error": "",
                "logs": [base64::encode(b"ok")]
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let result = client.wait_for_confirmation("TXID123", 4).await.unwrap();

        assert_eq!(result.tx_id, "TXID123");
        assert_eq!(result.confirmed_round, 102);
        assert_eq!(result.logs, vec![b"ok".to_vec()]);
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"last-round": 100})),
            )
            .mount(&server)
            .await;

        for round in 101..103u64 {
            Mock::given(method("GET"))
                .and(path(format!("/v2/status/wait-for-block-after/{round}")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({"last-round": round + 1})),
                )
                .mount(&server)
                .await;
        }

        // Never included.
        Mock::given(method("GET"))
            .and(path("/v2/transactions/pending/TXID123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"pool-error": ""})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let result = client.wait_for_confirmation("TXID123", 2).await;

        match result {
            Err(AlgoTrustError::ConfirmationTimeout {
                tx_id,
                waited_rounds,
            }) => {
                assert_eq!(tx_id, "TXID123");
                assert_eq!(waited_rounds, 2);
            }
            other => panic!("expected ConfirmationTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_pool_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"last-round": 100})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/transactions/pending/TXID123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "pool-error": "transaction already in ledger"
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let result = client.wait_for_confirmation("TXID123", 4).await;

        match result {
            Err(AlgoTrustError::SubmissionRejected(msg)) => {
                assert!(msg.contains("already in ledger"));
            }
            other => panic!("expected SubmissionRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_surfaces_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/status"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "node is catching up"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let result = client.status().await;

        match result {
            Err(AlgoTrustError::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert!(message.contains("catching up"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
