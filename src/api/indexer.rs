//! Indexer REST API client.

use crate::api::response::ApplicationResponse;
use crate::config::AlgoTrustConfig;
use crate::error::{AlgoTrustError, AlgoTrustResult};
use crate::state::GlobalState;
use crate::types::AppId;
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

/// Client for the Algorand indexer REST API.
///
/// The read-side workflows use this to fetch an application's global state.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    base_url: Url,
    client: Client,
}

impl IndexerClient {
    /// Creates a new indexer client from the configuration.
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
            base_url: config.indexer_url().clone(),
            client,
        })
    }

    /// Returns the base URL of the indexer.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Looks up an application by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the API returns an error
    /// status code (404 when the application does not exist), or the
    /// response cannot be parsed as JSON.
    pub async fn lookup_application(&self, app_id: AppId) -> AlgoTrustResult<ApplicationResponse> {
        let url = self.build_url(&format!("v2/applications/{}", app_id.0));
        let response = self.client.get(url).header(ACCEPT, "application/json").send().await?;
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

    /// Fetches and decodes an application's global state.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails; malformed individual state
    /// entries are skipped during decoding rather than reported.
    pub async fn application_global_state(&self, app_id: AppId) -> AlgoTrustResult<GlobalState> {
        let response = self.lookup_application(app_id).await?;
        Ok(GlobalState::decode(&response.application.params.global_state))
    }

    fn build_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        url.set_path(&format!("{}{}", url.path(), path));
        url
    }
}
