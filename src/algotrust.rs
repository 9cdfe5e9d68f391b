//! The main entry point to the SDK.

use crate::api::{AlgodClient, IndexerClient};
use crate::config::{AlgoTrustConfig, AppConfig};
use crate::error::AlgoTrustResult;
use crate::workflows::{Crowdfunding, Split, Voting};

/// The AlgoTrust client: shared node clients plus the deployment
/// configuration, with a borrowing handle per feature workflow.
///
/// # Example
///
/// ```rust,no_run
/// use algotrust_sdk::{AlgoTrust, AppConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let app = AppConfig::new(123456789, "A".repeat(58).parse()?);
/// let algotrust = AlgoTrust::testnet(app)?;
///
/// if let Some(info) = algotrust.crowdfunding().campaign_info().await {
///     println!("raised {} of {}", info.raised, info.goal);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlgoTrust {
    config: AlgoTrustConfig,
    algod: AlgodClient,
    indexer: IndexerClient,
}

impl AlgoTrust {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients fail to build.
    pub fn new(config: AlgoTrustConfig) -> AlgoTrustResult<Self> {
        let algod = AlgodClient::new(&config)?;
        let indexer = IndexerClient::new(&config)?;
        Ok(Self {
            config,
            algod,
            indexer,
        })
    }

    /// Creates a client for Algorand testnet with the default endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients fail to build.
    pub fn testnet(app: AppConfig) -> AlgoTrustResult<Self> {
        Self::new(AlgoTrustConfig::testnet(app))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AlgoTrustConfig {
        &self.config
    }

    /// Returns the algod client.
    pub fn algod(&self) -> &AlgodClient {
        &self.algod
    }

    /// Returns the indexer client.
    pub fn indexer(&self) -> &IndexerClient {
        &self.indexer
    }

    /// Returns the crowdfunding workflow handle.
    pub fn crowdfunding(&self) -> Crowdfunding<'_> {
        Crowdfunding::new(&self.algod, &self.indexer, &self.config)
    }

    /// Returns the expense-splitting workflow handle.
    pub fn split(&self) -> Split<'_> {
        Split::new(&self.algod, &self.config)
    }

    /// Returns the voting workflow handle.
    pub fn voting(&self) -> Voting<'_> {
        Voting::new(&self.algod, &self.indexer, &self.config)
    }
}
