//! Network and application configuration.
//!
//! All endpoints and deployment constants live in an explicit
//! [`AlgoTrustConfig`] passed at startup rather than in module-level
//! globals. Use a preset like [`AlgoTrustConfig::testnet`] or point the
//! SDK at custom nodes with [`AlgoTrustConfig::custom`].

use crate::types::{Address, AppId};
use std::time::Duration;
use url::Url;

/// Default number of rounds to poll for transaction confirmation.
pub const DEFAULT_MAX_WAIT_ROUNDS: u64 = 4;
/// Default HTTP request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deployment constants of the AlgoTrust application.
///
/// The escrow address is the application's derived account, which receives
/// crowdfunding payments. It is configured explicitly alongside the id so
/// the SDK never needs to re-derive it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The on-chain application id.
    pub app_id: AppId,
    /// The application's escrow account address.
    pub app_address: Address,
}

impl AppConfig {
    /// Creates the application configuration.
    pub fn new(app_id: impl Into<AppId>, app_address: Address) -> Self {
        Self {
            app_id: app_id.into(),
            app_address,
        }
    }
}

/// Known Algorand networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Algorand testnet
    Testnet,
    /// Local development network (sandbox)
    Localnet,
    /// Custom network
    Custom,
}

impl Network {
    /// Returns the network name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Localnet => "localnet",
            Network::Custom => "custom",
        }
    }
}

/// Configuration for the AlgoTrust client.
///
/// # Example
///
/// ```rust
/// use algotrust_sdk::{AlgoTrustConfig, AppConfig};
/// use std::time::Duration;
///
/// let app = AppConfig::new(
///     123456789,
///     "A".repeat(58).parse().unwrap(),
/// );
/// let config = AlgoTrustConfig::testnet(app)
///     .with_timeout(Duration::from_secs(10))
///     .with_max_wait_rounds(8);
/// ```
#[derive(Debug, Clone)]
pub struct AlgoTrustConfig {
    network: Network,
    algod_url: Url,
    indexer_url: Url,
    app: AppConfig,
    timeout: Duration,
    max_wait_rounds: u64,
}

impl AlgoTrustConfig {
    /// Creates a configuration for Algorand testnet using the public
    /// AlgoNode endpoints.
    pub fn testnet(app: AppConfig) -> Self {
        Self {
            network: Network::Testnet,
            algod_url: Url::parse("https://testnet-api.algonode.cloud")
                .expect("valid testnet algod URL"),
            indexer_url: Url::parse("https://testnet-idx.algonode.cloud")
                .expect("valid testnet indexer URL"),
            app,
            timeout: DEFAULT_TIMEOUT,
            max_wait_rounds: DEFAULT_MAX_WAIT_ROUNDS,
        }
    }

    /// Creates a configuration for a local sandbox network on the default
    /// ports (algod on 4001, indexer on 8980).
    pub fn localnet(app: AppConfig) -> Self {
        Self {
            network: Network::Localnet,
            algod_url: Url::parse("http://127.0.0.1:4001").expect("valid local algod URL"),
            indexer_url: Url::parse("http://127.0.0.1:8980").expect("valid local indexer URL"),
            app,
            timeout: Duration::from_secs(10),
            max_wait_rounds: DEFAULT_MAX_WAIT_ROUNDS,
        }
    }

    /// Creates a custom configuration with the given node endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL fails to parse.
    pub fn custom(algod_url: &str, indexer_url: &str, app: AppConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            network: Network::Custom,
            algod_url: Url::parse(algod_url)?,
            indexer_url: Url::parse(indexer_url)?,
            app,
            timeout: DEFAULT_TIMEOUT,
            max_wait_rounds: DEFAULT_MAX_WAIT_ROUNDS,
        })
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of rounds to poll for confirmation before timing out.
    #[must_use]
    pub fn with_max_wait_rounds(mut self, rounds: u64) -> Self {
        self.max_wait_rounds = rounds;
        self
    }

    /// Returns the network this config is for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the algod node URL.
    pub fn algod_url(&self) -> &Url {
        &self.algod_url
    }

    /// Returns the indexer URL.
    pub fn indexer_url(&self) -> &Url {
        &self.indexer_url
    }

    /// Returns the application id.
    pub fn app_id(&self) -> AppId {
        self.app.app_id
    }

    /// Returns the application escrow address.
    pub fn app_address(&self) -> &Address {
        &self.app.app_address
    }

    /// Returns the HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the confirmation polling bound in rounds.
    pub fn max_wait_rounds(&self) -> u64 {
        self.max_wait_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppConfig {
        AppConfig::new(123456789, "A".repeat(58).parse().unwrap())
    }

    #[test]
    fn test_testnet_config() {
        let config = AlgoTrustConfig::testnet(app());
        assert_eq!(config.network(), Network::Testnet);
        assert!(config.algod_url().as_str().contains("testnet-api"));
        assert!(config.indexer_url().as_str().contains("testnet-idx"));
        assert_eq!(config.max_wait_rounds(), DEFAULT_MAX_WAIT_ROUNDS);
    }

    #[test]
    fn test_localnet_config() {
        let config = AlgoTrustConfig::localnet(app());
        assert_eq!(config.network(), Network::Localnet);
        assert!(config.algod_url().as_str().contains("4001"));
    }

    #[test]
    fn test_custom_config() {
        let config = AlgoTrustConfig::custom(
            "http://algod.example.com",
            "http://indexer.example.com",
            app(),
        )
        .unwrap();
        assert_eq!(config.network(), Network::Custom);
        assert!(AlgoTrustConfig::custom("not a url", "http://x", app()).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = AlgoTrustConfig::testnet(app())
            .with_timeout(Duration::from_secs(5))
            .with_max_wait_rounds(10);

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_wait_rounds(), 10);
    }

    #[test]
    fn test_app_accessors() {
        let config = AlgoTrustConfig::testnet(app());
        assert_eq!(config.app_id(), AppId(123456789));
        assert_eq!(config.app_address().as_str().len(), 58);
    }

    #[test]
    fn test_network_names() {
        assert_eq!(Network::Testnet.as_str(), "testnet");
        assert_eq!(Network::Localnet.as_str(), "localnet");
        assert_eq!(Network::Custom.as_str(), "custom");
    }
}
