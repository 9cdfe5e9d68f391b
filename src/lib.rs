//! # AlgoTrust SDK
//!
//! Client SDK for the AlgoTrust campus dApp deployed on the Algorand
//! blockchain. The dApp bundles three features behind one application:
//! crowdfunding campaigns, shared-expense settlement, and governance voting.
//!
//! The SDK covers the full client-side pipeline: reading application global
//! state through an indexer, building unsigned transactions, grouping them
//! atomically, delegating signing to an external wallet, submitting the
//! signed group to an algod node, and polling for confirmation with a
//! bounded number of rounds.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use algotrust_sdk::{AlgoTrust, AlgoTrustConfig, AppConfig, Address};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = AppConfig::new(123456789, "TRUSTAPPESCROW...".parse()?);
//!     let algotrust = AlgoTrust::testnet(app)?;
//!
//!     // Read-side: campaign state, `None` when unavailable.
//!     if let Some(info) = algotrust.crowdfunding().campaign_info().await {
//!         println!("raised {} of {}", info.raised, info.goal);
//!     }
//!
//!     // Write-side: contribute 2.5 Algos, signed by an injected wallet.
//!     // let result = algotrust
//!     //     .crowdfunding()
//!     //     .contribute(&sender, 2.5, &wallet)
//!     //     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - algod and indexer REST clients, confirmation polling
//! - [`transaction`] - transaction building and atomic grouping
//! - [`signing`] - the external wallet signer boundary
//! - [`state`] - application global-state decoding
//! - [`workflows`] - crowdfunding, split, and voting pipelines
//! - [`types`] - addresses, amounts, application ids
//!
//! ## Signing model
//!
//! The SDK never holds keys. Every write workflow takes a
//! [`signing::WalletSigner`] implementation (typically backed by a browser
//! wallet such as Pera) and hands it the fully-formed transaction group.
//! A user cancelling the wallet prompt surfaces as
//! [`AlgoTrustError::SigningAborted`], which callers can treat as a
//! non-error outcome.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod api;
pub mod config;
pub mod error;
pub mod signing;
pub mod state;
pub mod transaction;
pub mod types;
pub mod workflows;

mod algotrust;

// Re-export main entry points
pub use algotrust::AlgoTrust;
pub use config::{AlgoTrustConfig, AppConfig};
pub use error::{AlgoTrustError, AlgoTrustResult};

// Re-export commonly used types
pub use types::{Address, AppId, MicroAlgos};
