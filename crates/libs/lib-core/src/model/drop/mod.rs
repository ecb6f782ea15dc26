//! # Contract-Drop Provider
//!
//! A drop is a deployed contract exposing a supply of tokens claimable over time.
//! The page talks to it through [`NftDrop`]: three reads (claim conditions,
//! claimed tokens, total supply) and one write (claim).
//!
//! [`DropProvider`] resolves a contract address into a handle. A provider may
//! refuse an address it cannot serve, in which case the page has no handle and
//! never fetches or mints.

// region: --- Modules
mod gateway;
mod types;
// endregion: --- Modules

pub use gateway::{GatewayDrop, GatewayDropProvider};
pub use types::{ClaimCondition, ClaimReceipt, ClaimedNft, CurrencyValue, NftMetadata, TokenCount, TransactionReceipt};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Handle to one deployed drop contract.
#[async_trait]
pub trait NftDrop: Send + Sync {
    fn contract_address(&self) -> &str;

    /// All claim phases, active one first.
    async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>>;

    /// Every token claimed so far.
    async fn all_claimed(&self) -> Result<Vec<ClaimedNft>>;

    /// Number of tokens the drop will ever hold.
    async fn total_supply(&self) -> Result<TokenCount>;

    /// Claim `quantity` tokens to `receiver`. Resolves once the provider reports
    /// the transaction mined.
    async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimReceipt>>;
}

/// Resolves contract addresses into drop handles.
pub trait DropProvider: Send + Sync {
    /// `None` when the provider cannot serve this address.
    fn drop_at(&self, contract_address: &str) -> Option<Arc<dyn NftDrop>>;
}
