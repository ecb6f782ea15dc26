//! Supply state of a mounted page.

use lib_core::TokenCount;
use parking_lot::RwLock;
use std::sync::Arc;

/// State written by the supply reader, the price reader and the mint action.
///
/// The three writers touch disjoint fields except `loading`, which both the
/// supply reader and the mint action set and clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyState {
    pub claimed_supply: u64,
    /// `None` until the total supply read resolves.
    pub total_supply: Option<TokenCount>,
    pub loading: bool,
    /// Display price of the first claim condition, blank until resolved.
    pub price: Option<String>,
}

impl Default for SupplyState {
    fn default() -> Self {
        Self {
            claimed_supply: 0,
            total_supply: None,
            loading: true,
            price: None,
        }
    }
}

impl SupplyState {
    /// Claimed count equals the numeric total supply.
    ///
    /// A total that does not fit in `u64` can never equal the claimed count.
    pub fn sold_out(&self) -> bool {
        self.total_supply.and_then(|total| total.to_u64()) == Some(self.claimed_supply)
    }
}

pub type SharedState = Arc<RwLock<SupplyState>>;
