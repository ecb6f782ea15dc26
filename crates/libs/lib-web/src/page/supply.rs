//! # Supply Reader
//!
//! Two independent tasks started when a page mounts with a contract handle:
//! one reads the claimed and total supply, the other the display price. Neither
//! retries; a failure is logged and leaves the state where it was.

use super::state::SharedState;
use lib_core::NftDrop;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Read the display price of the first claim condition.
pub(crate) async fn fetch_price(drop: Arc<dyn NftDrop>, state: SharedState) {
    match drop.claim_conditions().await {
        Ok(conditions) => match conditions.first() {
            Some(condition) => {
                let price = condition.currency_metadata.display_value.clone();
                debug!("[SUPPLY] contract={} price={}", drop.contract_address(), price);
                state.write().price = Some(price);
            }
            None => {
                warn!("[SUPPLY] contract={} has no claim conditions", drop.contract_address());
            }
        },
        Err(e) => {
            error!(
                contract = %drop.contract_address(),
                error = %e,
                "[SUPPLY] Failed to fetch claim conditions"
            );
        }
    }
}

/// Read the claimed count, then the total supply. `loading` is cleared only
/// when both succeed.
pub(crate) async fn fetch_supply(drop: Arc<dyn NftDrop>, state: SharedState) {
    state.write().loading = true;

    let claimed = match drop.all_claimed().await {
        Ok(claimed) => claimed,
        Err(e) => {
            error!(
                contract = %drop.contract_address(),
                error = %e,
                "[SUPPLY] Failed to fetch claimed tokens"
            );
            return;
        }
    };

    let total = match drop.total_supply().await {
        Ok(total) => total,
        Err(e) => {
            error!(
                contract = %drop.contract_address(),
                error = %e,
                "[SUPPLY] Failed to fetch total supply"
            );
            return;
        }
    };

    info!(
        "[SUPPLY] contract={} claimed={} total={}",
        drop.contract_address(),
        claimed.len(),
        total
    );

    let mut state = state.write();
    state.claimed_supply = claimed.len() as u64;
    state.total_supply = Some(total);
    state.loading = false;
}
