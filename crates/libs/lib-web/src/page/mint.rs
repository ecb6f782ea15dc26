//! # Mint Action
//!
//! Claims one token to the connected wallet. Progress, success and failure are
//! reported only through toasts; the error itself is logged, never shown.
//!
//! A [`MintTask`] exists only while the page's `loading` flag is held for it:
//! the flag is set when the task is handed out and cleared when it is dropped.

use super::notify::Toaster;
use super::state::SharedState;
use chrono::Duration;
use lib_core::model::drop::ClaimReceipt;
use lib_core::NftDrop;
use std::sync::Arc;
use tracing::{error, info};

/// Tokens claimed per click.
pub const MINT_QUANTITY: u32 = 1;

pub const MINTING_MESSAGE: &str = "Minting...";
pub const SUCCESS_MESSAGE: &str = "Hooray...";
pub const FAILURE_MESSAGE: &str = "Whoops... something went wrong";

/// How long the success toast stays up.
pub const SUCCESS_TOAST_MS: i64 = 8_000;

/// Why a mint request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The page has no contract handle.
    NoContract,
    /// No wallet is connected.
    NotConnected,
    /// The supply is still loading or another mint is in flight.
    Busy,
    SoldOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    Skipped(SkipReason),
    Claimed(Vec<ClaimReceipt>),
    Failed,
}

/// A mint whose preconditions held, ready to run.
pub struct MintTask {
    pub(crate) drop: Arc<dyn NftDrop>,
    pub(crate) receiver: String,
    pub(crate) state: SharedState,
    pub(crate) toaster: Arc<Toaster>,
}

impl MintTask {
    pub async fn run(self) -> MintOutcome {
        let progress = self.toaster.loading(MINTING_MESSAGE);

        info!(
            "[MINT] Claiming {} from {} to {}",
            MINT_QUANTITY,
            self.drop.contract_address(),
            self.receiver
        );

        let outcome = match self.drop.claim_to(&self.receiver, MINT_QUANTITY).await {
            Ok(receipts) if receipts.is_empty() => {
                error!(
                    contract = %self.drop.contract_address(),
                    receiver = %self.receiver,
                    "[MINT] Claim returned no receipt"
                );
                self.toaster.error(FAILURE_MESSAGE);
                MintOutcome::Failed
            }
            Ok(receipts) => {
                for claimed in &receipts {
                    info!(
                        tx_hash = %claimed.receipt.transaction_hash,
                        block_number = ?claimed.receipt.block_number,
                        token_id = %claimed.id,
                        metadata = ?claimed.metadata,
                        "[MINT] Claimed token {}",
                        claimed.id
                    );
                }
                self.toaster
                    .success(SUCCESS_MESSAGE, Duration::milliseconds(SUCCESS_TOAST_MS));
                MintOutcome::Claimed(receipts)
            }
            Err(e) => {
                error!(
                    contract = %self.drop.contract_address(),
                    receiver = %self.receiver,
                    error = %e,
                    "[MINT] Claim failed"
                );
                self.toaster.error(FAILURE_MESSAGE);
                MintOutcome::Failed
            }
        };

        self.toaster.dismiss(progress);
        outcome
    }
}

impl Drop for MintTask {
    fn drop(&mut self) {
        self.state.write().loading = false;
    }
}
