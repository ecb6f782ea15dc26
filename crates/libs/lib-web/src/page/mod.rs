//! # Drop Page
//!
//! One mounted drop page: the supply state, the visitor's toasts, and the tasks
//! reading from the contract.
//!
//! ```text
//! mount ──► drop_at(address) ──► spawn fetch_price ─┐
//!                              └► spawn fetch_supply ┴─► SupplyState ──► view
//! mint  ──► prepare_mint (handle, account, idle, not sold out; sets loading)
//!             └► MintTask::run ──► toasts ──► drop clears loading
//! ```
//!
//! Dropping a page aborts its supply reads. A mint in flight is never aborted:
//! the claim may already be on chain.

// region: --- Modules
pub mod mint;
pub mod notify;
pub mod registry;
pub mod render;
pub mod state;
mod supply;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
// endregion: --- Modules

pub use mint::{MintOutcome, MintTask, SkipReason};
pub use notify::{Toast, ToastId, Toaster};
pub use registry::PageRegistry;
pub use render::Renderer;
pub use state::SupplyState;
pub use view::{MintButton, PageView};

use lib_core::{DropProvider, NftDrop, WalletSession};
use parking_lot::{Mutex, RwLock};
use shared::dto::collection::Collection;
use state::SharedState;
use std::sync::Arc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

/// Identity of the collection a page was mounted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageKey {
    pub slug: String,
    pub contract_address: String,
}

impl PageKey {
    pub fn of(collection: &Collection) -> Self {
        Self {
            slug: collection.slug.current.clone(),
            contract_address: collection.address.clone(),
        }
    }
}

pub struct DropPage {
    key: PageKey,
    handle: Option<Arc<dyn NftDrop>>,
    state: SharedState,
    toaster: Arc<Toaster>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl DropPage {
    /// Mount a page for `collection` and start the supply and price reads.
    ///
    /// Must be called inside a Tokio runtime. Without a contract handle nothing
    /// is fetched and the page stays loading.
    pub fn mount(collection: &Collection, provider: &dyn DropProvider) -> Self {
        let page = Self {
            key: PageKey::of(collection),
            handle: provider.drop_at(&collection.address),
            state: Arc::new(RwLock::new(SupplyState::default())),
            toaster: Arc::new(Toaster::new()),
            tasks: Mutex::new(Vec::new()),
        };

        match &page.handle {
            Some(drop) => {
                let price = tokio::spawn(supply::fetch_price(Arc::clone(drop), Arc::clone(&page.state)));
                let supply = tokio::spawn(supply::fetch_supply(Arc::clone(drop), Arc::clone(&page.state)));
                page.tasks.lock().extend([price.abort_handle(), supply.abort_handle()]);
                debug!("[NFT] Mounted page for {} ({})", page.key.slug, page.key.contract_address);
            }
            None => {
                warn!(
                    "[NFT] Page for {} has no contract handle (address {:?})",
                    page.key.slug, page.key.contract_address
                );
            }
        }

        page
    }

    pub fn key(&self) -> &PageKey {
        &self.key
    }

    /// Whether this page was mounted for the same collection and contract.
    pub fn is_for(&self, collection: &Collection) -> bool {
        self.key == PageKey::of(collection)
    }

    pub fn has_contract(&self) -> bool {
        self.handle.is_some()
    }

    pub fn snapshot(&self) -> SupplyState {
        self.state.read().clone()
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Check the mint preconditions and claim the page's `loading` flag.
    ///
    /// Needs a contract handle, a connected account, a loaded supply with no
    /// mint in flight, and stock left. The check and the flag are taken under
    /// one write lock, so at most one task per page exists at a time.
    pub fn prepare_mint(&self, session: &dyn WalletSession) -> Result<MintTask, SkipReason> {
        let drop = self.handle.clone().ok_or(SkipReason::NoContract)?;
        let receiver = session.address().ok_or(SkipReason::NotConnected)?;

        {
            let mut state = self.state.write();
            if state.loading {
                return Err(SkipReason::Busy);
            }
            if state.sold_out() {
                return Err(SkipReason::SoldOut);
            }
            state.loading = true;
        }

        Ok(MintTask {
            drop,
            receiver,
            state: Arc::clone(&self.state),
            toaster: Arc::clone(&self.toaster),
        })
    }

    /// Mint one token and wait for the outcome.
    pub async fn mint(&self, session: &dyn WalletSession) -> MintOutcome {
        match self.prepare_mint(session) {
            Ok(task) => task.run().await,
            Err(reason) => {
                debug!("[MINT] Skipped on {}: {:?}", self.key.slug, reason);
                MintOutcome::Skipped(reason)
            }
        }
    }

    /// Mint one token in the background.
    pub fn spawn_mint(&self, session: &dyn WalletSession) -> Result<JoinHandle<MintOutcome>, SkipReason> {
        let task = self.prepare_mint(session)?;
        Ok(tokio::spawn(task.run()))
    }
}

impl Drop for DropPage {
    fn drop(&mut self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}
