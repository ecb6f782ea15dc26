//! # Page Registry
//!
//! One mounted [`DropPage`] per visitor. Asking for a different collection, or
//! for the same slug now pointing at another contract, replaces the page; the
//! old page is dropped and its supply reads are aborted. Pages not touched for
//! longer than the idle TTL are swept on every mount, and once `max_pages` are
//! mounted the least recently seen page makes room for a new visitor.

use super::DropPage;
use lib_core::DropProvider;
use parking_lot::RwLock;
use shared::dto::collection::Collection;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

struct Entry {
    page: Arc<DropPage>,
    last_seen: Instant,
}

pub struct PageRegistry {
    pages: RwLock<HashMap<Uuid, Entry>>,
    idle_ttl: Duration,
    max_pages: usize,
}

impl PageRegistry {
    pub fn new(idle_ttl: Duration, max_pages: usize) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            idle_ttl,
            max_pages: max_pages.max(1),
        }
    }

    /// The visitor's page for `collection`, mounting a fresh one when needed.
    pub fn mount(&self, visitor: Uuid, collection: &Collection, provider: &dyn DropProvider) -> Arc<DropPage> {
        let now = Instant::now();
        let mut pages = self.pages.write();

        let before = pages.len();
        pages.retain(|id, entry| *id == visitor || now.duration_since(entry.last_seen) <= self.idle_ttl);
        if pages.len() < before {
            debug!("[NFT] Evicted {} idle page(s)", before - pages.len());
        }

        if let Some(entry) = pages.get_mut(&visitor) {
            let fresh = now.duration_since(entry.last_seen) <= self.idle_ttl;
            if fresh && entry.page.is_for(collection) {
                entry.last_seen = now;
                return Arc::clone(&entry.page);
            }
            info!(
                "[NFT] Replacing page {} for visitor {} with {}",
                entry.page.key().slug,
                visitor,
                collection.slug.current
            );
        } else if pages.len() >= self.max_pages {
            let oldest = pages
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                pages.remove(&oldest);
                info!("[NFT] Page limit {} reached, evicted visitor {}", self.max_pages, oldest);
            }
        }

        let page = Arc::new(DropPage::mount(collection, provider));
        pages.insert(
            visitor,
            Entry {
                page: Arc::clone(&page),
                last_seen: now,
            },
        );
        page
    }

    /// The visitor's current page, if any, without mounting.
    pub fn get(&self, visitor: Uuid) -> Option<Arc<DropPage>> {
        self.pages.read().get(&visitor).map(|e| Arc::clone(&e.page))
    }

    pub fn len(&self) -> usize {
        self.pages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
