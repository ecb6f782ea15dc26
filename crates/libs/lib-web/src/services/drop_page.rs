//! # Drop Page Service
//!
//! Resolves a slug to its collection and the visitor's mounted page.
//!
//! ```text
//! slug ──► validate ──► ContentStore::collection_by_slug ──► PageRegistry::mount
//!                             │                                  (returning visitors)
//!                             └─ None ──► AppError::NotFound
//! ```
//!
//! A first-time visitor (no cookie yet) gets a page of its own that is never
//! registered; it is dropped, and its reads aborted, with the response.

use crate::middleware::Visitor;
use crate::page::{DropPage, PageRegistry};
use lib_core::{AppError, ContentStore, DropProvider, Result};
use lib_utils::validate_slug;
use shared::dto::collection::Collection;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct DropPageService {
    content: Arc<dyn ContentStore>,
    drops: Arc<dyn DropProvider>,
    pages: Arc<PageRegistry>,
}

impl DropPageService {
    pub fn new(content: Arc<dyn ContentStore>, drops: Arc<dyn DropProvider>, pages: Arc<PageRegistry>) -> Self {
        Self { content, drops, pages }
    }

    /// Fetch the collection for `slug` and mount (or reuse) the visitor's page.
    ///
    /// The page is replaced when the slug now points at another contract.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` for an empty or oversized slug, or one with no collection
    /// - `AppError::Content` / `AppError::Decoding` when the content backend fails
    #[instrument(skip(self))]
    pub async fn load(&self, visitor: Visitor, slug: &str) -> Result<(Collection, Arc<DropPage>)> {
        if let Err(e) = validate_slug(slug) {
            debug!("[NFT] Rejected slug {:?}: {}", slug, e);
            return Err(AppError::NotFound(format!("No collection '{}'", slug)));
        }

        let collection = self
            .content
            .collection_by_slug(slug)
            .await?
            .ok_or_else(|| {
                info!("[NFT] No collection for slug {}", slug);
                AppError::NotFound(format!("No collection '{}'", slug))
            })?;

        let page = if visitor.returning {
            self.pages.mount(visitor.id, &collection, self.drops.as_ref())
        } else {
            debug!("[NFT] Unregistered page for first-time visitor {}", visitor.id);
            Arc::new(DropPage::mount(&collection, self.drops.as_ref()))
        };
        Ok((collection, page))
    }

    /// The visitor's mounted page for `slug` without querying the content
    /// backend, loading it if the visitor has none or is on another collection.
    pub async fn page_for(&self, visitor: Visitor, slug: &str) -> Result<Arc<DropPage>> {
        let mounted = visitor.returning.then(|| self.pages.get(visitor.id)).flatten();
        match mounted {
            Some(page) if page.key().slug == slug => Ok(page),
            _ => self.load(visitor, slug).await.map(|(_, page)| page),
        }
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }
}
