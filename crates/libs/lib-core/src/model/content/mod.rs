//! # Content Backend
//!
//! Collection records live in a headless content backend. The page issues one
//! query per request and renders the result; nothing is cached.

// region: --- Modules
mod sanity;
// endregion: --- Modules

pub use sanity::{SanityClient, COLLECTION_BY_SLUG};

use crate::error::Result;
use async_trait::async_trait;
use shared::dto::collection::Collection;

/// Read-only access to collection documents.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up a collection by its slug. `Ok(None)` means no such document.
    async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>>;
}
