//! # Image URL Resolution
//!
//! Turns an image asset reference into a CDN URL. Pure string work, no requests.
//!
//! ```rust
//! use lib_core::ImageUrlBuilder;
//! use shared::dto::collection::{AssetRef, ImageRef};
//!
//! let builder = ImageUrlBuilder::new("abc123xy", "production");
//! let image = ImageRef {
//!     asset: AssetRef { reference: "image-Tb9Ew8CX-2000x3000-jpg".to_string(), kind: None },
//! };
//! assert_eq!(
//!     builder.url_for(&image).unwrap(),
//!     "https://cdn.sanity.io/images/abc123xy/production/Tb9Ew8CX-2000x3000.jpg"
//! );
//! ```

use crate::error::{AppError, Result};
use shared::dto::collection::ImageRef;

const CDN_BASE: &str = "https://cdn.sanity.io";

/// Builds image URLs for one project/dataset.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    base_url: String,
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            base_url: CDN_BASE.to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Serve from a different host, e.g. a custom CDN domain.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the original image.
    pub fn url_for(&self, image: &ImageRef) -> Result<String> {
        let (id, dimensions, format) = parse_asset_ref(&image.asset.reference)?;
        Ok(format!(
            "{}/images/{}/{}/{}-{}.{}",
            self.base_url, self.project_id, self.dataset, id, dimensions, format
        ))
    }
}

/// Split `image-<id>-<W>x<H>-<format>` into its parts.
fn parse_asset_ref(reference: &str) -> Result<(&str, &str, &str)> {
    let malformed = || AppError::InvalidInput(format!("Malformed image reference: {}", reference));

    let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
    let mut parts = rest.rsplitn(3, '-');
    let format = parts.next().ok_or_else(malformed)?;
    let dimensions = parts.next().ok_or_else(malformed)?;
    let id = parts.next().ok_or_else(malformed)?;

    let valid_dimensions = dimensions
        .split_once('x')
        .map(|(w, h)| {
            !w.is_empty() && !h.is_empty()
                && w.chars().all(|c| c.is_ascii_digit())
                && h.chars().all(|c| c.is_ascii_digit())
        })
        .unwrap_or(false);

    if id.is_empty() || format.is_empty() || !valid_dimensions {
        return Err(malformed());
    }

    Ok((id, dimensions, format))
}
