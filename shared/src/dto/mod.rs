//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the content backend
//! and served to clients of the drop page.
//!
//! ## Module Organization
//!
//! - [`collection`] - Collection records as returned by the content backend
//! - [`drop`] - Derived drop page state, notifications, and wallet session payloads
//!
//! ## Serialization Format
//!
//! - **Content records**: field names follow the content backend (`_id`, camelCase)
//! - **Page state**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /api/nft/apes
//!
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "slug": "apes",
//!   "loading": false,
//!   "claimed_supply": 3,
//!   "total_supply": "10",
//!   "price": "0.01",
//!   "sold_out": false,
//!   "mint_button": { "label": "Sign in to Mint", "disabled": true },
//!   "notifications": []
//! }
//! ```

pub mod collection;
pub mod drop;

pub use collection::*;
pub use drop::*;
