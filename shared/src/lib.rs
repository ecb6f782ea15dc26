//! # Shared Data Transfer Objects Library
//!
//! This library defines the records exchanged between the content backend, the
//! drop page server, and polling clients of the page.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::collection`]**: Collection documents from the content backend
//!   - **[`dto::drop`]**: Derived page state, notifications, wallet session payloads
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::wallet_badge`]**: Address as shown in the page header
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::collection::Collection;
//! use shared::utils::wallet_badge;
//!
//! let badge = wallet_badge("0x52908400098527886E0F7030069857D2E4169EE7");
//! assert_eq!(badge, "0x529...69EE7");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
