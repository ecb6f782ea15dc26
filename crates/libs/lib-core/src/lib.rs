//! # Core Library
//!
//! Configuration, error type, and the external collaborators of the drop page:
//! the content backend, image resolution, the contract-drop provider, and the
//! wallet session capability.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::content::{ContentStore, SanityClient};
pub use model::drop::{DropProvider, GatewayDropProvider, NftDrop, TokenCount};
pub use model::image::ImageUrlBuilder;
pub use model::wallet::{sign_in_message, verify_personal_sign, SessionSnapshot, WalletSession};
