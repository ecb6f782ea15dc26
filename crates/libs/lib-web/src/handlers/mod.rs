//! # HTTP Request Handlers
//!
//! Axum handlers for the drop page, grouped by feature. Handlers delegate to
//! [`crate::services`] and the [`crate::page`] components.
//!
//! ## Handler Modules
//!
//! - **[`nft`]**: the drop page
//!   - `GET  /nft/{id}` - render the page (404 page for unknown slugs)
//!   - `POST /nft/{id}/mint` - start a mint, redirect back
//!   - `POST /nft/{id}/disconnect` - sign out, redirect back
//!   - `GET  /api/nft/{id}` - derived page state as JSON
//!
//! - **[`session`]**: wallet session
//!   - `GET  /api/session` - current session
//!   - `POST /api/session/challenge` - issue a sign-in challenge
//!   - `POST /api/session/connect` - link the wallet that signed it
//!   - `POST /api/session/disconnect` - forget it
//!
//! - **[`health`]**: `GET /health`
//!
//! Every handler runs behind the visitor middleware and extracts
//! `Extension<Visitor>`.

pub mod health;
pub mod nft;
pub mod session;

#[cfg(test)]
mod tests;
