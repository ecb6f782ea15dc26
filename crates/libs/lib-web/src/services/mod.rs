//! # Services Layer
//!
//! Orchestration between the HTTP handlers and the page components:
//!
//! ```text
//! Handlers (HTTP) → Services → ContentStore / DropProvider / PageRegistry
//! ```
//!
//! - [`drop_page`] - slug → collection → mounted page
//! - [`session`] - visitor → sign-in challenge → connected wallet

pub mod drop_page;
pub mod session;

pub use drop_page::DropPageService;
pub use session::SessionStore;
