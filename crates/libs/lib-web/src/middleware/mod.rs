//! # Middleware
//!
//! Axum middleware for visitor identification, request stamping, and logging.
//!
//! ## Modules
//!
//! - **[`mw_visitor`]**: `visitor_id` cookie stamping
//! - **[`mw_req_stamp`]**: Request ID and timestamp stamping
//! - **[`mw_logging`]**: Request/response logging with redacted headers

// region: --- Modules
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_visitor;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_visitor::{stamp_visitor, Visitor, VISITOR_COOKIE};
// endregion: --- Re-exports
