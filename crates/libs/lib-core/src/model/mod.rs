//! # Model
//!
//! External collaborators of the drop page, each behind a trait so the page can
//! be driven by mocks in tests.

// region: --- Modules
pub mod content;
pub mod drop;
pub mod image;
pub mod wallet;
// endregion: --- Modules
