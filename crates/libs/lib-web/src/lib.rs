//! # Web Library
//!
//! The drop page served over HTTP: handlers, middleware, services, and the
//! page components they drive.
//!
//! ```text
//! request ─► stamp_req ─► TraceLayer ─► log_requests ─► stamp_visitor ─► handler
//!                                                                          │
//!                 DropPageService ◄────────────────────────────────────────┤
//!                   ├─ ContentStore (Sanity)                               │
//!                   └─ PageRegistry ─► DropPage ─► NftDrop (gateway)       │
//!                 SessionStore ◄───────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod middleware;
pub mod page;
pub mod server;
pub mod services;

pub use server::{create_router, start_server, AppState, ServerConfig};
