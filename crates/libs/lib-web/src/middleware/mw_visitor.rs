//! # Visitor Middleware
//!
//! Identifies each browser with a `visitor_id` cookie (UUID v4). A request
//! without a valid cookie gets a fresh id, and the response sets the cookie.
//! Such a first-time visitor is not `returning`: clients that drop cookies
//! never come back under the same id, so nothing is kept for them.
//!
//! Handlers read the id with `Extension<Visitor>`:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use lib_web::middleware::mw_visitor::Visitor;
//!
//! async fn handler(Extension(visitor): Extension<Visitor>) -> String {
//!     format!("Visitor {}", visitor.id)
//! }
//! ```

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;
use uuid::Uuid;

pub const VISITOR_COOKIE: &str = "visitor_id";

/// The visitor a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visitor {
    pub id: Uuid,
    /// The request carried a valid `visitor_id` cookie.
    pub returning: bool,
}

impl Visitor {
    pub fn returning(id: Uuid) -> Self {
        Self { id, returning: true }
    }

    pub fn first_visit(id: Uuid) -> Self {
        Self { id, returning: false }
    }
}

/// Visitor stamping middleware.
///
/// - **Valid cookie**: the id is reused, no cookie is set
/// - **Missing/invalid cookie**: a new id is generated and set on the response
pub async fn stamp_visitor(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let known = jar
        .get(VISITOR_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let visitor = match known {
        Some(id) => Visitor::returning(id),
        None => Visitor::first_visit(Uuid::new_v4()),
    };
    req.extensions_mut().insert(visitor);

    let res = next.run(req).await;

    if known.is_some() {
        return res;
    }

    debug!("[SESSION] New visitor {}", visitor.id);
    let cookie = Cookie::build((VISITOR_COOKIE, visitor.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .permanent();

    (jar.add(cookie), res).into_response()
}
