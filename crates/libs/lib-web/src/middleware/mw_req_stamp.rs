//! # Request Stamping Middleware
//!
//! Gives every request an id for log correlation. An inbound `X-Request-ID`
//! from a proxy is kept; otherwise a UUID v4 is generated. The id is echoed on
//! the response.
//!
//! Handlers and later middleware read it with `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest inbound id accepted as-is.
const MAX_INBOUND_ID_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub received_at: Instant,
}

impl RequestStamp {
    fn from_request(req: &Request) -> Self {
        let inbound = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|id| !id.is_empty() && id.len() <= MAX_INBOUND_ID_LEN)
            .filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));

        Self {
            id: inbound.map_or_else(|| Uuid::new_v4().to_string(), str::to_string),
            received_at: Instant::now(),
        }
    }
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_request(&req);
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }

    res
}
