//! # Session Handlers
//!
//! Wallet sign-in by challenge: the browser asks for a challenge, the wallet
//! signs the returned message with `personal_sign`, and the signed answer links
//! the account to the visitor. An address is never taken on the browser's word.
//!
//! ```bash
//! curl -b visitor_id=... -X POST http://localhost:3000/api/session/challenge
//! # {"challenge":"<uuid>","message":"Sign in to ...\n\nChallenge: <uuid>"}
//!
//! curl -b visitor_id=... -X POST http://localhost:3000/api/session/connect \
//!   -H 'content-type: application/json' \
//!   -d '{"address":"0x5290...","signature":"0x...","challenge":"<uuid>"}'
//! ```

use crate::middleware::Visitor;
use crate::services::SessionStore;
use axum::{extract::State, Extension, Json};
use lib_core::{AppError, WalletSession};
use shared::dto::drop::{ChallengeResponse, ConnectRequest, SessionResponse};
use std::sync::Arc;

fn response(session: &dyn WalletSession) -> SessionResponse {
    SessionResponse {
        address: session.address(),
        connected: session.is_connected(),
    }
}

/// **Route**: `GET /api/session`
pub async fn current(
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
) -> Json<SessionResponse> {
    Json(response(&sessions.snapshot(visitor.id)))
}

/// Issue a one-time sign-in challenge for the visitor.
///
/// **Route**: `POST /api/session/challenge`
///
/// The challenge expires after five minutes and is spent by the next connect.
pub async fn challenge(
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
) -> Json<ChallengeResponse> {
    Json(sessions.issue_challenge(visitor.id))
}

/// Link the visitor's wallet once its signature of the challenge checks out.
///
/// **Route**: `POST /api/session/connect`
///
/// # Returns
///
/// - Success (200): `Json<SessionResponse>` with `connected: true`
/// - Error (400): the address or signature is malformed
/// - Error (401): no live challenge, or the signature is not by `address`
pub async fn connect(
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = sessions.connect(visitor.id, &req.address, &req.challenge, &req.signature)?;
    Ok(Json(response(&session)))
}

/// **Route**: `POST /api/session/disconnect`
pub async fn disconnect(
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
) -> Json<SessionResponse> {
    sessions.disconnect(visitor.id);
    Json(response(&sessions.snapshot(visitor.id)))
}
