//! # Drop Page Handlers
//!
//! Server-rendered drop page. The page reloads itself while it is loading or a
//! toast is up; mint and sign-out are plain form posts answered with a 303
//! back to the page.
//!
//! ## Mint
//!
//! The collection is queried again so the claim goes to the contract the slug
//! points at now. The page then refuses the mint unless the button would be
//! enabled (loaded, not sold out, signed in, no mint in flight); that check
//! and the `loading` flag are taken together, so a double submit claims once.
//! An accepted claim runs as a detached task and outlives the request.

use crate::middleware::Visitor;
use crate::page::view::drop_state;
use crate::page::{PageView, Renderer, SkipReason};
use crate::services::{DropPageService, SessionStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Json,
};
use lib_core::{AppError, ImageUrlBuilder};
use shared::dto::drop::DropStateResponse;
use std::sync::Arc;
use tracing::{debug, info, warn};

fn page_url(slug: &str) -> String {
    format!("/nft/{}", slug)
}

/// HTML answer for a failed page load: the not-found page for a lookup miss,
/// the JSON error otherwise.
fn error_page(renderer: &Renderer, slug: &str, err: AppError) -> Response {
    if !matches!(err, AppError::NotFound(_)) {
        return err.into_response();
    }
    match renderer.render_not_found(slug) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Render the drop page.
///
/// **Route**: `GET /nft/{id}`
///
/// # Returns
///
/// - Success (200): the page
/// - Error (404): not-found page when no collection has this slug
/// - Error (502): the content backend failed
pub async fn show(
    State(drop_pages): State<DropPageService>,
    State(sessions): State<Arc<SessionStore>>,
    State(images): State<ImageUrlBuilder>,
    State(renderer): State<Arc<Renderer>>,
    Extension(visitor): Extension<Visitor>,
    Path(slug): Path<String>,
) -> Response {
    let (collection, page) = match drop_pages.load(visitor, &slug).await {
        Ok(loaded) => loaded,
        Err(e) => return error_page(&renderer, &slug, e),
    };

    let session = sessions.snapshot(visitor.id);
    let view = PageView::build(&collection, &page, &session, &images);

    match renderer.render_page(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Mint one token to the visitor's connected wallet.
///
/// **Route**: `POST /nft/{id}/mint`
///
/// Always answers 303 to the page unless the collection does not exist.
pub async fn mint(
    State(drop_pages): State<DropPageService>,
    State(sessions): State<Arc<SessionStore>>,
    State(renderer): State<Arc<Renderer>>,
    Extension(visitor): Extension<Visitor>,
    Path(slug): Path<String>,
) -> Response {
    let page = match drop_pages.load(visitor, &slug).await {
        Ok((_, page)) => page,
        Err(e) => return error_page(&renderer, &slug, e),
    };

    let session = sessions.snapshot(visitor.id);
    match page.spawn_mint(&session) {
        Ok(_detached) => info!("[MINT] Started on {} for visitor {}", slug, visitor.id),
        Err(SkipReason::NoContract) => warn!("[MINT] Skipped on {}: no contract handle", slug),
        Err(reason) => debug!("[MINT] Refused on {} for visitor {}: {:?}", slug, visitor.id, reason),
    }

    Redirect::to(&page_url(&slug)).into_response()
}

/// Sign out from the page.
///
/// **Route**: `POST /nft/{id}/disconnect`
pub async fn disconnect(
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
    Path(slug): Path<String>,
) -> Redirect {
    sessions.disconnect(visitor.id);
    Redirect::to(&page_url(&slug))
}

/// Derived page state for polling clients.
///
/// **Route**: `GET /api/nft/{id}`
///
/// # Returns
///
/// - Success (200): `Json<DropStateResponse>`
/// - Error (404): `{"error": ..., "code": "NotFound"}`
pub async fn state(
    State(drop_pages): State<DropPageService>,
    State(sessions): State<Arc<SessionStore>>,
    Extension(visitor): Extension<Visitor>,
    Path(slug): Path<String>,
) -> Result<Json<DropStateResponse>, AppError> {
    let page = drop_pages.page_for(visitor, &slug).await?;
    let session = sessions.snapshot(visitor.id);
    Ok(Json(drop_state(&page, &session)))
}
