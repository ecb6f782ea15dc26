//! # Handler Tests
//!
//! Router-level tests: the full middleware stack over mock content and drop
//! backends, driven with `tower::ServiceExt::oneshot`.

mod nft;

use crate::middleware::VISITOR_COOKIE;
use crate::page::testing::{sample_collection, wait_until, MockContent, MockDrop, MockProvider, TestWallet};
use crate::page::DropPage;
use crate::server::{create_router, AppState, ServerConfig};
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use lib_core::Config;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub fn test_config() -> Config {
    Config {
        sanity_project_id: "abc123xy".to_string(),
        sanity_dataset: "production".to_string(),
        sanity_api_version: "2021-10-21".to_string(),
        sanity_use_cdn: true,
        sanity_token: None,
        drop_gateway_url: "http://localhost:9999".to_string(),
        drop_chain: "goerli".to_string(),
        drop_access_token: None,
        http_timeout_secs: 10,
        page_idle_minutes: 30,
        max_pages: 100,
    }
}

/// Router over one "apes" collection backed by `drop`, plus its state.
pub fn test_app(drop: Arc<MockDrop>) -> (Router, AppState) {
    test_app_with(MockContent::with([sample_collection("apes")]), drop)
}

pub fn test_app_with(content: MockContent, drop: Arc<MockDrop>) -> (Router, AppState) {
    let state = AppState::new(test_config(), Arc::new(content), Arc::new(MockProvider::with(drop)))
        .expect("templates compile");
    let app = create_router(state.clone(), &ServerConfig::default().allowed_origins);
    (app, state)
}

/// A fresh visitor cookie, as handed out on any first request.
pub async fn new_visitor(app: &Router) -> String {
    let res = app.clone().oneshot(get("/health", None)).await.unwrap();
    visitor_cookie(&res)
}

/// A returning visitor opening `/nft/{slug}`, which mounts their page.
pub async fn open_page(app: &Router, slug: &str) -> String {
    let cookie = new_visitor(app).await;
    let res = app
        .clone()
        .oneshot(get(&format!("/nft/{}", slug), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    cookie
}

/// Sign in through the challenge and connect endpoints.
pub async fn sign_in(app: &Router, cookie: &str, wallet: &TestWallet) -> String {
    let res = app
        .clone()
        .oneshot(post("/api/session/challenge", Some(cookie)))
        .await
        .unwrap();
    let issued = body_json(res).await;
    let challenge = issued["challenge"].as_str().unwrap();
    let signature = wallet.sign(issued["message"].as_str().unwrap());

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/session/connect",
            Some(cookie),
            json!({ "address": wallet.address(), "signature": signature, "challenge": challenge }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    wallet.address()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request("GET", uri, cookie, Body::empty())
}

pub fn post(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request("POST", uri, cookie, Body::empty())
}

pub fn post_json(uri: &str, cookie: Option<&str>, json: serde_json::Value) -> Request<Body> {
    let mut req = request("POST", uri, cookie, Body::from(json.to_string()));
    req.headers_mut()
        .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    req
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body).unwrap()
}

/// `visitor_id=<uuid>` from a response's Set-Cookie.
pub fn visitor_cookie<B>(res: &Response<B>) -> String {
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("visitor cookie is set");
    let pair = set_cookie.split(';').next().unwrap().to_string();
    assert!(pair.starts_with(VISITOR_COOKIE));
    pair
}

pub fn visitor_id(cookie: &str) -> Uuid {
    Uuid::parse_str(cookie.split('=').nth(1).unwrap()).unwrap()
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The visitor's mounted page once its supply and price reads have landed.
pub async fn loaded_page(state: &AppState, cookie: &str) -> Arc<DropPage> {
    let page = state
        .drop_pages
        .pages()
        .get(visitor_id(cookie))
        .expect("page is mounted");
    wait_until(|| !page.snapshot().loading && page.snapshot().price.is_some()).await;
    page
}
