//! # Drop Page Handler Tests

use super::*;
use lib_core::WalletSession;
use tokio::sync::Notify;

#[tokio::test]
async fn test_unknown_slug_renders_not_found() {
    // Arrange
    let (app, state) = test_app(MockDrop::new(3, 10));

    // Act
    let res = app.oneshot(get("/nft/birds", None)).await.unwrap();

    // Assert
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let html = body_text(res).await;
    assert!(html.contains("404"));
    assert!(html.contains("birds"));
    assert!(state.drop_pages.pages().is_empty());
}

#[tokio::test]
async fn test_page_renders_collection() {
    let (app, _) = test_app(MockDrop::new(3, 10).with_price("0.01"));

    let res = app.oneshot(get("/nft/apes", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let _cookie = visitor_cookie(&res);
    let html = body_text(res).await;
    assert!(html.contains("The apes drop"));
    assert!(html.contains("PAPAFAM apes"));
    assert!(html.contains("sign in"));
}

#[tokio::test]
async fn test_dotted_slug_is_served() {
    let (app, _) = test_app_with(
        MockContent::with([sample_collection("apes.v2")]),
        MockDrop::new(3, 10),
    );

    let res = app.oneshot(get("/nft/apes.v2", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("PAPAFAM apes.v2"));
}

#[tokio::test]
async fn test_cookieless_visits_mount_nothing() {
    let drop = MockDrop::new(3, 10);
    let (app, state) = test_app(Arc::clone(&drop));

    for _ in 0..3 {
        let res = app.clone().oneshot(get("/nft/apes", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert!(state.drop_pages.pages().is_empty());
}

#[tokio::test]
async fn test_state_endpoint_reports_supply() {
    let (app, state) = test_app(MockDrop::new(3, 10).with_price("0.01"));
    let cookie = open_page(&app, "apes").await;
    loaded_page(&state, &cookie).await;

    let res = app.oneshot(get("/api/nft/apes", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["claimed_supply"], 3);
    assert_eq!(body["total_supply"], "10");
    assert_eq!(body["price"], "0.01");
    assert_eq!(body["mint_button"]["label"], "Sign in to Mint");
    assert_eq!(body["mint_button"]["disabled"], true);
}

#[tokio::test]
async fn test_state_endpoint_unknown_slug_is_json_404() {
    let (app, _) = test_app(MockDrop::new(3, 10));

    let res = app.oneshot(get("/api/nft/birds", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "NotFound");
}

#[tokio::test]
async fn test_mint_without_session_makes_no_claim() {
    let drop = MockDrop::new(3, 10).with_price("0.01");
    let (app, state) = test_app(Arc::clone(&drop));
    let cookie = open_page(&app, "apes").await;
    loaded_page(&state, &cookie).await;

    let res = app.oneshot(post("/nft/apes/mint", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/nft/apes");
    assert!(drop.claim_calls().is_empty());
}

#[tokio::test]
async fn test_mint_with_session_claims_once() {
    let drop = MockDrop::new(3, 10).with_price("0.01");
    let (app, state) = test_app(Arc::clone(&drop));
    let cookie = open_page(&app, "apes").await;
    let page = loaded_page(&state, &cookie).await;
    let address = sign_in(&app, &cookie, &TestWallet::new(0x11)).await;

    let res = app.oneshot(post("/nft/apes/mint", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    wait_until(|| !page.toaster().active().is_empty() && !page.snapshot().loading).await;
    assert_eq!(drop.claim_calls(), vec![(address, 1)]);
}

#[tokio::test]
async fn test_concurrent_mints_claim_once() {
    // Arrange
    let gate = Arc::new(Notify::new());
    let drop = MockDrop::new(3, 10).with_price("0.01").gated(Arc::clone(&gate));
    let (app, state) = test_app(Arc::clone(&drop));
    let cookie = open_page(&app, "apes").await;
    let page = loaded_page(&state, &cookie).await;
    let address = sign_in(&app, &cookie, &TestWallet::new(0x11)).await;

    // Act
    let (first, second) = tokio::join!(
        app.clone().oneshot(post("/nft/apes/mint", Some(&cookie))),
        app.clone().oneshot(post("/nft/apes/mint", Some(&cookie))),
    );

    // Assert
    assert_eq!(first.unwrap().status(), StatusCode::SEE_OTHER);
    assert_eq!(second.unwrap().status(), StatusCode::SEE_OTHER);
    wait_until(|| !drop.claim_calls().is_empty()).await;
    assert!(page.snapshot().loading);

    gate.notify_one();
    wait_until(|| !page.snapshot().loading).await;
    assert_eq!(drop.claim_calls(), vec![(address, 1)]);
}

#[tokio::test]
async fn test_mint_while_supply_loading_is_refused() {
    let drop = MockDrop::new(3, 10).hanging();
    let (app, state) = test_app(Arc::clone(&drop));
    let cookie = open_page(&app, "apes").await;
    sign_in(&app, &cookie, &TestWallet::new(0x11)).await;

    let res = app.oneshot(post("/nft/apes/mint", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let page = state.drop_pages.pages().get(visitor_id(&cookie)).unwrap();
    assert!(page.snapshot().loading);
    assert!(page.toaster().active().is_empty());
    assert!(drop.claim_calls().is_empty());
}

#[tokio::test]
async fn test_sold_out_mint_is_refused() {
    let drop = MockDrop::new(5, 5).with_price("0.01");
    let (app, state) = test_app(Arc::clone(&drop));
    let cookie = open_page(&app, "apes").await;
    loaded_page(&state, &cookie).await;
    sign_in(&app, &cookie, &TestWallet::new(0x11)).await;

    let res = app.clone().oneshot(get("/nft/apes", Some(&cookie))).await.unwrap();
    assert!(body_text(res).await.contains("SOLD OUT"));

    let res = app.oneshot(post("/nft/apes/mint", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(drop.claim_calls().is_empty());
}

#[tokio::test]
async fn test_disconnect_form_signs_out() {
    let (app, state) = test_app(MockDrop::new(3, 10));
    let cookie = open_page(&app, "apes").await;
    sign_in(&app, &cookie, &TestWallet::new(0x11)).await;

    let res = app.oneshot(post("/nft/apes/disconnect", Some(&cookie))).await.unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/nft/apes");
    assert!(state.sessions.snapshot(visitor_id(&cookie)).address().is_none());
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app(MockDrop::new(0, 1));

    let res = app.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["chain"], "goerli");
}
