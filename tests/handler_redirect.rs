mod common;

use axum::http::StatusCode;
use serde_json::json;
use shortlink::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::create_test_app();
    let code = common::shorten_url(&app.server, "https://example.com/target?q=1#frag").await;

    let response = app.server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target?q=1#frag");
}

#[tokio::test]
async fn test_redirect_by_alias() {
    let app = common::create_test_app();
    common::shorten(
        &app.server,
        json!({ "url": "https://example.com/promo", "custom_alias": "promo2030" }),
    )
    .await;

    let response = app.server.get("/promo2030").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/promo");
}

#[tokio::test]
async fn test_redirect_queues_access_event() {
    let mut app = common::create_test_app();
    let code = common::shorten_url(&app.server, "https://example.com/tracked").await;

    app.server.get(&format!("/{code}")).await;

    let event = app.access_rx.try_recv().unwrap();
    let link = app
        .repository
        .find_by_identifier(&code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.link_id, link.id);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/doesnotexist").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(app.access_rx.is_empty());
}

#[tokio::test]
async fn test_redirect_expired() {
    let app = common::create_test_app();
    let code = common::shorten_expired(&app.server, "https://example.com/gone").await;

    let response = app.server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::GONE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert!(app.access_rx.is_empty());
}

#[tokio::test]
async fn test_redirect_succeeds_when_queue_closed() {
    let app = common::create_test_app();
    let code = common::shorten_url(&app.server, "https://example.com/anyway").await;

    drop(app.access_rx);

    let response = app.server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
}

#[tokio::test]
async fn test_redirect_code_with_nul_byte_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/%00abc").await;

    response.assert_status_not_found();
}
