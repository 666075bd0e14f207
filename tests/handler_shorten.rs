mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

#[tokio::test]
async fn test_shorten_success() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["original_url"], "https://example.com/some/long/path");
    assert!(json["expires_at"].is_null());
    assert!(json.get("custom_alias").is_none());
}

#[tokio::test]
async fn test_shorten_same_url_reuses_link() {
    let app = common::create_test_app();

    let first = common::shorten_url(&app.server, "https://example.com/dup").await;
    let second = common::shorten_url(&app.server, "https://example.com/dup").await;

    assert_eq!(first, second);
    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_expired_link_not_reused() {
    let app = common::create_test_app();

    let expired = common::shorten_expired(&app.server, "https://example.com/old").await;
    let fresh = common::shorten_url(&app.server, "https://example.com/old").await;

    assert_ne!(expired, fresh);
    assert_eq!(app.repository.len(), 2);
}

#[tokio::test]
async fn test_shorten_with_custom_alias() {
    let app = common::create_test_app();

    let json = common::shorten(
        &app.server,
        json!({ "url": "https://example.com/promo", "custom_alias": "promo2030" }),
    )
    .await;

    assert_eq!(json["custom_alias"], "promo2030");
    let code = json["short_code"].as_str().unwrap();
    assert_ne!(code, "promo2030");
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
}

#[tokio::test]
async fn test_shorten_alias_conflict() {
    let app = common::create_test_app();

    common::shorten(
        &app.server,
        json!({ "url": "https://x.com", "custom_alias": "myalias" }),
    )
    .await;

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://y.com", "custom_alias": "myalias" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "alias_conflict");
    assert_eq!(json["error"]["details"]["alias"], "myalias");
}

#[tokio::test]
async fn test_shorten_alias_equal_to_existing_code_conflicts() {
    let app = common::create_test_app();

    let code = common::shorten_url(&app.server, "https://example.com/a").await;

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/b", "custom_alias": code }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_alias_too_short() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "custom_alias": "ab" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_alias_not_alphanumeric() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "custom_alias": "my-alias" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_shorten_reserved_alias() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "custom_alias": "stats" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let app = common::create_test_app();

    for url in ["not-a-valid-url", "ftp://files.example.com/a", ""] {
        let response = app.server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
    }

    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let app = common::create_test_app();

    for url in ["https://example.com/a\u{1}b", "https://example.com/a\nb"] {
        let response = app.server.post("/shorten").json(&json!({ "url": url })).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
    }

    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "custom_alias": "promo" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_invalid_expiry() {
    let app = common::create_test_app();

    let response = app
        .server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com", "expires_at": "tomorrow" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_shorten_naive_expiry_is_utc() {
    let app = common::create_test_app();

    let json = common::shorten(
        &app.server,
        json!({ "url": "https://example.com", "expires_at": "2030-06-01T08:30:00" }),
    )
    .await;

    let expires_at: DateTime<Utc> = json["expires_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(expires_at.to_rfc3339(), "2030-06-01T08:30:00+00:00");
}

#[tokio::test]
async fn test_shorten_future_expiry_roundtrip() {
    let app = common::create_test_app();
    let expires_at = Utc::now() + Duration::days(7);

    let json = common::shorten(
        &app.server,
        json!({ "url": "https://example.com/week", "expires_at": expires_at.to_rfc3339() }),
    )
    .await;

    let returned: DateTime<Utc> = json["expires_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(returned, expires_at);
}

#[tokio::test]
async fn test_generated_codes_are_unique() {
    let app = common::create_test_app();
    let mut codes = std::collections::HashSet::new();

    for i in 0..50 {
        let code = common::shorten_url(&app.server, &format!("https://example.com/{i}")).await;
        assert!(codes.insert(code));
    }

    assert_eq!(app.repository.len(), 50);
}
