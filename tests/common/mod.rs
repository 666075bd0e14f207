#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use shortlink::domain::access_event::AccessEvent;
use shortlink::infrastructure::persistence::InMemoryLinkRepository;
use shortlink::routes::router;
use shortlink::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";

pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryLinkRepository>,
    pub access_rx: mpsc::Receiver<AccessEvent>,
}

pub fn create_test_state() -> (
    AppState,
    Arc<InMemoryLinkRepository>,
    mpsc::Receiver<AccessEvent>,
) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(repository.clone(), tx, BASE_URL);

    (state, repository, rx)
}

pub fn create_test_app() -> TestApp {
    let (state, repository, access_rx) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        repository,
        access_rx,
    }
}

pub async fn shorten(server: &TestServer, body: Value) -> Value {
    let response = server.post("/shorten").json(&body).await;
    response.assert_status_ok();
    response.json::<Value>()
}

pub async fn shorten_url(server: &TestServer, url: &str) -> String {
    let json = shorten(server, json!({ "url": url })).await;
    json["short_code"].as_str().unwrap().to_string()
}

pub async fn shorten_expired(server: &TestServer, url: &str) -> String {
    let expires_at = (Utc::now() - Duration::days(1)).to_rfc3339();
    let json = shorten(server, json!({ "url": url, "expires_at": expires_at })).await;
    json["short_code"].as_str().unwrap().to_string()
}
