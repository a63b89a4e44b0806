//! Mocked remote data service
//!
//! `wiremock` stands in for the hosted backend. Each helper mounts one
//! endpoint with a canned response; tests build the real application
//! router pointed at the mock's URI, so requests travel the full stack
//! from route to middleware to action to HTTP client.

use axum_test::TestServer;
use raildesk::config::AppConfig;
use raildesk::remote::records::UserRecord;
use raildesk::server::init::create_app_with_config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Application server wired to a mocked backend
pub async fn test_server(mock: &MockServer) -> TestServer {
    let config = AppConfig::builder()
        .remote_url(mock.uri())
        .build()
        .unwrap();
    TestServer::new(create_app_with_config(config)).unwrap()
}

/// Body of the password and refresh auth endpoints
pub fn auth_body(token: &str, user: &UserRecord) -> serde_json::Value {
    serde_json::json!({ "token": token, "record": user })
}

/// Paged list envelope holding the given items on page one
pub fn list_body(items: serde_json::Value) -> serde_json::Value {
    let total = items.as_array().map(|a| a.len()).unwrap_or(0);
    serde_json::json!({
        "page": 1,
        "perPage": 50,
        "totalItems": total,
        "totalPages": if total == 0 { 0 } else { 1 },
        "items": items,
    })
}

pub async fn mock_login_success(mock: &MockServer, token: &str, user: &UserRecord) {
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(token, user)))
        .mount(mock)
        .await;
}

pub async fn mock_login_rejected(mock: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "status": 400,
            "message": "Failed to authenticate.",
            "data": {}
        })))
        .mount(mock)
        .await;
}

pub async fn mock_auth_refresh(mock: &MockServer, token: &str, user: &UserRecord) {
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(token, user)))
        .mount(mock)
        .await;
}

/// Mount a one-page list response for a collection
pub async fn mock_list(mock: &MockServer, collection: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/collections/{}/records", collection)))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(items)))
        .mount(mock)
        .await;
}
