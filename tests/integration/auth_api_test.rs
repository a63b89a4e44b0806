//! Auth endpoint behavior

use axum::http::StatusCode;
use wiremock::MockServer;

use crate::common::auth_helpers::{fresh_token, make_user};
use crate::common::mock_server::{
    mock_list, mock_login_rejected, mock_login_success, test_server,
};

#[tokio::test]
async fn test_login_success_sets_cookie_and_redirect() {
    let mock = MockServer::start().await;
    let token = fresh_token();
    mock_login_success(&mock, &token, &make_user("u1", "anatest")).await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "anatest@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["redirect"], "/dashboard");
    assert!(body.get("error").is_none());

    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("rd_auth="));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_login_rejection_is_a_fixed_message_not_an_error_status() {
    let mock = MockServer::start().await;
    mock_login_rejected(&mock).await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "anatest@example.com",
            "password": "wrong"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid email or password");
    assert!(body.get("redirect").is_none());
}

#[tokio::test]
async fn test_register_short_name_never_reaches_backend() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "name": "abc",
            "email": "abc@example.com",
            "password": "password123",
            "passwordConfirm": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["errors"][0], "Name must be at least 4 characters long");
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_taken_name_reports_field_error() {
    let mock = MockServer::start().await;
    // The uniqueness pre-check finds an existing user with the name.
    mock_list(
        &mock,
        "users",
        serde_json::json!([{"id": "u9", "name": "anatest", "email": "x@example.com"}]),
    )
    .await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "name": "anatest",
            "email": "new@example.com",
            "password": "password123",
            "passwordConfirm": "password123"
        }))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["errors"][0], "This name is already taken");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.post("/api/auth/logout").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["redirect"], "/login");

    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("rd_auth=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_check_name_too_short_skips_backend() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/api/users/check-name?name=abc").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["available"], false);
    assert_eq!(body["reason"], "too_short");
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_check_name_taken_and_free() {
    let mock = MockServer::start().await;
    mock_list(
        &mock,
        "users",
        serde_json::json!([{"id": "u9", "name": "anatest", "email": "x@example.com"}]),
    )
    .await;
    let server = test_server(&mock).await;

    let response = server.get("/api/users/check-name?name=anatest").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["available"], false);
    assert_eq!(body["reason"], "taken");

    let empty_mock = MockServer::start().await;
    mock_list(&empty_mock, "users", serde_json::json!([])).await;
    let server = test_server(&empty_mock).await;

    let response = server.get("/api/users/check-name?name=newname").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["available"], true);
    assert!(body.get("reason").is_none());
}
