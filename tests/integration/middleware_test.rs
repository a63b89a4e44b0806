//! Locale and auth gate behavior

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use wiremock::MockServer;

use crate::common::auth_helpers::{make_session, make_user, session_cookie_value};
use crate::common::mock_server::{mock_auth_refresh, mock_list, test_server};

#[tokio::test]
async fn test_locale_less_path_gets_one_redirect() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/todos").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/en/todos");
}

#[tokio::test]
async fn test_root_redirects_to_bare_locale() {
    // "/en/" is not a registered route; the root must land on "/en".
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/en");

    let followed = server.get("/en").await;
    assert_eq!(followed.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_locale_redirect_preserves_query() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/todos?filter=active&search=milk").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "/en/todos?filter=active&search=milk"
    );
}

#[tokio::test]
async fn test_public_page_passes_through() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/en/login").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_without_cookie_redirects_to_login() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/en/dashboard").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "/en/login?redirect=%2Fen%2Fdashboard"
    );
}

#[tokio::test]
async fn test_dashboard_with_valid_session_renders() {
    let mock = MockServer::start().await;
    let session = make_session();
    mock_auth_refresh(&mock, &session.token, &session.user).await;
    mock_list(&mock, "todos", serde_json::json!([])).await;
    let server = test_server(&mock).await;

    let response = server
        .get("/en/dashboard")
        .add_header(COOKIE, cookie_header(&session_cookie_value(&session)))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["id"], "u1");
    assert_eq!(body["stats"]["total"], 0);
    assert_eq!(body["completion_rate"], 0);
}

#[tokio::test]
async fn test_dashboard_with_undecodable_cookie_is_not_redirected() {
    // A cookie that fails validation queues its own removal; redirecting as
    // well caused login loops. The handler answers 401 instead.
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server
        .get("/en/dashboard")
        .add_header(COOKIE, cookie_header("garbage"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_refresh_clears_cookie() {
    // No refresh mock mounted: wiremock answers 404 and the middleware
    // clears the session.
    let mock = MockServer::start().await;
    let session = make_session();
    let server = test_server(&mock).await;

    let response = server
        .get("/en/dashboard")
        .add_header(COOKIE, cookie_header(&session_cookie_value(&session)))
        .await;

    let set_cookie = response.header("set-cookie");
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("rd_auth=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_refresh_rotates_token_in_cookie() {
    let mock = MockServer::start().await;
    let session = make_session();
    let rotated = crate::common::auth_helpers::fresh_token();
    mock_auth_refresh(&mock, &rotated, &make_user("u1", "anatest")).await;
    mock_list(&mock, "todos", serde_json::json!([])).await;
    let server = test_server(&mock).await;

    let response = server
        .get("/en/dashboard")
        .add_header(COOKIE, cookie_header(&session_cookie_value(&session)))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let set_cookie = response.header("set-cookie");
    let decoded = urlencoding::decode(
        set_cookie
            .to_str()
            .unwrap()
            .strip_prefix("rd_auth=")
            .unwrap()
            .split(';')
            .next()
            .unwrap(),
    )
    .unwrap()
    .into_owned();
    let written: serde_json::Value = serde_json::from_str(&decoded).unwrap();
    assert_eq!(written["token"], rotated.as_str());
}

fn cookie_header(value: &str) -> axum::http::HeaderValue {
    axum::http::HeaderValue::from_str(&format!("rd_auth={}", value)).unwrap()
}
