//! Todo endpoint and page behavior

use axum::http::header::COOKIE;
use axum::http::StatusCode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::auth_helpers::{make_session, session_cookie_header};
use crate::common::mock_server::{mock_list, test_server};

fn todo_json(id: &str, title: &str, completed: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": completed,
        "priority": "medium",
        "due_date": "",
        "user": "u1",
        "created": "2024-01-01 00:00:00.000Z",
        "updated": "2024-01-01 00:00:00.000Z"
    })
}

#[tokio::test]
async fn test_create_todo_without_session_reports_in_band() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/todos")
        .json(&serde_json::json!({"title": "Buy milk"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Not authenticated");
    assert!(mock.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_todo_sends_owner_and_token() {
    let mock = MockServer::start().await;
    let session = make_session();
    Mock::given(method("POST"))
        .and(path("/api/collections/todos/records"))
        .and(header("authorization", session.token.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json("t1", "Buy milk", false)))
        .mount(&mock)
        .await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/todos")
        .add_header(COOKIE, session_cookie_header(&session))
        .json(&serde_json::json!({"title": "Buy milk"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["todo"]["title"], "Buy milk");

    let requests = mock.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["user"], "u1");
    assert_eq!(sent["completed"], false);
    assert_eq!(sent["priority"], "medium");
}

#[tokio::test]
async fn test_toggle_reads_then_writes_negation() {
    let mock = MockServer::start().await;
    let session = make_session();
    Mock::given(method("GET"))
        .and(path("/api/collections/todos/records/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json("t1", "Buy milk", false)))
        .mount(&mock)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/collections/todos/records/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json("t1", "Buy milk", true)))
        .mount(&mock)
        .await;
    let server = test_server(&mock).await;

    let response = server
        .post("/api/todos/t1/toggle")
        .add_header(COOKIE, session_cookie_header(&session))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["todo"]["completed"], true);

    let requests = mock.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|request| request.method.as_str() == "PATCH")
        .unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(sent, serde_json::json!({"completed": true}));
}

#[tokio::test]
async fn test_todos_page_degrades_on_backend_failure() {
    // No list mock mounted: the fetch fails and the page renders empty
    // instead of erroring.
    let mock = MockServer::start().await;
    let session = make_session();
    let server = test_server(&mock).await;

    let response = server
        .get("/en/todos")
        .add_header(COOKIE, session_cookie_header(&session))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"], serde_json::json!([]));
    assert_eq!(body["stats"]["total"], 0);
}

#[tokio::test]
async fn test_todos_page_refines_fetched_items() {
    let mock = MockServer::start().await;
    let session = make_session();
    mock_list(
        &mock,
        "todos",
        serde_json::json!([
            todo_json("t1", "Buy milk", false),
            todo_json("t2", "Call dentist", false),
        ]),
    )
    .await;
    let server = test_server(&mock).await;

    let response = server
        .get("/en/todos?search=milk")
        .add_header(COOKIE, session_cookie_header(&session))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["id"], "t1");
    assert_eq!(body["total_items"], 2);
}

#[tokio::test]
async fn test_todos_page_without_session_is_unauthorized() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/en/todos").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todo_new_page_renders_for_session() {
    let mock = MockServer::start().await;
    let session = make_session();
    let server = test_server(&mock).await;

    let response = server
        .get("/en/todos/new")
        .add_header(COOKIE, session_cookie_header(&session))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["locale"], "en");
}

#[tokio::test]
async fn test_todo_new_without_session_is_unauthorized() {
    let mock = MockServer::start().await;
    let server = test_server(&mock).await;

    let response = server.get("/en/todos/new").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todo_edit_for_foreign_record_is_not_found() {
    let mock = MockServer::start().await;
    let session = make_session();
    let mut foreign = todo_json("t9", "Someone else's", false);
    foreign["user"] = serde_json::json!("u2");
    Mock::given(method("GET"))
        .and(path("/api/collections/todos/records/t9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(foreign))
        .mount(&mock)
        .await;
    let server = test_server(&mock).await;

    let response = server
        .get("/en/todos/t9/edit")
        .add_header(COOKIE, session_cookie_header(&session))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
