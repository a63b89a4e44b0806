//! Session and token helpers for integration tests

use jsonwebtoken::{encode, EncodingKey, Header};
use raildesk::remote::records::UserRecord;
use raildesk::session::{Session, SESSION_COOKIE};

/// Signed JWT with the given expiry; the server never verifies the
/// signature locally, only the `exp` claim
pub fn make_token(exp: i64) -> String {
    encode(
        &Header::default(),
        &serde_json::json!({ "exp": exp }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// Token that stays valid for the duration of a test
pub fn fresh_token() -> String {
    make_token(chrono::Utc::now().timestamp() + 3600)
}

pub fn make_user(id: &str, name: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: format!("{}@example.com", name),
        name: name.to_string(),
        verified: true,
        created: "2024-01-01 00:00:00.000Z".to_string(),
        updated: "2024-01-01 00:00:00.000Z".to_string(),
    }
}

pub fn make_session() -> Session {
    Session::new(fresh_token(), make_user("u1", "anatest"))
}

/// Value of the session cookie, as the server writes it
pub fn session_cookie_value(session: &Session) -> String {
    urlencoding::encode(&serde_json::to_string(session).unwrap()).into_owned()
}

/// Cookie header value carrying a session
pub fn session_cookie_header(session: &Session) -> axum::http::HeaderValue {
    axum::http::HeaderValue::from_str(&format!(
        "{}={}",
        SESSION_COOKIE,
        session_cookie_value(session)
    ))
    .unwrap()
}
