/**
 * Cookie Session Store
 *
 * Persists the session as a single percent-encoded JSON cookie. The cookie
 * is deliberately not HttpOnly: the browser-side code reads and rewrites it
 * after client-driven auth refreshes, mirroring what the server does here.
 *
 * The store buffers at most one pending write per request. Loading parses
 * the request's Cookie header once; save/clear replace the pending write,
 * and the response layer turns it into a single Set-Cookie header.
 */

use axum::http::header::{HeaderMap, HeaderValue, COOKIE};

use crate::session::{Session, SessionStore};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "rd_auth";

/// What the response should do to the client's cookie
#[derive(Debug, Clone, PartialEq)]
enum PendingWrite {
    Set(String),
    Clear,
}

/// Session store backed by the request's cookie jar
#[derive(Debug, Default)]
pub struct CookieSessionStore {
    session: Option<Session>,
    had_cookie: bool,
    pending: Option<PendingWrite>,
}

impl CookieSessionStore {
    /// Build a store from a request's headers
    ///
    /// A cookie that is present but does not decode to a session is treated
    /// as absent for `load`, but still counts as "a cookie was sent"; the
    /// middleware's redirect decision depends on that distinction.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = cookie_value(headers, SESSION_COOKIE);
        let had_cookie = raw.is_some();
        let session = raw.as_deref().and_then(decode_session);
        Self {
            session,
            had_cookie,
            pending: None,
        }
    }

    /// Whether the request carried a session cookie at all, decodable or not
    pub fn had_cookie(&self) -> bool {
        self.had_cookie
    }

    /// Set-Cookie header value for the buffered write, if any
    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        let value = match &self.pending {
            Some(PendingWrite::Set(payload)) => format!(
                "{}={}; Path=/; SameSite=Lax",
                SESSION_COOKIE,
                urlencoding::encode(payload)
            ),
            Some(PendingWrite::Clear) => {
                format!("{}=; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE)
            }
            None => return None,
        };
        // The payload is percent-encoded, so this can only fail for a
        // pathological cookie name; treat that as "nothing to write".
        HeaderValue::from_str(&value).ok()
    }
}

impl SessionStore for CookieSessionStore {
    fn load(&self) -> Option<Session> {
        self.session.clone()
    }

    fn save(&mut self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(payload) => {
                self.session = Some(session.clone());
                self.pending = Some(PendingWrite::Set(payload));
            }
            Err(e) => {
                // Swallowed: an unwritable session only costs the client a
                // re-login, it must not fail the request.
                tracing::warn!("Failed to serialize session cookie: {}", e);
            }
        }
    }

    fn clear(&mut self) {
        self.session = None;
        self.pending = Some(PendingWrite::Clear);
    }
}

/// Extract a named cookie's raw value from the Cookie header
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|part| {
        part.trim()
            .strip_prefix(name)?
            .strip_prefix('=')
            .map(|value| value.to_string())
    })
}

/// Decode a cookie value into a session
///
/// Accepts both the percent-encoded form this store writes and a bare JSON
/// payload, which some clients send back undecoded.
fn decode_session(raw: &str) -> Option<Session> {
    let decoded = urlencoding::decode(raw).ok()?;
    serde_json::from_str(&decoded).ok()
}

impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CookieSessionStore {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(CookieSessionStore::from_headers(&parts.headers))
    }
}
