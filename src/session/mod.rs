/**
 * Session Management
 *
 * This module defines the session value carried between requests and the
 * store abstraction that persists it. A session is the backend-issued
 * token plus a snapshot of the authenticated user's record; the server's
 * store implementation keeps it in a cookie (see `cookie`).
 *
 * There is no process-global auth state: every request loads its own
 * session from its own store, and handlers pass the session explicitly to
 * whatever needs it.
 */

use serde::{Deserialize, Serialize};

use crate::remote::records::UserRecord;

/// Cookie-backed session store
pub mod cookie;

pub use cookie::{CookieSessionStore, SESSION_COOKIE};

/// Claims inspected in the session token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: i64,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Backend-issued token, sent on every remote call
    pub token: String,
    /// Snapshot of the user record as of the last auth/refresh
    pub user: UserRecord,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserRecord) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Record id of the session's user
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Whether the session is structurally valid: a token is present and
    /// its expiry claim lies in the future
    ///
    /// This does not prove the token is still accepted by the backend;
    /// only a refresh call can. It is the cheap local check used before
    /// spending a network round trip.
    pub fn is_valid(&self) -> bool {
        if self.token.is_empty() {
            return false;
        }
        match token_expiry(&self.token) {
            Some(exp) => exp > chrono::Utc::now().timestamp(),
            None => false,
        }
    }
}

/// Decode the expiry claim without verifying the signature
///
/// Only the remote service holds the signing secret, so the signature is
/// unverifiable here. The backend re-verifies the token on every call;
/// locally the token is opaque apart from its expiry.
fn token_expiry(token: &str) -> Option<i64> {
    let data = jsonwebtoken::dangerous::insecure_decode::<Claims>(token).ok()?;
    Some(data.claims.exp)
}

/// Per-request session persistence
///
/// `load` returns the session the request arrived with, `save` and `clear`
/// change what the client holds afterwards. Implementations swallow
/// persistence failures: a session that cannot be written only affects
/// the current response, never the request's outcome.
///
/// `Send` is part of the contract: stores are held across awaits inside
/// the async actions.
pub trait SessionStore: Send {
    /// Currently stored session, if any
    fn load(&self) -> Option<Session>;

    /// Persist a session
    fn save(&mut self, session: &Session);

    /// Remove any stored session
    fn clear(&mut self);
}
