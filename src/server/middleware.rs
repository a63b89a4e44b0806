/**
 * Locale and Auth Gate Middleware
 *
 * Runs on every request, in order:
 *
 * 1. Static assets (any path with a `.`), `/static/`, and `/api/` pass
 *    through untouched; API handlers check sessions themselves.
 * 2. A path without a supported locale prefix gets one redirect to the
 *    same path under the fallback locale, query preserved.
 * 3. With the prefix stripped, a protected logical path triggers session
 *    revalidation: a structurally valid session is refreshed against the
 *    backend (saving the new token, clearing on failure), and a request
 *    that ends up without a valid session AND sent no session cookie at
 *    all is redirected to the locale's login page with the original path
 *    in the `redirect` query parameter.
 * 4. Everything else passes through.
 *
 * A request carrying a cookie that fails validation is NOT redirected in
 * step 3: the revalidation has already queued the cookie's removal, and
 * redirecting as well caused login loops right after the cookie expired
 * mid-session. The page handler answers 401 instead.
 */

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::i18n;
use crate::server::state::AppState;
use crate::session::cookie::CookieSessionStore;
use crate::session::{Session, SessionStore};

/// Logical path prefixes that require a valid session
pub const PROTECTED_PREFIXES: [&str; 1] = ["/dashboard"];

fn is_protected(logical_path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| logical_path.starts_with(prefix))
}

/// The locale + auth gate (see module docs for the state machine)
pub async fn locale_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if path.contains('.') || path.starts_with("/static/") || path.starts_with("/api/") {
        return next.run(request).await;
    }

    let Some((locale, logical_path)) = i18n::split_locale(&path) else {
        let query = request
            .uri()
            .query()
            .map(|q| format!("?{}", q))
            .unwrap_or_default();
        let target = i18n::with_fallback_locale(&format!("{}{}", path, query));
        tracing::debug!("Redirecting locale-less path {} to {}", path, target);
        return Redirect::temporary(&target).into_response();
    };

    if !is_protected(logical_path) {
        return next.run(request).await;
    }

    let mut store = CookieSessionStore::from_headers(request.headers());
    revalidate(&state, &mut store).await;

    let session = store.load().filter(Session::is_valid);
    if session.is_none() && !store.had_cookie() {
        let target = format!(
            "/{}/login?redirect={}",
            locale,
            urlencoding::encode(&path)
        );
        tracing::debug!("Unauthenticated request to {}, redirecting to login", path);
        let mut response = Redirect::temporary(&target).into_response();
        append_session_cookie(&mut response, &store);
        return response;
    }

    // Hand the revalidated session to the handler; the cookie on the
    // request may hold the pre-refresh token.
    if let Some(session) = session {
        request.extensions_mut().insert(session);
    }

    let mut response = next.run(request).await;
    append_session_cookie(&mut response, &store);
    response
}

/// Refresh a structurally valid session against the backend
///
/// A successful refresh saves the new token and user snapshot; a rejected
/// refresh clears the session rather than retrying. Sessions that are
/// already structurally invalid are left alone, no round trip spent.
async fn revalidate(state: &AppState, store: &mut CookieSessionStore) {
    let Some(session) = store.load() else {
        return;
    };
    if !session.is_valid() {
        return;
    }

    let client = state.remote().with_token(&session.token);
    match client.auth_refresh().await {
        Ok(auth) => store.save(&Session::new(auth.token, auth.record)),
        Err(e) => {
            tracing::warn!("Auth refresh failed: {}", e);
            store.clear();
        }
    }
}

fn append_session_cookie(response: &mut Response, store: &CookieSessionStore) {
    if let Some(header) = store.set_cookie_header() {
        response.headers_mut().append(SET_COOKIE, header);
    }
}

/// Extractor for the caller's session, if any
///
/// Prefers the revalidated session the middleware attached; otherwise
/// falls back to the request's cookie. Presence is not validity: handlers
/// pass the session on and let the backend reject a stale token.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(CurrentSession(Some(session.clone())));
        }
        let store = CookieSessionStore::from_headers(&parts.headers);
        Ok(CurrentSession(store.load()))
    }
}
