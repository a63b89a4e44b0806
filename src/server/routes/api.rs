/**
 * Action Endpoints
 *
 * JSON endpoints under `/api`. Auth endpoints run an action against a
 * cookie-backed session store and append whatever Set-Cookie the store
 * buffered, so a successful login and a logout both travel in the same
 * response as their result object. Expected failures (bad credentials, a
 * taken name, a rejected mutation) come back as 200 with the discriminated
 * result object; only a missing session or an unexpected backend failure
 * becomes an HTTP error status.
 */

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::actions::{account, auth, todos as todo_actions, trips as trip_actions, USERS};
use crate::remote::filter::Filter;
use crate::remote::records::{
    ListResult, Locomotive, Priority, Target, UserRecord, UserSummary,
};
use crate::remote::ListQuery;
use crate::server::error::ApiError;
use crate::server::middleware::CurrentSession;
use crate::server::state::AppState;
use crate::session::cookie::CookieSessionStore;

/// Serialize an action result and append the store's buffered Set-Cookie
fn with_session_cookie<T: Serialize>(result: &T, store: &CookieSessionStore) -> Response {
    let mut response = Json(result).into_response();
    if let Some(header) = store.set_cookie_header() {
        response.headers_mut().append(SET_COOKIE, header);
    }
    response
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    mut store: CookieSessionStore,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let result = auth::login(&state.remote(), &mut store, &payload.email, &payload.password).await;
    with_session_cookie(&result, &store)
}

fn default_language() -> String {
    crate::i18n::FALLBACK_LOCALE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl From<RegisterRequest> for auth::RegisterInput {
    fn from(payload: RegisterRequest) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            password_confirm: payload.password_confirm,
            language: payload.language,
        }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    mut store: CookieSessionStore,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    let result = auth::register(&state.remote(), &mut store, &payload.into()).await;
    with_session_cookie(&result, &store)
}

/// POST /api/auth/logout
pub async fn logout(mut store: CookieSessionStore) -> Response {
    let result = auth::logout(&mut store);
    with_session_cookie(&result, &store)
}

/// DELETE /api/account
pub async fn delete_account(
    State(state): State<AppState>,
    mut store: CookieSessionStore,
) -> Response {
    let result = account::delete_account(&state.remote(), &mut store).await;
    with_session_cookie(&result, &store)
}

#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl From<TodoPayload> for todo_actions::TodoInput {
    fn from(payload: TodoPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            priority: payload.priority,
            due_date: payload.due_date,
        }
    }
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<TodoPayload>,
) -> Json<todo_actions::TodoResult> {
    Json(todo_actions::create_todo(&state.remote(), session.as_ref(), &payload.into()).await)
}

/// PATCH /api/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(payload): Json<TodoPayload>,
) -> Json<todo_actions::TodoResult> {
    Json(todo_actions::update_todo(&state.remote(), session.as_ref(), &id, &payload.into()).await)
}

/// POST /api/todos/{id}/toggle
pub async fn toggle_todo(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Json<todo_actions::TodoResult> {
    Json(todo_actions::toggle_todo_complete(&state.remote(), session.as_ref(), &id).await)
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Json<todo_actions::TodoResult> {
    Json(todo_actions::delete_todo(&state.remote(), session.as_ref(), &id).await)
}

#[derive(Debug, Deserialize)]
pub struct TripPayload {
    pub start_datetime: String,
    #[serde(default)]
    pub end_datetime: String,
    /// Operator's user record id
    pub username: String,
    pub target: Target,
    pub station: String,
    pub route: String,
    pub driver: String,
    #[serde(default)]
    pub assistant_driver: Option<String>,
    pub train_number: String,
    pub locomotive: Locomotive,
    pub locomotive_number: String,
}

impl From<TripPayload> for trip_actions::TripInput {
    fn from(payload: TripPayload) -> Self {
        Self {
            start_datetime: payload.start_datetime,
            end_datetime: payload.end_datetime,
            username: payload.username,
            target: payload.target,
            station: payload.station,
            route: payload.route,
            driver: payload.driver,
            assistant_driver: payload.assistant_driver,
            train_number: payload.train_number,
            locomotive: payload.locomotive,
            locomotive_number: payload.locomotive_number,
        }
    }
}

/// POST /api/trips
pub async fn create_trip(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<TripPayload>,
) -> Json<trip_actions::TripResult> {
    Json(trip_actions::create_trip(&state.remote(), session.as_ref(), &payload.into()).await)
}

/// PATCH /api/trips/{id}
pub async fn update_trip(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Json(payload): Json<TripPayload>,
) -> Json<trip_actions::TripResult> {
    Json(trip_actions::update_trip(&state.remote(), session.as_ref(), &id, &payload.into()).await)
}

/// DELETE /api/trips/{id}
pub async fn delete_trip(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Json<trip_actions::TripResult> {
    Json(trip_actions::delete_trip(&state.remote(), session.as_ref(), &id).await)
}

/// GET /api/users
///
/// Operator choices for the trip form.
pub async fn list_users(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ListResult<UserSummary>>, ApiError> {
    let users = trip_actions::get_all_users(&state.remote(), session.as_ref()).await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
pub struct CheckNameQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CheckNameResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

/// GET /api/users/check-name
///
/// Live availability probe behind the registration form. Too-short names
/// are rejected without a backend call, matching the registration action.
pub async fn check_name(
    State(state): State<AppState>,
    Query(query): Query<CheckNameQuery>,
) -> Result<Json<CheckNameResponse>, ApiError> {
    if query.name.chars().count() < auth::MIN_NAME_LENGTH {
        return Ok(Json(CheckNameResponse {
            available: false,
            reason: Some("too_short"),
        }));
    }

    let filter = Filter::eq("name", query.name.as_str());
    let list_query = ListQuery::new().filter(&filter);
    let result = state
        .remote()
        .get_list::<UserRecord>(USERS, 1, 1, &list_query)
        .await
        .map_err(|e| {
            tracing::error!("Name availability check failed: {}", e);
            ApiError::Internal
        })?;

    if result.total_items > 0 {
        Ok(Json(CheckNameResponse {
            available: false,
            reason: Some("taken"),
        }))
    } else {
        Ok(Json(CheckNameResponse {
            available: true,
            reason: None,
        }))
    }
}
