//! Router Configuration
//!
//! Assembles the full route surface: the locale-prefixed page routes and
//! the `/api` action routes, with the locale/auth middleware layered over
//! everything and request tracing outermost.

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::middleware::locale_auth;
use crate::server::state::AppState;

/// Page handlers returning page models
pub mod pages;

/// Action endpoints under /api
pub mod api;

/// Create the router with all routes configured
pub fn create_router(state: AppState) -> Router<()> {
    let api = Router::new()
        .route("/auth/login", post(api::login))
        .route("/auth/register", post(api::register))
        .route("/auth/logout", post(api::logout))
        .route("/account", delete(api::delete_account))
        .route("/todos", post(api::create_todo))
        .route("/todos/{id}", patch(api::update_todo).delete(api::delete_todo))
        .route("/todos/{id}/toggle", post(api::toggle_todo))
        .route("/trips", post(api::create_trip))
        .route("/trips/{id}", patch(api::update_trip).delete(api::delete_trip))
        .route("/users", get(api::list_users))
        .route("/users/check-name", get(api::check_name));

    let pages = Router::new()
        .route("/{lng}", get(pages::home))
        .route("/{lng}/about", get(pages::about))
        .route("/{lng}/login", get(pages::login))
        .route("/{lng}/register", get(pages::register))
        .route("/{lng}/dashboard", get(pages::dashboard))
        .route("/{lng}/todos", get(pages::todos))
        .route("/{lng}/todos/new", get(pages::todo_new))
        .route("/{lng}/todos/{id}/edit", get(pages::todo_edit))
        .route("/{lng}/trips", get(pages::trips))
        .route("/{lng}/trips/new", get(pages::trip_new))
        .route("/{lng}/trips/{id}/edit", get(pages::trip_edit))
        .route("/{lng}/all-trips", get(pages::all_trips));

    Router::new()
        .nest("/api", api)
        .merge(pages)
        .fallback(|| async { crate::server::error::ApiError::NotFound })
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            locale_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
