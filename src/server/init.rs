//! App construction
//!
//! Router assembly split from `main` so tests can build the exact
//! application the binary serves and point it at a mock backend.

use axum::Router;

use crate::config::AppConfig;
use crate::server::routes::create_router;
use crate::server::state::AppState;

/// Build the application router from environment configuration
pub async fn create_app() -> Router {
    create_app_with_config(AppConfig::from_env())
}

/// Build the application router for a known configuration
pub fn create_app_with_config(config: AppConfig) -> Router {
    create_router(AppState::new(config))
}
