//! HTTP Server
//!
//! The axum server in front of the remote data service. Locale-prefixed
//! page routes return page models as JSON; `/api/...` routes carry the
//! mutating server actions. A single middleware handles the locale prefix
//! and the protected-route auth gate for every page request.

/// Application state
pub mod state;

/// Server-side error responses
pub mod error;

/// Locale and auth gate middleware
pub mod middleware;

/// Router assembly
pub mod routes;

/// App construction
pub mod init;

pub use error::ApiError;
pub use init::create_app;
pub use state::AppState;
