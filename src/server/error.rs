/**
 * Server Error Responses
 *
 * The error type page and API handlers return for failures that do map to
 * HTTP statuses. Expected action failures (bad credentials, taken name)
 * never pass through here; they travel inside the action result objects.
 * What remains is the small set of terminal cases: no session where one
 * is required, a record that does not exist for this caller, and anything
 * unexpected, which is logged and collapsed to a generic message.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::actions::ActionError;

/// Errors surfaced as HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session was presented where one is required
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The record does not exist, or belongs to another user
    #[error("Not found")]
    NotFound,

    /// Anything unexpected; details are logged, not sent to the client
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ActionError> for ApiError {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::NotAuthenticated => Self::NotAuthenticated,
            ActionError::Remote(remote) if remote.is_not_found() => Self::NotFound,
            ActionError::Remote(remote) => {
                tracing::error!("Remote service error: {}", remote);
                Self::Internal
            }
        }
    }
}
