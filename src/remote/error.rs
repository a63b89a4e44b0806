/**
 * Remote Service Error Types
 *
 * This module defines the error type for calls to the remote data service.
 * A failed call is either a transport problem, an undecodable body, or a
 * structured error response from the backend carrying a status code, a
 * message, and optional per-field validation details.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation detail from the backend
///
/// The backend reports create/update validation failures as a map of field
/// name to `{code, message}`, e.g. `validation_not_unique` on `name` when
/// the display name is already taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Wire shape of the backend's error body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    // BTreeMap keeps field iteration order stable when mapping these into
    // user-facing error lists.
    #[serde(default)]
    pub data: BTreeMap<String, FieldError>,
}

/// Errors from the remote data service client
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend answered with an error status
    #[error("{message}")]
    Response {
        status: u16,
        message: String,
        data: BTreeMap<String, FieldError>,
    },
}

impl RemoteError {
    /// HTTP status of a backend error response, `None` for transport and
    /// decode failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the record as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Human-readable error message
    pub fn message(&self) -> String {
        match self {
            Self::Response { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Per-field validation details, when the backend sent any
    pub fn field_errors(&self) -> Option<&BTreeMap<String, FieldError>> {
        match self {
            Self::Response { data, .. } if !data.is_empty() => Some(data),
            _ => None,
        }
    }

    /// Synthesized missing-record error
    ///
    /// Used when a record exists but belongs to another user; callers see
    /// the same error the backend would produce for an id that does not
    /// exist, so ownership is not observable.
    pub(crate) fn not_found() -> Self {
        Self::Response {
            status: 404,
            message: "The requested resource wasn't found.".to_string(),
            data: BTreeMap::new(),
        }
    }
}
