//! Server Actions
//!
//! Each action is a single request/response unit invoked from a route
//! handler: it checks that a session is present where one is required,
//! composes the remote query through the filter builder, and maps backend
//! failures into a small result shape the UI can render directly.
//!
//! Expected failures (bad credentials, taken name, missing record) never
//! surface as HTTP errors; they come back inside the result object. Only
//! the list/get actions return `Result`, and their callers degrade a
//! failure to an empty page rather than an error page.

use thiserror::Error;

use crate::remote::error::RemoteError;
use crate::remote::RemoteClient;
use crate::session::Session;

/// Authentication actions (login, register, logout)
pub mod auth;

/// Account deletion
pub mod account;

/// Todo CRUD and listing
pub mod todos;

/// Trip CRUD, listing, and the cross-user views
pub mod trips;

/// Collection names on the remote data service
pub(crate) const USERS: &str = "users";
pub(crate) const TODOS: &str = "todos";
pub(crate) const TRIPS: &str = "trips";

/// Failure of a read action
#[derive(Debug, Error)]
pub enum ActionError {
    /// No session was presented
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The remote data service rejected or failed the call
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ActionError {
    /// Whether the failure means the record does not exist for this caller
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(remote) if remote.is_not_found())
    }
}

/// Resolve the caller's session or fail with `NotAuthenticated`
pub(crate) fn require_session(session: Option<&Session>) -> Result<&Session, ActionError> {
    session.ok_or(ActionError::NotAuthenticated)
}

/// Clone the client with the session's token bound
pub(crate) fn authed_client(client: &RemoteClient, session: &Session) -> RemoteClient {
    client.clone().with_token(&session.token)
}

/// Enforce that a fetched record belongs to the caller
///
/// The backend's single-record GET has no filter parameter, so ownership is
/// checked after the fetch. A record owned by someone else is reported as
/// missing, indistinguishable from an id that does not exist.
pub(crate) fn check_owner(owner: &str, session: &Session) -> Result<(), ActionError> {
    if owner == session.user_id() {
        Ok(())
    } else {
        Err(ActionError::Remote(RemoteError::not_found()))
    }
}
