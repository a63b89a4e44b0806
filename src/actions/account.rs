//! Account deletion
//!
//! Deletes the caller's own user record and drops the session. Todos and
//! trips created by the account are not cascaded here; the backend owns
//! whatever referential cleanup it is configured for.

use serde::Serialize;

use crate::actions::{authed_client, USERS};
use crate::remote::RemoteClient;
use crate::session::SessionStore;

/// Result of the delete-account action
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteAccountResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Delete the authenticated caller's account
pub async fn delete_account(
    client: &RemoteClient,
    store: &mut dyn SessionStore,
) -> DeleteAccountResult {
    let Some(session) = store.load() else {
        return DeleteAccountResult {
            error: Some("Not authenticated".to_string()),
            ..DeleteAccountResult::default()
        };
    };

    let client = authed_client(client, &session);
    match client.delete(USERS, session.user_id()).await {
        Ok(()) => {
            tracing::info!("Deleted account {}", session.user_id());
            store.clear();
            DeleteAccountResult {
                redirect: Some("/login".to_string()),
                ..DeleteAccountResult::default()
            }
        }
        Err(e) => {
            tracing::error!("Delete account error: {}", e);
            DeleteAccountResult {
                error: Some("Failed to delete account. Please try again.".to_string()),
                ..DeleteAccountResult::default()
            }
        }
    }
}
