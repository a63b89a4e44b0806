/**
 * Authentication Actions
 *
 * Login, registration, and logout. Login failures collapse to a single
 * message so the response does not reveal whether the email exists.
 * Registration pre-checks name and email uniqueness with two list queries;
 * those checks are point-in-time, and the window between them and the
 * create call is closed only by the backend's own uniqueness constraint.
 */

use serde::Serialize;

use crate::actions::USERS;
use crate::remote::error::RemoteError;
use crate::remote::filter::Filter;
use crate::remote::records::UserRecord;
use crate::remote::{ListQuery, RemoteClient};
use crate::session::{Session, SessionStore};

/// Minimum display name length, checked before any backend call
pub const MIN_NAME_LENGTH: usize = 4;

/// Result of an authentication action
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthActionResult {
    /// Path the client should navigate to on success (locale added client-side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Single user-facing error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl AuthActionResult {
    pub fn redirect(path: &str) -> Self {
        Self {
            redirect: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn errors(messages: Vec<String>) -> Self {
        Self {
            errors: Some(messages),
            ..Self::default()
        }
    }
}

/// Registration form input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    /// Preferred UI language, stored on the user record
    pub language: String,
}

/// Authenticate with email and password
///
/// On success the session is saved to the store and the caller is sent to
/// the dashboard. Any backend rejection maps to the same fixed message.
pub async fn login(
    client: &RemoteClient,
    store: &mut dyn SessionStore,
    email: &str,
    password: &str,
) -> AuthActionResult {
    match client.auth_with_password(email, password).await {
        Ok(auth) => {
            store.save(&Session::new(auth.token, auth.record));
            AuthActionResult::redirect("/dashboard")
        }
        Err(RemoteError::Response { status, .. }) => {
            tracing::warn!("Login rejected for {}: status {}", email, status);
            AuthActionResult::error("Invalid email or password")
        }
        Err(e) => {
            tracing::error!("Login error: {}", e);
            AuthActionResult::error("An unexpected error occurred")
        }
    }
}

/// Register a new account and log it in
pub async fn register(
    client: &RemoteClient,
    store: &mut dyn SessionStore,
    input: &RegisterInput,
) -> AuthActionResult {
    if input.name.chars().count() < MIN_NAME_LENGTH {
        return AuthActionResult::errors(vec![
            "Name must be at least 4 characters long".to_string(),
        ]);
    }

    let name_taken = match exists(client, Filter::eq("name", input.name.as_str())).await {
        Ok(taken) => taken,
        Err(e) => return register_failure(e),
    };
    if name_taken {
        return AuthActionResult::errors(vec!["This name is already taken".to_string()]);
    }

    let email_taken = match exists(client, Filter::eq("email", input.email.as_str())).await {
        Ok(taken) => taken,
        Err(e) => return register_failure(e),
    };
    if email_taken {
        return AuthActionResult::errors(vec!["This email is already registered".to_string()]);
    }

    let body = serde_json::json!({
        "name": input.name,
        "email": input.email,
        "password": input.password,
        "passwordConfirm": input.password_confirm,
        "language": input.language,
    });
    if let Err(e) = client.create::<UserRecord, _>(USERS, &body).await {
        return register_failure(e);
    }

    // Log the fresh account in so the client lands on the dashboard with a
    // session already set.
    match client
        .auth_with_password(&input.email, &input.password)
        .await
    {
        Ok(auth) => {
            store.save(&Session::new(auth.token, auth.record));
            tracing::info!("Registered new user: {}", input.name);
            AuthActionResult::redirect("/dashboard")
        }
        Err(e) => register_failure(e),
    }
}

/// Drop the caller's session
pub fn logout(store: &mut dyn SessionStore) -> AuthActionResult {
    store.clear();
    AuthActionResult::redirect("/login")
}

/// Whether any user record matches the filter
async fn exists(client: &RemoteClient, filter: Filter) -> Result<bool, RemoteError> {
    let query = ListQuery::new().filter(&filter);
    let result = client.get_list::<UserRecord>(USERS, 1, 1, &query).await?;
    Ok(result.total_items > 0)
}

/// Map a registration failure to user-facing messages
///
/// Recognized field error codes get fixed strings; anything else surfaces
/// the backend's own message for that field, then the top-level message,
/// then a generic fallback.
fn register_failure(error: RemoteError) -> AuthActionResult {
    tracing::error!("Registration error: {}", error);

    if let Some(fields) = error.field_errors() {
        let mut messages = Vec::new();
        for (field, detail) in fields {
            if detail.code == "validation_not_unique" {
                match field.as_str() {
                    "name" => messages.push("This name is already taken".to_string()),
                    "email" => messages.push("This email is already registered".to_string()),
                    _ => {}
                }
            } else if !detail.message.is_empty() {
                messages.push(detail.message.clone());
            }
        }
        if !messages.is_empty() {
            return AuthActionResult::errors(messages);
        }
    }

    let message = error.message();
    if !message.is_empty() {
        return AuthActionResult::errors(vec![message]);
    }
    AuthActionResult::errors(vec!["Registration failed. Please try again.".to_string()])
}
