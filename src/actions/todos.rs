/**
 * Todo Actions
 *
 * CRUD over the caller's todos. Every list and single read is scoped to
 * the caller: lists get a `user = <id>` conjunct injected in front of any
 * page-supplied filter, and single reads compare the fetched record's
 * owner against the session.
 *
 * The completion toggle is a read followed by a write. Two concurrent
 * toggles of the same todo can race and the last write wins; the backend
 * offers no conditional update to close that window.
 */

use serde::Serialize;

use crate::actions::{authed_client, check_owner, require_session, ActionError, TODOS};
use crate::remote::filter::Filter;
use crate::remote::records::{ListResult, Priority, TodoRecord};
use crate::remote::{ListQuery, RemoteClient};
use crate::session::Session;

/// Page size for todo lists; the page is refined client-side, not re-paged
pub const TODOS_PER_PAGE: u32 = 50;

/// Default sort for todo lists
pub const DEFAULT_TODO_SORT: &str = "-created";

/// Result of a todo mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<TodoRecord>,
}

impl TodoResult {
    fn success(todo: Option<TodoRecord>) -> Self {
        Self {
            success: Some(true),
            todo,
            ..Self::default()
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    fn not_authenticated() -> Self {
        Self::error("Not authenticated")
    }
}

/// Todo form input
#[derive(Debug, Clone, Default)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
    /// Defaults to medium when the form sends nothing
    pub priority: Option<Priority>,
    /// Date string from the form; empty or absent means no due date
    pub due_date: Option<String>,
}

impl TodoInput {
    fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    fn due_date(&self) -> &str {
        self.due_date.as_deref().unwrap_or("")
    }
}

/// Create a todo owned by the caller
pub async fn create_todo(
    client: &RemoteClient,
    session: Option<&Session>,
    input: &TodoInput,
) -> TodoResult {
    let Ok(session) = require_session(session) else {
        return TodoResult::not_authenticated();
    };

    let body = serde_json::json!({
        "title": input.title,
        "description": input.description,
        "priority": input.priority(),
        "due_date": input.due_date(),
        "completed": false,
        "user": session.user_id(),
    });

    match authed_client(client, session)
        .create::<TodoRecord, _>(TODOS, &body)
        .await
    {
        Ok(todo) => TodoResult::success(Some(todo)),
        Err(e) => {
            tracing::error!("Create todo error: {}", e);
            TodoResult::error(mutation_message(e, "Failed to create todo"))
        }
    }
}

/// Update a todo's editable fields
///
/// The payload never carries `user` or `completed`: ownership is fixed at
/// creation and completion changes only through the toggle.
pub async fn update_todo(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
    input: &TodoInput,
) -> TodoResult {
    let Ok(session) = require_session(session) else {
        return TodoResult::not_authenticated();
    };

    let body = serde_json::json!({
        "title": input.title,
        "description": input.description,
        "priority": input.priority(),
        "due_date": input.due_date(),
    });

    match authed_client(client, session)
        .update::<TodoRecord, _>(TODOS, id, &body)
        .await
    {
        Ok(todo) => TodoResult::success(Some(todo)),
        Err(e) => {
            tracing::error!("Update todo error: {}", e);
            TodoResult::error(mutation_message(e, "Failed to update todo"))
        }
    }
}

/// Flip a todo's completion flag
pub async fn toggle_todo_complete(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
) -> TodoResult {
    let Ok(session) = require_session(session) else {
        return TodoResult::not_authenticated();
    };
    let client = authed_client(client, session);

    let current = match client.get_one::<TodoRecord>(TODOS, id, None).await {
        Ok(todo) => todo,
        Err(e) => {
            tracing::error!("Toggle todo error: {}", e);
            return TodoResult::error(mutation_message(e, "Failed to toggle todo"));
        }
    };

    let body = serde_json::json!({ "completed": !current.completed });
    match client.update::<TodoRecord, _>(TODOS, id, &body).await {
        Ok(todo) => TodoResult::success(Some(todo)),
        Err(e) => {
            tracing::error!("Toggle todo error: {}", e);
            TodoResult::error(mutation_message(e, "Failed to toggle todo"))
        }
    }
}

/// Delete a todo
pub async fn delete_todo(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
) -> TodoResult {
    let Ok(session) = require_session(session) else {
        return TodoResult::not_authenticated();
    };

    match authed_client(client, session).delete(TODOS, id).await {
        Ok(()) => TodoResult::success(None),
        Err(e) => {
            tracing::error!("Delete todo error: {}", e);
            TodoResult::error(mutation_message(e, "Failed to delete todo"))
        }
    }
}

/// List the caller's todos
///
/// The owner conjunct always comes first; a page-supplied filter is ANDed
/// behind it and can only narrow the result further.
pub async fn get_todos(
    client: &RemoteClient,
    session: Option<&Session>,
    filter: Option<Filter>,
    sort: Option<&str>,
) -> Result<ListResult<TodoRecord>, ActionError> {
    let session = require_session(session)?;

    let mut scoped = Filter::eq("user", session.user_id());
    if let Some(extra) = filter {
        scoped = scoped.and(extra);
    }

    let query = ListQuery::new()
        .filter(&scoped)
        .sort(sort.unwrap_or(DEFAULT_TODO_SORT));
    let todos = authed_client(client, session)
        .get_list(TODOS, 1, TODOS_PER_PAGE, &query)
        .await?;
    Ok(todos)
}

/// Fetch one of the caller's todos
pub async fn get_todo(
    client: &RemoteClient,
    session: Option<&Session>,
    id: &str,
) -> Result<TodoRecord, ActionError> {
    let session = require_session(session)?;
    let todo: TodoRecord = authed_client(client, session)
        .get_one(TODOS, id, None)
        .await?;
    check_owner(&todo.user, session)?;
    Ok(todo)
}

/// Backend message for expected rejections, fixed fallback otherwise
fn mutation_message(error: crate::remote::error::RemoteError, fallback: &str) -> String {
    match error {
        crate::remote::error::RemoteError::Response { message, .. } => message,
        _ => fallback.to_string(),
    }
}
