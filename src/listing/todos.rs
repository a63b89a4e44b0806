/**
 * Todo Refinement
 *
 * Client-side narrowing and sorting over the fetched page of todos. The
 * same filters exist server-side in the page's query composition; these
 * run on the already-fetched page so a keystroke in the search box does
 * not cost a round trip.
 *
 * Priority sorts through a fixed precedence table (low < medium < high),
 * reversed as a table lookup for descending. Due-date sorts put undated
 * todos last ascending and first descending.
 */

use serde::Serialize;

use crate::remote::records::{parse_datetime, TodoRecord};

/// Completion-status narrowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// Parse the `filter` query parameter; anything unrecognized means all
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("active") => StatusFilter::Active,
            Some("completed") => StatusFilter::Completed,
            _ => StatusFilter::All,
        }
    }

    fn matches(self, todo: &TodoRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

/// Narrow a page of todos by search term and completion status
///
/// The search is a case-insensitive substring match over title and
/// description; an empty term matches everything.
pub fn refine_todos(todos: &[TodoRecord], search: &str, status: StatusFilter) -> Vec<TodoRecord> {
    let term = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| {
            let matches_search = term.is_empty()
                || todo.title.to_lowercase().contains(&term)
                || todo.description.to_lowercase().contains(&term);
            matches_search && status.matches(todo)
        })
        .cloned()
        .collect()
}

/// Re-sort a page of todos by the selected key
///
/// Keys follow the backend's `field` / `-field` form; unknown keys fall
/// back to newest-first.
pub fn sort_todos(todos: &mut [TodoRecord], sort: Option<&str>) {
    match sort.unwrap_or("-created") {
        "title" => todos.sort_by(|a, b| a.title.cmp(&b.title)),
        "-title" => todos.sort_by(|a, b| b.title.cmp(&a.title)),
        "priority" => todos.sort_by_key(|todo| todo.priority.rank()),
        "-priority" => todos.sort_by_key(|todo| std::cmp::Reverse(todo.priority.rank())),
        "due_date" => todos.sort_by(|a, b| due_date_asc(a, b)),
        "-due_date" => todos.sort_by(|a, b| due_date_asc(b, a)),
        "created" => todos.sort_by(|a, b| parse_datetime(&a.created).cmp(&parse_datetime(&b.created))),
        _ => todos.sort_by(|a, b| parse_datetime(&b.created).cmp(&parse_datetime(&a.created))),
    }
}

/// Ascending due-date order with undated todos sorting last
fn due_date_asc(a: &TodoRecord, b: &TodoRecord) -> std::cmp::Ordering {
    match (parse_datetime(&a.due_date), parse_datetime(&b.due_date)) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Dashboard statistics over the caller's todos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: u64,
    pub active: u64,
    pub completed: u64,
    /// Not completed, dated, and past due as of the given instant
    pub overdue: u64,
}

impl TodoStats {
    /// Completed share in percent, rounded; zero todos counts as zero
    pub fn completion_rate(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

/// Compute stats over a fetched page of todos
///
/// `total` comes from the list envelope so it reflects all of the caller's
/// todos, while the breakdown counts the fetched page.
pub fn todo_stats(
    todos: &[TodoRecord],
    total: u64,
    now: chrono::DateTime<chrono::Utc>,
) -> TodoStats {
    let completed = todos.iter().filter(|todo| todo.completed).count() as u64;
    let overdue = todos
        .iter()
        .filter(|todo| {
            !todo.completed
                && parse_datetime(&todo.due_date).is_some_and(|due| due < now)
        })
        .count() as u64;

    TodoStats {
        total,
        active: todos.len() as u64 - completed,
        completed,
        overdue,
    }
}
