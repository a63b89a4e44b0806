//! List Presentation Logic
//!
//! Pure functions behind the list views. Pages hold the most recently
//! fetched page of records and refine it here for immediate feedback:
//! text search and status narrowing, re-sorting by a selected key, the
//! dashboard statistics, and the sliding pagination window. Changing a
//! server-driven parameter (page, sort, filter) is a navigation concern;
//! nothing in this module talks to the remote data service.

/// Todo refinement, sorting, and statistics
pub mod todos;

/// Trip display helpers
pub mod trips;

/// Sort toggling and the pagination window
pub mod pagination;

/// Locally mutated page cache
pub mod cache;

pub use cache::PageCache;
pub use pagination::{page_window, toggle_sort};
pub use todos::{refine_todos, sort_todos, todo_stats, StatusFilter, TodoStats};
pub use trips::operator_name;
