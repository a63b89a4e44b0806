//! Sort toggling and the pagination window
//!
//! Both views of the same navigation rule: clicking a column toggles its
//! sort direction, and the pager shows a sliding window of at most five
//! page numbers around the current page.

/// Maximum number of page buttons shown at once
pub const WINDOW_SIZE: u32 = 5;

/// Next sort key after clicking a column header
///
/// Clicking a new column sorts it ascending; clicking the current column
/// flips direction (`f -> -f -> f`).
pub fn toggle_sort(current: Option<&str>, field: &str) -> String {
    let descending = format!("-{}", field);
    match current {
        Some(sort) if sort == field => descending,
        Some(sort) if sort == descending => field.to_string(),
        _ => field.to_string(),
    }
}

/// Page numbers to display for the pager
///
/// A window of at most [`WINDOW_SIZE`] pages centered on the current page.
/// Within the first or last two pages the window anchors to the boundary
/// instead of centering, so it never runs past the sequence.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= WINDOW_SIZE {
        return (1..=total_pages).collect();
    }

    let first = if current <= 3 {
        1
    } else if current >= total_pages - 2 {
        total_pages - (WINDOW_SIZE - 1)
    } else {
        current - 2
    };
    (first..first + WINDOW_SIZE).collect()
}
