//! Properties of the list navigation helpers

use proptest::prelude::*;
use raildesk::listing::{page_window, toggle_sort};

proptest! {
    #[test]
    fn window_is_contiguous_in_bounds_and_contains_current(
        total in 1u32..500,
        offset in 0u32..500,
    ) {
        let current = 1 + offset % total;
        let window = page_window(current, total);

        prop_assert!(!window.is_empty());
        prop_assert!(window.len() <= 5);
        prop_assert!(window.contains(&current));
        prop_assert!(*window.first().unwrap() >= 1);
        prop_assert!(*window.last().unwrap() <= total);
        for pair in window.windows(2) {
            prop_assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn toggling_twice_restores_ascending(field in "[a-z_]{1,20}") {
        let once = toggle_sort(None, &field);
        prop_assert_eq!(&once, &field);
        let twice = toggle_sort(Some(&once), &field);
        prop_assert_eq!(&twice, &format!("-{}", field));
        let thrice = toggle_sort(Some(&twice), &field);
        prop_assert_eq!(thrice, field);
    }
}
