//! Properties of the filter expression language
//!
//! The rendered query must never let a value terminate its own quoted
//! literal, whatever the input. These run the escaping against arbitrary
//! strings rather than hand-picked injection attempts.

use proptest::prelude::*;
use raildesk::remote::filter::Filter;

/// Reverse the renderer's escaping
fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

proptest! {
    #[test]
    fn quoted_value_roundtrips_through_escaping(term in ".*") {
        let query = Filter::eq("title", term.as_str()).to_query();
        let inner = query
            .strip_prefix("title = \"")
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap();
        prop_assert_eq!(unescape(inner), term);
    }

    #[test]
    fn no_unescaped_quote_inside_literal(term in ".*") {
        let query = Filter::contains("title", term.as_str()).to_query();
        let inner = query
            .strip_prefix("title ~ \"")
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap();

        // Every quote inside the literal must sit behind an odd run of
        // backslashes.
        let mut run = 0usize;
        for c in inner.chars() {
            match c {
                '\\' => run += 1,
                '"' => {
                    prop_assert_eq!(run % 2, 1);
                    run = 0;
                }
                _ => run = 0,
            }
        }
        // A trailing even run means the closing quote is intact.
        prop_assert_eq!(run % 2, 0);
    }

    #[test]
    fn owner_conjunct_stays_in_front(term in ".*") {
        let query = Filter::eq("user", "u1")
            .and(Filter::contains("title", term.as_str()))
            .to_query();
        prop_assert!(query.starts_with("user = \"u1\" && "));
    }
}
