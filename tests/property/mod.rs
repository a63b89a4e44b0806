//! Property tests

mod filter_proptest;
mod listing_proptest;
