//! Remote Data Service Module
//!
//! Everything the application knows about the hosted record-storage backend
//! lives here: the wire types for its records and list envelopes, the
//! filter expression builder for its query language, the error type its
//! failures map into, and the reqwest-backed client that talks to it.
//!
//! # Architecture
//!
//! - **`records`** - Record and envelope types (users, todos, trips)
//! - **`filter`** - Escaped filter expression builder
//! - **`error`** - `RemoteError` and the backend's field error payloads
//! - **`client`** - `RemoteClient` over the records and auth endpoints
//!
//! All list and single-record reads issued on behalf of a user carry an
//! owner restriction built through `filter`; the client itself never
//! invents scoping, it sends exactly what the caller composed.

/// Record and list envelope types
pub mod records;

/// Filter expression builder
pub mod filter;

/// Remote service error types
pub mod error;

/// HTTP client for the remote data service
pub mod client;

// Re-export commonly used types
pub use client::{ListQuery, RemoteClient};
pub use error::{FieldError, RemoteError};
pub use filter::Filter;
pub use records::{
    AuthResponse, ListResult, Locomotive, Priority, Target, TodoRecord, TripRecord, UserRecord,
    UserSummary,
};
