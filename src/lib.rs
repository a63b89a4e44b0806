//! Raildesk - Main Library
//!
//! Raildesk is a localized web application for managing personal task lists
//! and train trip logs. All persistent data lives in a hosted record-storage
//! backend (the remote data service); this crate owns the HTTP server in
//! front of it: locale-aware routing, cookie sessions, server actions, and
//! the list presentation logic the pages consume.
//!
//! # Overview
//!
//! This library provides the core functionality for Raildesk, including:
//! - User registration, login, logout and account deletion
//! - Per-user CRUD over todo and trip records with filtering and sorting
//! - A read-only cross-user trips overview with pagination
//! - Locale-prefixed routes with a guarded dashboard area
//! - A typed client for the remote data service's records API
//!
//! # Module Structure
//!
//! The library is organized into focused modules:
//!
//! - **`config`** - Environment-driven application configuration
//! - **`i18n`** - Supported locales and locale path handling
//! - **`remote`** - Remote data service client, records, filters, errors
//! - **`session`** - Cookie-backed session store and token validity
//! - **`actions`** - Server actions (auth, account, todos, trips)
//! - **`listing`** - List refinement, sorting, pagination, page cache
//! - **`server`** - Axum server state, middleware, routes
//!
//! # Usage
//!
//! ```rust,no_run
//! use raildesk::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with Axum server
//! # }
//! ```
//!
//! # Error Handling
//!
//! The library uses Rust's standard error handling:
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `remote::error`, `config`, and `server::error`
//! - Server actions report expected failures inside their result objects
//!   rather than as HTTP errors

/// Application configuration
pub mod config;

/// Locale constants and path helpers
pub mod i18n;

/// Remote data service client and record types
pub mod remote;

/// Cookie session store
pub mod session;

/// Server actions
pub mod actions;

/// List presentation logic
pub mod listing;

/// Axum server (state, middleware, routes)
pub mod server;
