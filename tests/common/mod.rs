//! Shared test utilities
//!
//! Session/token helpers and the mocked remote data service the
//! integration tests run against.

pub mod auth_helpers;
pub mod mock_server;
