/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * The state is deliberately small: the configuration and one process-wide
 * `reqwest::Client`. The client holds the connection pool; per-request
 * `RemoteClient` values are cheap wrappers over it that add the base URL
 * and the caller's token.
 */

use axum::extract::FromRef;

use crate::config::AppConfig;
use crate::remote::RemoteClient;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Environment-driven configuration
    pub config: AppConfig,
    /// Shared HTTP connection pool for remote data service calls
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Unauthenticated client bound to the configured remote service
    pub fn remote(&self) -> RemoteClient {
        RemoteClient::new(&self.config.remote_url, self.http.clone())
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for reqwest::Client {
    fn from_ref(state: &AppState) -> Self {
        state.http.clone()
    }
}
