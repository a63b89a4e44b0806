//! Remote Data Service Client
//!
//! Thin async client over the backend's records and auth endpoints. One
//! instance is cheap to build per request: it shares the process-wide
//! `reqwest::Client` connection pool and only adds the base URL plus an
//! optional session token.

use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::remote::error::{ErrorBody, RemoteError};
use crate::remote::filter::Filter;
use crate::remote::records::{AuthResponse, ListResult};

/// Options for list requests
///
/// Mirrors the backend's query parameters. The filter is rendered from a
/// [`Filter`] expression at the point it is set, so no call site can pass
/// an unescaped string.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filter: Option<String>,
    sort: Option<String>,
    expand: Option<String>,
    fields: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the result set
    pub fn filter(mut self, filter: &Filter) -> Self {
        self.filter = Some(filter.to_query());
        self
    }

    /// Sort key in the backend's `field` / `-field` form
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Relations to inline into the records
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Comma-separated field projection
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    fn params(&self, page: u32, per_page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(filter) = &self.filter {
            params.push(("filter", filter.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(expand) = &self.expand {
            params.push(("expand", expand.clone()));
        }
        if let Some(fields) = &self.fields {
            params.push(("fields", fields.clone()));
        }
        params
    }
}

/// Client for the remote data service
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            token: None,
        }
    }

    /// Bind a session token; all subsequent calls authenticate with it
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticate with an identity (email) and password
    pub async fn auth_with_password(
        &self,
        identity: &str,
        password: &str,
    ) -> Result<AuthResponse, RemoteError> {
        let url = format!("{}/api/collections/users/auth-with-password", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "identity": identity,
                "password": password,
            }))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Re-validate the bound token and obtain a fresh one
    pub async fn auth_refresh(&self) -> Result<AuthResponse, RemoteError> {
        let url = format!("{}/api/collections/users/auth-refresh", self.base_url);
        let response = self.apply_auth(self.client.post(&url)).send().await?;
        Self::parse(response).await
    }

    /// Fetch one page of a collection
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        query: &ListQuery,
    ) -> Result<ListResult<T>, RemoteError> {
        let request = self
            .client
            .get(self.collection_url(collection))
            .query(&query.params(page, per_page));
        let response = self.apply_auth(request).send().await?;
        Self::parse(response).await
    }

    /// Fetch a single record by id
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        expand: Option<&str>,
    ) -> Result<T, RemoteError> {
        let mut request = self.client.get(self.record_url(collection, id));
        if let Some(expand) = expand {
            request = request.query(&[("expand", expand)]);
        }
        let response = self.apply_auth(request).send().await?;
        Self::parse(response).await
    }

    /// Create a record
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let request = self.client.post(self.collection_url(collection)).json(body);
        let response = self.apply_auth(request).send().await?;
        Self::parse(response).await
    }

    /// Partially update a record
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let request = self.client.patch(self.record_url(collection, id)).json(body);
        let response = self.apply_auth(request).send().await?;
        Self::parse(response).await
    }

    /// Delete a record
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), RemoteError> {
        let request = self.client.delete(self.record_url(collection, id));
        let response = self.apply_auth(request).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        Ok(())
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{}/records", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/api/collections/{}/records/{}",
            self.base_url,
            collection,
            urlencoding::encode(id)
        )
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            // The backend expects the bare token, no "Bearer" prefix.
            Some(token) => request.header(header::AUTHORIZATION, token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn error_from(response: Response) -> RemoteError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = if parsed.message.is_empty() {
            format!("Request failed: {}", status)
        } else {
            parsed.message
        };
        tracing::debug!("Remote service error {}: {}", status, message);
        RemoteError::Response {
            status: status.as_u16(),
            message,
            data: parsed.data,
        }
    }
}
