//! Authenticated HTTP transport for the Todoist Unified API
//!
//! Every call is a single request/response exchange: no retries, no
//! backoff. Non-success statuses surface as [`Error::ApiError`] with the raw
//! body attached so callers can decide what a given status means.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Todoist Unified API base URL
pub const TODOIST_BASE_URL: &str = "https://api.todoist.com/api/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Todoist API client
///
/// Immutable after construction; clones share the underlying connection pool
/// and can be used from many tasks at once.
#[derive(Clone)]
pub struct TodoistClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for TodoistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoistClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for TodoistClient
#[derive(Default)]
pub struct TodoistClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    http_client: Option<HttpClient>,
}

impl TodoistClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API token
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (defaults to the Unified API)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout in seconds
    ///
    /// Ignored when a preconfigured HTTP client is supplied.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Use a preconfigured reqwest client
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the TodoistClient
    pub fn build(self) -> Result<TodoistClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingToken)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .timeout(Duration::from_secs(
                    self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
                ))
                .build()
                .map_err(Error::NetworkError)?,
        };

        let base_url = self
            .base_url
            .unwrap_or_else(|| TODOIST_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(TodoistClient {
            http_client,
            api_key,
            base_url,
        })
    }
}

/// A fully buffered API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Decode the buffered body as JSON
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| Error::DecodeError {
            source,
            body: self.body.clone(),
        })
    }
}

impl TodoistClient {
    /// Create a new client with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        TodoistClientBuilder::new().api_key(api_key).build()
    }

    /// Create a new builder
    pub fn builder() -> TodoistClientBuilder {
        TodoistClientBuilder::new()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client.request(method, self.url(path))
    }

    /// Send a request with authentication and JSON headers attached.
    ///
    /// Statuses outside `[200, 400)` are returned as [`Error::ApiError`].
    pub async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        if self.api_key.is_empty() {
            return Err(Error::MissingToken);
        }

        let request = request
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .build()
            .map_err(Error::NetworkError)?;

        debug!(url = %request.url(), method = %request.method(), "Sending request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(Error::NetworkError)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(Error::NetworkError)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(status, body = %body, "Response");

        if !(200..400).contains(&status) {
            return Err(Error::ApiError { status, body });
        }

        Ok(RawResponse { status, body })
    }

    /// Send a request and decode the response body as JSON
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request).await?.decode()
    }
}
