//! Outbound request descriptor.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Header, Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// A request as it travels through the interceptor pipeline.
///
/// `url` is either a path relative to the configured base URL
/// (`/checksession`) or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Correlation id for logs. Not sent to the backend.
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Target path or absolute URL
    pub url: String,
    /// Caller-supplied headers
    #[serde(default)]
    pub headers: Headers,
    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl RequestConfig {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request carrying `body` as JSON.
    #[must_use]
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Post, url).with_body(body)
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolves `url` against `base`. Absolute URLs are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the result is not a valid URL.
    pub fn resolve(&self, base: &Url) -> DomainResult<Url> {
        if let Ok(absolute) = Url::parse(&self.url) {
            return Ok(absolute);
        }
        base.join(&self.url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))
    }
}
