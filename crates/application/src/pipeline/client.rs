//! Intercepted API client.

use passage_domain::{ApiResponse, RequestConfig};
use serde::Serialize;

use super::RequestInterceptor;
use crate::ports::{HttpTransport, TransportError};

/// HTTP client with an interceptor registered at construction.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryTokenStore::new());
/// let client = ApiClient::new(transport, BearerInterceptor::new(store));
/// let response = client.get("/checksession").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient<T, I> {
    transport: T,
    interceptor: I,
}

impl<T: HttpTransport, I: RequestInterceptor> ApiClient<T, I> {
    /// Creates a client sending through `transport` with `interceptor`.
    pub const fn new(transport: T, interceptor: I) -> Self {
        Self {
            transport,
            interceptor,
        }
    }

    /// Returns the registered interceptor.
    pub const fn interceptor(&self) -> &I {
        &self.interceptor
    }

    /// Sends a request through the pipeline.
    ///
    /// The request stage runs once, before the transport. Transport
    /// failures go through the error stage and are returned as it leaves
    /// them.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if no response was received.
    pub async fn send(&self, config: RequestConfig) -> Result<ApiResponse, TransportError> {
        let config = self.interceptor.on_request(config);
        let request_id = config.id;
        let method = config.method;
        tracing::debug!(%request_id, %method, url = %config.url, "sending request");

        match self.transport.send(config).await {
            Ok(response) => {
                tracing::debug!(
                    %request_id,
                    status = response.status,
                    elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                    "response received"
                );
                Ok(self.interceptor.on_response(response))
            }
            Err(error) => {
                tracing::debug!(%request_id, %error, "request failed");
                Err(self.interceptor.on_request_error(error))
            }
        }
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if no response was received.
    pub async fn get(&self, url: &str) -> Result<ApiResponse, TransportError> {
        self.send(RequestConfig::get(url)).await
    }

    /// Sends a POST request with `body` encoded as JSON.
    ///
    /// An encoding failure is routed through the error stage and the
    /// transport is never called.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidBody` if `body` cannot be encoded, or
    /// any transport failure.
    pub async fn post<B>(&self, url: &str, body: &B) -> Result<ApiResponse, TransportError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                return Err(self
                    .interceptor
                    .on_request_error(TransportError::InvalidBody(e.to_string())));
            }
        };
        self.send(RequestConfig::post_json(url, body)).await
    }
}
