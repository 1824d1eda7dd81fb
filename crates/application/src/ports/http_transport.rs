//! HTTP transport port

use std::future::Future;

use passage_domain::{ApiResponse, RequestConfig};
use thiserror::Error;

/// Errors raised before a response is received.
///
/// Non-2xx responses are not errors at this level; they come back as an
/// [`ApiResponse`] for the caller to classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// URL could not be parsed or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Request timed out.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// The hostname that failed to resolve.
        host: String,
        /// Error message.
        message: String,
    },

    /// Connection was refused.
    #[error("Connection refused: {host}:{port}")]
    ConnectionRefused {
        /// The target host.
        host: String,
        /// The target port.
        port: u16,
    },

    /// Connection failed for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Too many redirects.
    #[error("Too many redirects (max: {max})")]
    TooManyRedirects {
        /// Maximum redirects allowed.
        max: u32,
    },

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a request to the backend.
///
/// Implementations perform exactly one network exchange per call and do not
/// retry.
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    fn send(
        &self,
        request: RequestConfig,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
