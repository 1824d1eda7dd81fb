//! Backend response as seen by the session client.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::request::Headers;

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body as text
    pub body: String,
    /// Time from send to last body byte
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Default::default()
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Extracts a human-readable error message.
    ///
    /// Looks for `message`, then `error`, in a JSON object body, then falls
    /// back to the trimmed raw body, then to a generic status line.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&self.body) {
            for key in ["message", "error"] {
                if let Some(serde_json::Value::String(message)) = map.get(key) {
                    return message.clone();
                }
            }
        }
        let raw = self.body.trim();
        if raw.is_empty() {
            format!("request failed with status {}", self.status)
        } else {
            raw.to_string()
        }
    }
}
