//! Request interceptors.

use std::sync::Arc;

use passage_domain::request::AUTHORIZATION;
use passage_domain::{ApiResponse, Credential, RequestConfig, TOKEN_KEY};

use crate::ports::{TokenStore, TransportError};

/// Hook run around every request sent through an [`ApiClient`].
///
/// Interceptors must not retry, write state, or fail a request on their own.
///
/// [`ApiClient`]: super::ApiClient
pub trait RequestInterceptor: Send + Sync {
    /// Transforms the request before it is sent.
    fn on_request(&self, config: RequestConfig) -> RequestConfig;

    /// Sees a failure raised while building or sending a request.
    /// The default passes it through unchanged.
    fn on_request_error(&self, error: TransportError) -> TransportError {
        error
    }

    /// Sees a received response. The default passes it through unchanged.
    fn on_response(&self, response: ApiResponse) -> ApiResponse {
        response
    }
}

/// Interceptor that leaves everything untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RequestInterceptor for PassThrough {
    fn on_request(&self, config: RequestConfig) -> RequestConfig {
        config
    }
}

/// Sets `authorization: Bearer <token>` when a credential is given.
///
/// Only the authorization header is written; every other caller header is
/// kept as is. Without a credential the request is returned unchanged.
#[must_use]
pub fn attach_bearer(mut config: RequestConfig, credential: Option<&Credential>) -> RequestConfig {
    if let Some(credential) = credential {
        config
            .headers
            .set(AUTHORIZATION, credential.authorization_value());
    }
    config
}

/// Attaches the stored credential to every outgoing request.
#[derive(Debug)]
pub struct BearerInterceptor<S> {
    store: Arc<S>,
}

impl<S> Clone for BearerInterceptor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TokenStore> BearerInterceptor<S> {
    /// Creates an interceptor reading from `store`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Reads the current credential. Read failures count as "no credential".
    fn current_credential(&self) -> Option<Credential> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(raw)) => Credential::new(raw).ok(),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "token store unreadable; sending request without credential");
                None
            }
        }
    }
}

impl<S: TokenStore> RequestInterceptor for BearerInterceptor<S> {
    fn on_request(&self, config: RequestConfig) -> RequestConfig {
        let credential = self.current_credential();
        tracing::trace!(
            request_id = %config.id,
            with_credential = credential.is_some(),
            "intercepting request"
        );
        attach_bearer(config, credential.as_ref())
    }
}
