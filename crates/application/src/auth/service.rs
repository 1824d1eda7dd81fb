//! Auth session service.
//!
//! Thin wrappers over the backend auth endpoints. Each call issues a single
//! request; sign-in additionally persists the issued credential before it
//! returns, so the next request made by the caller is already authenticated.

use std::sync::Arc;

use passage_domain::{
    ApiResponse, Credential, RegisterCredentials, SignInCredentials, SignInGrant, TOKEN_KEY,
    UserRecord,
};
use serde::{Deserialize, Serialize};

use super::{InFlight, InFlightGuard, Operation};
use crate::error::{SessionError, SessionResult};
use crate::pipeline::{ApiClient, BearerInterceptor};
use crate::ports::{HttpTransport, TokenStore};

/// Paths of the backend auth endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEndpoints {
    /// Account creation, `POST`.
    pub register: String,
    /// Credential verification, `POST`.
    pub sign_in: String,
    /// Token validation, `GET`.
    pub check_session: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            register: "/register".to_string(),
            sign_in: "/signin".to_string(),
            check_session: "/checksession".to_string(),
        }
    }
}

/// Register, sign-in and session check against the backend.
///
/// Generic over the transport and the token store so tests can swap in
/// fakes for both.
pub struct AuthSessionService<T, S> {
    client: ApiClient<T, BearerInterceptor<S>>,
    store: Arc<S>,
    endpoints: AuthEndpoints,
    in_flight: InFlight,
}

impl<T: HttpTransport, S: TokenStore> AuthSessionService<T, S> {
    /// Creates a service using the default endpoint paths.
    pub fn new(transport: T, store: Arc<S>) -> Self {
        Self::with_endpoints(transport, store, AuthEndpoints::default())
    }

    /// Creates a service with custom endpoint paths.
    pub fn with_endpoints(transport: T, store: Arc<S>, endpoints: AuthEndpoints) -> Self {
        let interceptor = BearerInterceptor::new(Arc::clone(&store));
        Self {
            client: ApiClient::new(transport, interceptor),
            store,
            endpoints,
            in_flight: InFlight::new(),
        }
    }

    /// The intercepted client, for calls to any other protected endpoint.
    pub const fn client(&self) -> &ApiClient<T, BearerInterceptor<S>> {
        &self.client
    }

    /// The token store the credential is kept in.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The configured endpoint paths.
    pub const fn endpoints(&self) -> &AuthEndpoints {
        &self.endpoints
    }

    /// Returns true if `operation` is waiting on the backend.
    pub fn is_in_flight(&self, operation: Operation) -> bool {
        self.in_flight.is_active(operation)
    }

    /// Creates an account.
    ///
    /// No credential is stored: a freshly registered user still has to
    /// sign in.
    ///
    /// # Errors
    ///
    /// - `SessionError::Validation` if the backend rejects the input
    /// - `SessionError::Backend` on a 5xx status
    /// - `SessionError::Transport` if the backend is unreachable
    /// - `SessionError::AlreadyInFlight` if a registration is already running
    pub async fn register(&self, credentials: &RegisterCredentials) -> SessionResult<()> {
        let _guard = self.begin(Operation::Register)?;
        let response = self
            .client
            .post(&self.endpoints.register, credentials)
            .await?;

        if !response.is_success() {
            return Err(rejection(Operation::Register, &response));
        }
        tracing::info!(email = %credentials.email, "account registered");
        Ok(())
    }

    /// Verifies credentials and persists the issued token.
    ///
    /// The token is written under [`TOKEN_KEY`] before this returns.
    ///
    /// # Errors
    ///
    /// - `SessionError::Authentication` if the credentials are rejected
    /// - `SessionError::UnexpectedResponse` if the success body lacks a user
    ///   or a token
    /// - `SessionError::Storage` if the token could not be persisted; the
    ///   user is not returned in that case
    /// - `SessionError::Backend`, `Transport` or `AlreadyInFlight` as for
    ///   [`register`](Self::register)
    pub async fn sign_in(&self, credentials: &SignInCredentials) -> SessionResult<UserRecord> {
        let _guard = self.begin(Operation::SignIn)?;
        let response = self
            .client
            .post(&self.endpoints.sign_in, credentials)
            .await?;

        if !response.is_success() {
            return Err(rejection(Operation::SignIn, &response));
        }

        let grant: SignInGrant = response
            .json()
            .map_err(|e| SessionError::UnexpectedResponse(format!("sign-in body: {e}")))?;
        let credential = Credential::new(grant.token).map_err(|_| {
            SessionError::UnexpectedResponse("sign-in response carried no token".to_string())
        })?;

        self.store.set(TOKEN_KEY, credential.expose())?;
        tracing::info!(user_id = %grant.user.id, "signed in, credential persisted");
        Ok(grant.user)
    }

    /// Asks the backend who the attached credential belongs to.
    ///
    /// Does not check for a local credential first and does not clear the
    /// store on failure; both are up to the caller.
    ///
    /// # Errors
    ///
    /// - `SessionError::SessionInvalid` if the credential is missing,
    ///   expired or otherwise rejected
    /// - `SessionError::UnexpectedResponse` if the success body is not a user
    /// - `SessionError::Backend`, `Transport` or `AlreadyInFlight` as for
    ///   [`register`](Self::register)
    pub async fn check_session(&self) -> SessionResult<UserRecord> {
        let _guard = self.begin(Operation::CheckSession)?;
        let response = self.client.get(&self.endpoints.check_session).await?;

        if !response.is_success() {
            return Err(rejection(Operation::CheckSession, &response));
        }

        let user: UserRecord = response
            .json()
            .map_err(|e| SessionError::UnexpectedResponse(format!("check-session body: {e}")))?;
        tracing::debug!(user_id = %user.id, "session confirmed by backend");
        Ok(user)
    }

    /// Forgets the stored credential. Succeeds when none is stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the store cannot be written.
    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("credential removed");
        Ok(())
    }

    fn begin(&self, operation: Operation) -> SessionResult<InFlightGuard> {
        self.in_flight.try_begin(operation).ok_or_else(|| {
            tracing::warn!(%operation, "duplicate call refused while one is in flight");
            SessionError::AlreadyInFlight(operation)
        })
    }
}

/// Maps a non-2xx response to the error for `operation`.
fn rejection(operation: Operation, response: &ApiResponse) -> SessionError {
    let status = response.status;
    let message = response.error_message();
    tracing::debug!(%operation, status, "backend rejected request");

    if response.is_server_error() {
        return SessionError::Backend { status, message };
    }
    match operation {
        Operation::Register => SessionError::Validation { status, message },
        Operation::SignIn => SessionError::Authentication { status, message },
        Operation::CheckSession => SessionError::SessionInvalid { status, message },
    }
}
