//! Session client wiring.

use std::sync::Arc;

use anyhow::Context;
use passage_application::{
    ApiClient, AuthSessionService, AuthStateController, BearerInterceptor, BootstrapOutcome,
    BootstrapSession, HttpTransport, SessionResult, SignIn, SignOut, TokenStore,
};
use passage_domain::{RegisterCredentials, Session, SignInCredentials, UserRecord};
use passage_infrastructure::{ClientConfig, FileTokenStore, ReqwestTransport};

/// Everything one process needs to hold a session against one backend.
///
/// Bootstrap is wired in but not run; call [`SessionClient::bootstrap`] once
/// at start-up.
pub struct SessionClient<T = ReqwestTransport, S = FileTokenStore> {
    service: Arc<AuthSessionService<T, S>>,
    state: AuthStateController,
    bootstrap: BootstrapSession<T, S>,
}

impl SessionClient {
    /// Builds a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the HTTP client cannot be
    /// built, or no token store location can be determined.
    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url()?;
        let store = config
            .token_store(&base_url)
            .context("failed to open token store")?;
        tracing::debug!(path = %store.path().display(), "using token store");
        let transport = ReqwestTransport::new(base_url, config.timeout_ms, &config.user_agent)
            .context("failed to build HTTP transport")?;
        Ok(Self::new(transport, Arc::new(store), config))
    }
}

impl<T: HttpTransport, S: TokenStore> SessionClient<T, S> {
    /// Wires the session core over `transport` and `store`.
    pub fn new(transport: T, store: Arc<S>, config: &ClientConfig) -> Self {
        let service = Arc::new(AuthSessionService::with_endpoints(
            transport,
            store,
            config.endpoints.clone(),
        ));
        let state = AuthStateController::new();
        let bootstrap = BootstrapSession::new(Arc::clone(&service), state.clone())
            .with_policy(config.stale_token_policy);
        Self {
            service,
            state,
            bootstrap,
        }
    }

    /// Restores the stored session. Later calls return
    /// [`BootstrapOutcome::AlreadyRan`].
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.bootstrap.execute().await
    }

    /// Creates an account. The session is left as it was.
    ///
    /// # Errors
    ///
    /// See [`AuthSessionService::register`].
    pub async fn register(&self, credentials: &RegisterCredentials) -> SessionResult<()> {
        self.service.register(credentials).await
    }

    /// Signs in and publishes the session.
    ///
    /// # Errors
    ///
    /// See [`AuthSessionService::sign_in`].
    pub async fn sign_in(&self, credentials: &SignInCredentials) -> SessionResult<UserRecord> {
        SignIn::new(Arc::clone(&self.service), self.state.clone())
            .execute(credentials)
            .await
    }

    /// Forgets the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored credential could not be removed.
    pub fn sign_out(&self) -> SessionResult<()> {
        SignOut::new(Arc::clone(&self.service), self.state.clone()).execute()
    }

    /// Current session snapshot.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.session()
    }

    /// Session state controller, for subscribing to changes.
    #[must_use]
    pub const fn state(&self) -> &AuthStateController {
        &self.state
    }

    /// Request pipeline with the bearer interceptor registered.
    #[must_use]
    pub fn api(&self) -> &ApiClient<T, BearerInterceptor<S>> {
        self.service.client()
    }

    /// The auth session service.
    #[must_use]
    pub fn service(&self) -> &AuthSessionService<T, S> {
        &self.service
    }
}
