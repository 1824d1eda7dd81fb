//! Sign-in use case.

use std::sync::Arc;

use passage_domain::{SignInCredentials, UserRecord};

use crate::auth::{AuthSessionService, AuthStateController};
use crate::error::SessionResult;
use crate::ports::{HttpTransport, TokenStore};

/// Signs in and publishes the new session.
pub struct SignIn<T, S> {
    service: Arc<AuthSessionService<T, S>>,
    state: AuthStateController,
}

impl<T: HttpTransport, S: TokenStore> SignIn<T, S> {
    /// Creates a new `SignIn` use case.
    #[must_use]
    pub const fn new(service: Arc<AuthSessionService<T, S>>, state: AuthStateController) -> Self {
        Self { service, state }
    }

    /// Signs in with `credentials`.
    ///
    /// The credential is persisted before the state flips to authenticated.
    /// On failure the state is left as it was.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`AuthSessionService::sign_in`].
    pub async fn execute(&self, credentials: &SignInCredentials) -> SessionResult<UserRecord> {
        let user = self.service.sign_in(credentials).await?;
        self.state.set_user(user.clone());
        Ok(user)
    }
}
