//! Sign-out use case.

use std::sync::Arc;

use crate::auth::{AuthSessionService, AuthStateController};
use crate::error::SessionResult;
use crate::ports::{HttpTransport, TokenStore};

/// Forgets the credential and returns the state to anonymous.
pub struct SignOut<T, S> {
    service: Arc<AuthSessionService<T, S>>,
    state: AuthStateController,
}

impl<T: HttpTransport, S: TokenStore> SignOut<T, S> {
    /// Creates a new `SignOut` use case.
    #[must_use]
    pub const fn new(service: Arc<AuthSessionService<T, S>>, state: AuthStateController) -> Self {
        Self { service, state }
    }

    /// Signs out. Safe to call when nobody is signed in.
    ///
    /// The state is cleared even if the credential could not be removed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the store cannot be written.
    pub fn execute(&self) -> SessionResult<()> {
        let removed = self.service.sign_out();
        self.state.clear();
        removed
    }
}
