//! Reactive holder of the current session.

use std::sync::Arc;

use passage_domain::{AuthState, Session, UserRecord};
use tokio::sync::watch;

/// Owns the current [`Session`] and notifies subscribers on every change.
///
/// Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct AuthStateController {
    tx: Arc<watch::Sender<Session>>,
}

impl AuthStateController {
    /// Creates a controller in the anonymous state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::Anonymous);
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the session: `Some(user)` signs in, `None` signs out.
    pub fn set_session(&self, user: Option<UserRecord>) {
        let next = Session::from_user(user);
        match next.user() {
            Some(user) => tracing::info!(user_id = %user.id, "session authenticated"),
            None => tracing::info!("session cleared"),
        }
        self.tx.send_replace(next);
    }

    /// Marks `user` as signed in.
    pub fn set_user(&self, user: UserRecord) {
        self.set_session(Some(user));
    }

    /// Sets the authenticated flag on its own.
    ///
    /// `false` signs out. `true` only holds if a user is already present;
    /// otherwise the request is refused and the state stays anonymous.
    /// Returns the resulting flag.
    pub fn set_authenticated(&self, authenticated: bool) -> bool {
        if !authenticated {
            self.clear();
            return false;
        }
        let present = self.tx.borrow().is_authenticated();
        if !present {
            tracing::warn!("refusing to mark session authenticated without a user");
        }
        present
    }

    /// Returns to the anonymous state.
    pub fn clear(&self) {
        self.set_session(None);
    }

    /// A snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// A snapshot of the current `{ authenticated, user }` view.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.tx.borrow().auth_state()
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}

impl Default for AuthStateController {
    fn default() -> Self {
        Self::new()
    }
}
