//! Session state for the current process.
//!
//! The authenticated flag and the user record are one value, so a session
//! can never claim to be authenticated without a user.

use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// Who, if anyone, is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum Session {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// A user is signed in.
    Authenticated(UserRecord),
}

impl Session {
    /// Builds a session from an optional user.
    #[must_use]
    pub fn from_user(user: Option<UserRecord>) -> Self {
        user.map_or(Self::Anonymous, Self::Authenticated)
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Returns the flat `{ authenticated, user }` view of this session.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            authenticated: self.is_authenticated(),
            user: self.user().cloned(),
        }
    }
}

/// Flat projection of a [`Session`].
///
/// Only constructed from a `Session`, so `authenticated` implies `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AuthState {
    authenticated: bool,
    user: Option<UserRecord>,
}

impl AuthState {
    /// Whether a user is signed in.
    #[must_use]
    pub const fn authenticated(&self) -> bool {
        self.authenticated
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }
}

impl From<&Session> for AuthState {
    fn from(session: &Session) -> Self {
        session.auth_state()
    }
}
