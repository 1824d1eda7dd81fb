//! Session error types

use thiserror::Error;

use crate::auth::Operation;
use crate::ports::{TokenStoreError, TransportError};

/// Errors surfaced by session operations.
///
/// Backend and transport failures are passed up as they are. Nothing here
/// is retried.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Registration was rejected, e.g. a duplicate email or malformed input.
    #[error("registration rejected ({status}): {message}")]
    Validation {
        /// HTTP status returned by the backend.
        status: u16,
        /// Backend-supplied reason.
        message: String,
    },

    /// Sign-in credentials were not accepted.
    #[error("sign-in rejected ({status}): {message}")]
    Authentication {
        /// HTTP status returned by the backend.
        status: u16,
        /// Backend-supplied reason.
        message: String,
    },

    /// The stored credential was rejected (expired, tampered, revoked, missing).
    #[error("session rejected ({status}): {message}")]
    SessionInvalid {
        /// HTTP status returned by the backend.
        status: u16,
        /// Backend-supplied reason.
        message: String,
    },

    /// The backend failed with a 5xx status.
    #[error("backend error ({status}): {message}")]
    Backend {
        /// HTTP status returned by the backend.
        status: u16,
        /// Backend-supplied reason.
        message: String,
    },

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The credential could not be read, written or removed locally.
    #[error("token store error: {0}")]
    Storage(#[from] TokenStoreError),

    /// The same kind of operation is already waiting on the backend.
    #[error("{0} already in progress")]
    AlreadyInFlight(Operation),
}

impl SessionError {
    /// Returns true if the backend answered and said no.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Authentication { .. } | Self::SessionInvalid { .. }
        )
    }

    /// Returns the HTTP status, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. }
            | Self::Authentication { status, .. }
            | Self::SessionInvalid { status, .. }
            | Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
