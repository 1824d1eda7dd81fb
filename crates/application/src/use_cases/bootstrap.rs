//! Session bootstrap use case.
//!
//! Runs once at application start: if a credential was left behind by a
//! previous run, ask the backend whether it is still good and restore the
//! session from the answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use passage_domain::{TOKEN_KEY, UserRecord};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthSessionService, AuthStateController};
use crate::error::SessionError;
use crate::ports::{HttpTransport, TokenStore};

/// What to do with a stored credential the backend has rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleTokenPolicy {
    /// Remove it, so the next start goes straight to sign-in.
    #[default]
    Clear,
    /// Leave it; the next start checks it again.
    Keep,
}

/// Result of a bootstrap run. Bootstrap never fails outward.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// No credential was stored; no request was made.
    NoStoredToken,
    /// The stored credential was accepted.
    Restored(UserRecord),
    /// The session check failed; the state is anonymous.
    Rejected {
        /// Why the check failed.
        error: SessionError,
        /// Whether the stored credential was removed.
        cleared: bool,
    },
    /// Bootstrap had already run on this instance.
    AlreadyRan,
}

impl BootstrapOutcome {
    /// The restored user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Restored(user) => Some(user),
            _ => None,
        }
    }
}

/// One-shot session restoration.
pub struct BootstrapSession<T, S> {
    service: Arc<AuthSessionService<T, S>>,
    state: AuthStateController,
    policy: StaleTokenPolicy,
    ran: AtomicBool,
}

impl<T: HttpTransport, S: TokenStore> BootstrapSession<T, S> {
    /// Creates the use case with the default [`StaleTokenPolicy`].
    #[must_use]
    pub const fn new(service: Arc<AuthSessionService<T, S>>, state: AuthStateController) -> Self {
        Self {
            service,
            state,
            policy: StaleTokenPolicy::Clear,
            ran: AtomicBool::new(false),
        }
    }

    /// Sets what happens to a rejected credential.
    #[must_use]
    pub const fn with_policy(mut self, policy: StaleTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restores the session from the stored credential.
    ///
    /// - Nothing stored: no request, state stays anonymous.
    /// - Backend accepts: state becomes authenticated with the returned user.
    /// - Anything else: the error is logged and returned in the outcome, and
    ///   the state is anonymous.
    ///
    /// Only the first call does any work.
    pub async fn execute(&self) -> BootstrapOutcome {
        if self.ran.swap(true, Ordering::AcqRel) {
            tracing::debug!("bootstrap already ran; ignoring");
            return BootstrapOutcome::AlreadyRan;
        }

        let stored = match self.service.store().get(TOKEN_KEY) {
            Ok(stored) => stored.filter(|token| !token.trim().is_empty()),
            Err(error) => {
                tracing::warn!(%error, "could not read stored credential; starting signed out");
                None
            }
        };
        if stored.is_none() {
            tracing::debug!("no stored credential; skipping session check");
            return BootstrapOutcome::NoStoredToken;
        }

        match self.service.check_session().await {
            Ok(user) => {
                self.state.set_user(user.clone());
                BootstrapOutcome::Restored(user)
            }
            Err(error) => {
                self.state.clear();
                let cleared = self.discard_if_stale(&error);
                tracing::warn!(%error, cleared, "stored session could not be restored");
                BootstrapOutcome::Rejected { error, cleared }
            }
        }
    }

    /// Removes the credential when the backend rejected it and the policy
    /// says so. Outages and 5xx responses never clear it.
    fn discard_if_stale(&self, error: &SessionError) -> bool {
        if self.policy != StaleTokenPolicy::Clear
            || !matches!(error, SessionError::SessionInvalid { .. })
        {
            return false;
        }
        match self.service.sign_out() {
            Ok(()) => true,
            Err(remove_error) => {
                tracing::warn!(error = %remove_error, "could not remove rejected credential");
                false
            }
        }
    }
}
