//! Protected-view gate.
//!
//! The gate is a pure function of the current [`Session`]. Callers must
//! compute it from live state on every render and never store the result.

use crate::session::Session;
use crate::user::UserRecord;

/// Path the fallback view points the user at.
pub const SIGN_IN_PATH: &str = "/signin";

/// What a protected view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectedView<'a> {
    /// Render the protected content for this user.
    Protected(&'a UserRecord),
    /// Render a prompt that navigates to the sign-in view.
    SignInRequired {
        /// Navigation target for the prompt.
        sign_in_path: &'static str,
    },
}

impl ProtectedView<'_> {
    /// Returns true if the protected content may be shown.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Protected(_))
    }
}

/// Decides what a protected view renders for `session`.
#[must_use]
pub const fn gate(session: &Session) -> ProtectedView<'_> {
    match session {
        Session::Authenticated(user) => ProtectedView::Protected(user),
        Session::Anonymous => ProtectedView::SignInRequired {
            sign_in_path: SIGN_IN_PATH,
        },
    }
}
