//! Terminal rendering of the protected-view gate.

use passage_application::{BootstrapOutcome, SessionError};
use passage_domain::{ProtectedView, UserRecord};

/// One line describing what a protected view shows.
#[must_use]
pub fn gate_line(view: &ProtectedView<'_>) -> String {
    match view {
        ProtectedView::Protected(user) => format!("signed in as {}", who(user)),
        ProtectedView::SignInRequired { sign_in_path } => {
            format!("not signed in; sign in first ({sign_in_path})")
        }
    }
}

/// Short note on how bootstrap went, when there is something to say.
#[must_use]
pub fn bootstrap_note(outcome: &BootstrapOutcome) -> Option<String> {
    match outcome {
        BootstrapOutcome::Rejected { error, cleared } => Some(rejected_note(error, *cleared)),
        _ => None,
    }
}

fn rejected_note(error: &SessionError, cleared: bool) -> String {
    if !error.is_rejection() {
        return format!("could not check stored session, kept for next time: {error}");
    }
    let status = error
        .status()
        .map_or_else(String::new, |status| format!(" ({status})"));
    if cleared {
        format!("stored session was rejected{status} and has been removed: {error}")
    } else {
        format!("stored session was rejected{status}: {error}")
    }
}

fn who(user: &UserRecord) -> String {
    match &user.email {
        Some(email) => format!("{} <{email}> (id {})", user.name, user.id),
        None => format!("{} (id {})", user.name, user.id),
    }
}
