//! In-flight de-duplication for session operations.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Kinds of backend session call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /register`
    Register,
    /// `POST /signin`
    SignIn,
    /// `GET /checksession`
    CheckSession,
}

impl Operation {
    /// Returns a stable lowercase name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::SignIn => "sign-in",
            Self::CheckSession => "check-session",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of operations currently waiting on the backend.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<Operation>>>,
}

impl InFlight {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `operation` as started.
    ///
    /// Returns `None` if the same kind is already running. The mark is
    /// released when the returned guard drops, including when the owning
    /// future is dropped mid-flight.
    #[must_use]
    pub fn try_begin(&self, operation: Operation) -> Option<InFlightGuard> {
        if self.active.lock().insert(operation) {
            Some(InFlightGuard {
                active: Arc::clone(&self.active),
                operation,
            })
        } else {
            None
        }
    }

    /// Returns true if `operation` is running.
    #[must_use]
    pub fn is_active(&self, operation: Operation) -> bool {
        self.active.lock().contains(&operation)
    }
}

/// Releases an [`InFlight`] mark on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<Operation>>>,
    operation: Operation,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.lock().remove(&self.operation);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_of_same_kind_is_refused() {
        let in_flight = InFlight::new();
        let guard = in_flight.try_begin(Operation::SignIn).unwrap();
        assert!(in_flight.try_begin(Operation::SignIn).is_none());
        assert!(in_flight.is_active(Operation::SignIn));
        drop(guard);
        assert!(!in_flight.is_active(Operation::SignIn));
        assert!(in_flight.try_begin(Operation::SignIn).is_some());
    }

    #[test]
    fn test_different_kinds_do_not_block_each_other() {
        let in_flight = InFlight::new();
        let _sign_in = in_flight.try_begin(Operation::SignIn).unwrap();
        assert!(in_flight.try_begin(Operation::Register).is_some());
    }
}
