//! Session management.
//!
//! This module provides:
//! - `AuthSessionService`, wrapping the backend register / sign-in /
//!   check-session endpoints and owning credential persistence
//! - `AuthStateController`, the reactive holder of the current `Session`
//! - In-flight de-duplication keyed on operation kind

mod in_flight;
mod service;
mod state;

pub use in_flight::{InFlight, InFlightGuard, Operation};
pub use service::{AuthEndpoints, AuthSessionService};
pub use state::AuthStateController;
