//! Passage Application - Session core and ports
//!
//! This crate defines the application layer with:
//! - Port traits for the token store and the HTTP transport
//! - The intercepted request pipeline
//! - The auth session service and the session state controller
//! - Use cases for bootstrap, sign-in and sign-out

pub mod auth;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use auth::{AuthEndpoints, AuthSessionService, AuthStateController, InFlight, Operation};
pub use error::{SessionError, SessionResult};
pub use pipeline::{ApiClient, BearerInterceptor, PassThrough, RequestInterceptor, attach_bearer};
pub use ports::{HttpTransport, TokenStore, TokenStoreError, TransportError};
pub use use_cases::{BootstrapOutcome, BootstrapSession, SignIn, SignOut, StaleTokenPolicy};
