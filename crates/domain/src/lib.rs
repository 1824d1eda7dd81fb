//! Passage Domain - Core session types
//!
//! This crate defines the domain model for the Passage session client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod gate;
pub mod request;
pub mod response;
pub mod session;
pub mod user;

pub use auth::{
    BEARER_SCHEME, Credential, RegisterCredentials, SignInCredentials, SignInGrant, TOKEN_KEY,
};
pub use error::{DomainError, DomainResult};
pub use gate::{ProtectedView, SIGN_IN_PATH, gate};
pub use request::{AUTHORIZATION, Header, Headers, HttpMethod, RequestConfig};
pub use response::ApiResponse;
pub use session::{AuthState, Session};
pub use user::{UserId, UserRecord};
