//! Authentication domain types
//!
//! This module provides:
//! - The opaque bearer `Credential` and the key it is persisted under
//! - Request payloads for registration and sign-in

mod credential;
mod payload;

pub use credential::{BEARER_SCHEME, Credential, TOKEN_KEY};
pub use payload::{RegisterCredentials, SignInCredentials, SignInGrant};
