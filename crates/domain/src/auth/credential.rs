//! Opaque bearer credential.

use std::fmt;

use crate::error::{DomainError, DomainResult};

/// The single key the credential is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Scheme prefix used in the `authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// A backend-issued bearer token.
///
/// The value is opaque: no structure or expiry is assumed. `Debug` is
/// redacted and there is no `Display`; the raw value only leaves this type
/// through [`Credential::expose`] or [`Credential::authorization_value`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCredential` if the token is empty or
    /// only whitespace.
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidCredential("token is empty"));
        }
        Ok(Self(value))
    }

    /// Returns the raw token, exactly as issued.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Formats the value for the `authorization` header: `Bearer <token>`.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("{BEARER_SCHEME} {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
