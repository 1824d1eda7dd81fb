//! Request and response payloads for the backend auth endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// Body of `POST /register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCredentials {
    /// Display name of the new principal.
    pub name: String,
    /// Email address, used as the sign-in identifier.
    pub email: String,
    /// Plain-text password; hashing is the backend's job.
    pub password: String,
}

impl RegisterCredentials {
    /// Creates a registration payload.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /signin`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCredentials {
    /// Email address of the principal.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl SignInCredentials {
    /// Creates a sign-in payload.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `POST /signin` response: `{ "user": ..., "token": "..." }`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignInGrant {
    /// The authenticated principal.
    pub user: UserRecord,
    /// The issued bearer token, still raw.
    #[serde(default)]
    pub token: String,
}

impl fmt::Debug for SignInGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInGrant")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sign_in_body_shape() {
        let body = serde_json::to_value(SignInCredentials::new("a@b.com", "secret")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "email": "a@b.com", "password": "secret" })
        );
    }

    #[test]
    fn test_register_debug_hides_password() {
        let creds = RegisterCredentials::new("A", "a@b.com", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn test_grant_parses_backend_shape() {
        let grant: SignInGrant = serde_json::from_str(
            r#"{"user": {"id": 1, "name": "A"}, "token": "tok123"}"#,
        )
        .unwrap();
        assert_eq!(grant.token, "tok123");
        assert_eq!(grant.user.name, "A");
        assert!(!format!("{grant:?}").contains("tok123"));
    }

    #[test]
    fn test_grant_without_token_defaults_empty() {
        let grant: SignInGrant =
            serde_json::from_str(r#"{"user": {"id": "u1", "name": "B"}}"#).unwrap();
        assert!(grant.token.is_empty());
    }
}
