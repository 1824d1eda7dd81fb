//! The authenticated principal as reported by the backend.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend identifier for a user. Tutorial backends hand out either
/// integers or strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric identifier, e.g. an auto-increment key.
    Numeric(i64),
    /// String identifier, e.g. a UUID or document id.
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::Numeric(i64::from(id))
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Backend-supplied user record.
///
/// Fields beyond `id`, `name` and `email` are kept verbatim in `extra` so a
/// record round-trips without loss.
///
/// The identifier is read from `id`, falling back to `_id`. When a backend
/// sends both, `id` wins and `_id` stays in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecordWire")]
pub struct UserRecord {
    /// Backend identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Any other fields the backend returned.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Wire shape of a [`UserRecord`] before the identifier is settled.
#[derive(Deserialize)]
struct UserRecordWire {
    #[serde(default)]
    id: Option<UserId>,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<UserRecordWire> for UserRecord {
    type Error = String;

    fn try_from(wire: UserRecordWire) -> Result<Self, Self::Error> {
        let UserRecordWire {
            id,
            name,
            email,
            mut extra,
        } = wire;
        let id = match id {
            Some(id) => id,
            None => {
                let raw = extra
                    .remove("_id")
                    .ok_or_else(|| "missing field `id`".to_string())?;
                serde_json::from_value(raw).map_err(|e| format!("invalid `_id`: {e}"))?
            }
        };
        Ok(Self {
            id,
            name,
            email,
            extra,
        })
    }
}

impl UserRecord {
    /// Creates a record with no email and no extra fields.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_and_text_ids() {
        let numeric: UserRecord = serde_json::from_str(r#"{"id": 1, "name": "A"}"#).unwrap();
        assert_eq!(numeric.id, UserId::Numeric(1));

        let text: UserRecord =
            serde_json::from_str(r#"{"_id": "65f0", "name": "B", "email": "b@c.com"}"#).unwrap();
        assert_eq!(text.id, UserId::Text("65f0".to_string()));
        assert_eq!(text.email.as_deref(), Some("b@c.com"));
        assert!(text.extra.is_empty());
    }

    #[test]
    fn test_id_and_underscore_id_together() {
        let record: UserRecord = serde_json::from_str(
            r#"{"_id": "65f0", "id": "65f0", "name": "A", "email": "a@b.com"}"#,
        )
        .unwrap();

        assert_eq!(record.id, UserId::Text("65f0".to_string()));
        assert_eq!(record.extra.get("_id"), Some(&serde_json::json!("65f0")));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<UserRecord, _> = serde_json::from_str(r#"{"name": "A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let record: UserRecord =
            serde_json::from_str(r#"{"id": 7, "name": "C", "role": "admin"}"#).unwrap();
        assert_eq!(record.extra.get("role"), Some(&serde_json::json!("admin")));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["role"], "admin");
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::from(42).to_string(), "42");
        assert_eq!(UserId::from("abc").to_string(), "abc");
    }
}
