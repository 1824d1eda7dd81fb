//! On-disk shape of the file token store.

use std::collections::BTreeMap;

use passage_application::ports::TokenStoreError;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

const SCHEMA_VERSION: u32 = 1;

/// Versioned key/value document, one per origin.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            values: BTreeMap::new(),
        }
    }
}

impl StoreDocument {
    /// Parses a document written by [`StoreDocument::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, TokenStoreError> {
        serde_json::from_slice(bytes).map_err(|e| TokenStoreError::Serialization(e.to_string()))
    }

    /// Pretty JSON, 2-space indent, keys sorted, trailing newline.
    pub fn encode(&self) -> Result<Vec<u8>, TokenStoreError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}
