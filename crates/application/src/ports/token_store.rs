//! Token store port
//!
//! A synchronous, string-keyed store that survives restarts. The session
//! core only ever uses the single key [`passage_domain::TOKEN_KEY`].

use std::sync::Arc;

/// Errors raised by a token store.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location to persist into could be determined.
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Persistent key/value store for opaque strings.
///
/// Every call is atomic for its key. Ordering across concurrent logical
/// operations is not guaranteed.
pub trait TokenStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError>;

    /// Removes `key`. Removing a key that is not present succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), TokenStoreError>;
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        (**self).remove(key)
    }
}
