//! Test doubles shared by the unit tests in this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use passage_domain::{ApiResponse, RequestConfig, TOKEN_KEY};
use tokio::sync::Notify;

use crate::ports::{HttpTransport, TokenStore, TokenStoreError, TransportError};

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }

    pub fn token(&self) -> Option<String> {
        self.values.lock().get(TOKEN_KEY).cloned()
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Store whose every operation fails.
#[derive(Debug, Default)]
pub struct BrokenStore;

impl TokenStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, TokenStoreError> {
        Err(TokenStoreError::Io(std::io::Error::other("disk on fire")))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::Io(std::io::Error::other("disk on fire")))
    }

    fn remove(&self, _key: &str) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::Io(std::io::Error::other("disk on fire")))
    }
}

#[derive(Default)]
struct ScriptState {
    script: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    sent: Mutex<Vec<RequestConfig>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

/// Transport replaying canned results in order and recording what was sent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<ScriptState>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.state
            .script
            .lock()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.state.script.lock().push_back(Err(error));
        self
    }

    /// Makes every send wait for `gate` before answering.
    pub fn held_by(self, gate: Arc<Notify>) -> Self {
        *self.state.hold.lock() = Some(gate);
        self
    }

    pub fn sent(&self) -> Vec<RequestConfig> {
        self.state.sent.lock().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: RequestConfig) -> Result<ApiResponse, TransportError> {
        self.state.sent.lock().push(request);
        let hold = self.state.hold.lock().clone();
        if let Some(gate) = hold {
            gate.notified().await;
        }
        self.state
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}
