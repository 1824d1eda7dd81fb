//! Client configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `passage.toml` in the working directory (optional), or an explicit file
//! 3. `PASSAGE_*` environment variables, `__` separating nested keys
//!    (e.g. `PASSAGE_ENDPOINTS__SIGN_IN=/login`)
//!
//! Command-line flags are applied on top by the binary, which then calls
//! [`ClientConfig::validate`] once on the merged result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use passage_application::ports::TokenStoreError;
use passage_application::{AuthEndpoints, StaleTokenPolicy};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::FileTokenStore;

const DEFAULT_FILE: &str = "passage.toml";
const ENV_PREFIX: &str = "PASSAGE";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The backend base URL is unusable.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A zero timeout would fail every request.
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Settings for talking to one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are resolved against it.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Token store file. Defaults to a per-origin file in the data directory.
    pub store_path: Option<PathBuf>,
    /// What bootstrap does with a credential the backend rejects.
    pub stale_token_policy: StaleTokenPolicy,
    /// Auth endpoint paths.
    pub endpoints: AuthEndpoints,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_ms: 30_000,
            user_agent: format!("passage/{}", env!("CARGO_PKG_VERSION")),
            store_path: None,
            stale_token_policy: StaleTokenPolicy::default(),
            endpoints: AuthEndpoints::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    ///
    /// `file` replaces the optional `passage.toml` lookup; when given it must
    /// exist. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is missing or malformed.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Like [`ClientConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is missing or malformed.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_FILE, FileFormat::Toml).required(false),
        };

        let loaded = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// Checks the values that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-http(s) base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless the value is an absolute
    /// http(s) URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Opens the token store for `origin`, or the explicit `store_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no store location can be determined.
    pub fn token_store(&self, origin: &Url) -> Result<FileTokenStore, TokenStoreError> {
        match &self.store_path {
            Some(path) => Ok(FileTokenStore::at(path)),
            None => FileTokenStore::for_origin(origin),
        }
    }
}
