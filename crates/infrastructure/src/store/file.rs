//! File-backed token store.
//!
//! Values for one origin live in a single JSON document:
//! ```json
//! {
//!   "schema_version": 1,
//!   "values": {
//!     "token": "eyJhbGciOi..."
//!   }
//! }
//! ```
//! Every write replaces the whole document through a temp file in the same
//! directory followed by a rename, so readers never see a partial file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use passage_application::ports::{TokenStore, TokenStoreError};
use url::Url;

use super::document::StoreDocument;

const STORE_FILE: &str = "store.json";
const APP_DIR: &str = "passage";

/// Durable token store scoped to one backend origin.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Opens a store backed by the file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Opens the store for `origin` in the platform's local data directory.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError::NoDataDir` if the platform has none.
    pub fn for_origin(origin: &Url) -> Result<Self, TokenStoreError> {
        let base = dirs::data_local_dir().ok_or(TokenStoreError::NoDataDir)?;
        Ok(Self::at(
            base.join(APP_DIR).join(origin_slug(origin)).join(STORE_FILE),
        ))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument, TokenStoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(e) => return Err(e.into()),
        };
        StoreDocument::decode(&bytes)
    }

    /// Loads the document a write starts from. A document that no longer
    /// parses is replaced rather than blocking every later write; the flag
    /// reports that it was.
    fn load_for_write(&self) -> Result<(StoreDocument, bool), TokenStoreError> {
        match self.load() {
            Ok(document) => Ok((document, false)),
            Err(TokenStoreError::Serialization(error)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "token store unreadable; starting from an empty document"
                );
                Ok((StoreDocument::default(), true))
            }
            Err(error) => Err(error),
        }
    }

    fn save(&self, document: &StoreDocument) -> Result<(), TokenStoreError> {
        let content = document.encode()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        // NamedTempFile is created with mode 0600 on Unix; rename keeps it.
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.values.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock();
        let (mut document, _) = self.load_for_write()?;
        document.values.insert(key.to_string(), value.to_string());
        self.save(&document)?;
        tracing::debug!(path = %self.path.display(), key, "token store updated");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock();
        let (mut document, recovered) = self.load_for_write()?;
        if document.values.remove(key).is_none() && !recovered {
            return Ok(());
        }
        self.save(&document)?;
        tracing::debug!(path = %self.path.display(), key, "token store entry removed");
        Ok(())
    }
}

/// Directory-safe name for the origin of `url`, e.g. `https-api.example.com-443`.
#[must_use]
pub fn origin_slug(url: &Url) -> String {
    let host = url.host_str().unwrap_or("local");
    let host: String = host
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    match url.port_or_known_default() {
        Some(port) => format!("{}-{host}-{port}", url.scheme()),
        None => format!("{}-{host}", url.scheme()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::at(dir.path().join("nested").join(STORE_FILE))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("token").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_token_survives_reopen() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set("token", "tok123").unwrap();

        let reopened = store_in(&dir);

        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("tok123"));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("token", "one").unwrap();
        store.set("token", "two").unwrap();

        assert_eq!(store.get("token").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_remove_leaves_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("token", "tok").unwrap();

        store.remove("token").unwrap();
        store.remove("token").unwrap();

        assert_eq!(store.get("token").unwrap(), None);
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{\n  \"schema_version\": 1,\n  \"values\": {}\n}\n");
    }

    #[test]
    fn test_remove_without_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.remove("token").is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), b"not json").unwrap();

        assert!(matches!(
            store.get("token"),
            Err(TokenStoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_writes_replace_a_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        std::fs::write(store.path(), b"{ truncated").unwrap();
        store.set("token", "fresh").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("fresh"));

        std::fs::write(store.path(), b"{ truncated").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_private_on_unix() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("token", "tok").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_origin_slug() {
        let url = Url::parse("https://api.example.com/v1/").unwrap();
        assert_eq!(origin_slug(&url), "https-api.example.com-443");

        let url = Url::parse("http://127.0.0.1:3000").unwrap();
        assert_eq!(origin_slug(&url), "http-127.0.0.1-3000");
    }

    #[test]
    fn test_origins_do_not_share_a_file() {
        let a = Url::parse("http://localhost:3000").unwrap();
        let b = Url::parse("http://localhost:4000").unwrap();
        assert_ne!(origin_slug(&a), origin_slug(&b));
    }
}
