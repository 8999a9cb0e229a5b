//! JSON-file-backed credential store.
//!
//! Persists the named values as a flat JSON object, rewritten on every
//! mutation. The file is small (five keys) so full rewrites are fine.

use apibridge_types::{ApiError, CredentialStore, error::Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A [`CredentialStore`] persisted to a JSON file.
pub struct FileCredentialStore {
    path: PathBuf,
    /// In-process cache; the file is the source of truth at startup only.
    data: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Opens (or creates) the store at `path`, loading any existing values.
    ///
    /// A file that fails to parse is treated as empty; the next write
    /// replaces it.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<HashMap<String, String>>(&text) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "credential file unreadable, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    fn persist(&self, data: &HashMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, text).map_err(|e| ApiError::Storage(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        self.persist(&data)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        if data.remove(key).is_some() {
            self.persist(&data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apibridge_types::keys;

    #[tokio::test]
    async fn test_set_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::open(&path);
        store.set(keys::ACCESS_TOKEN, "tok-1").await.unwrap();
        store.set(keys::EMAIL, "jo@example.com").await.unwrap();
        drop(store);

        let reopened = FileCredentialStore::open(&path);
        assert_eq!(
            reopened.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("tok-1")
        );
        assert_eq!(
            reopened.get(keys::EMAIL).await.unwrap().as_deref(),
            Some("jo@example.com")
        );
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::open(&path);
        store.set(keys::REFRESH_TOKEN, "rt").await.unwrap();
        store.remove(keys::REFRESH_TOKEN).await.unwrap();
        drop(store);

        let reopened = FileCredentialStore::open(&path);
        assert!(reopened.get(keys::REFRESH_TOKEN).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "definitely not json").unwrap();

        let store = FileCredentialStore::open(&path);
        assert!(store.get(keys::ACCESS_TOKEN).await.unwrap().is_none());
        // a write replaces the corrupt file
        store.set(keys::ACCESS_TOKEN, "tok").await.unwrap();
        let reopened = FileCredentialStore::open(&path);
        assert_eq!(
            reopened.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::open(dir.path().join("nope.json"));
        assert!(store.get(keys::EMAIL).await.unwrap().is_none());
    }
}
