//! In-memory credential store backed by a `HashMap` behind a `Mutex`.

use apibridge_types::{CredentialStore, error::Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`CredentialStore`] implementation for testing and ephemeral use.
pub struct MemoryCredentialStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Creates a new empty in-memory credential store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apibridge_types::keys;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryCredentialStore::new();
        store.set(keys::ACCESS_TOKEN, "tok-1").await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("tok-1")
        );
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryCredentialStore::new();
        assert!(store.get(keys::EMAIL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryCredentialStore::new();
        store.set(keys::ACCESS_TOKEN, "first").await.unwrap();
        store.set(keys::ACCESS_TOKEN, "second").await.unwrap();
        assert_eq!(
            store.get(keys::ACCESS_TOKEN).await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.set(keys::EMAIL, "jo@example.com").await.unwrap();
        store.remove(keys::EMAIL).await.unwrap();
        assert!(store.get(keys::EMAIL).await.unwrap().is_none());
        // removing again is fine
        store.remove(keys::EMAIL).await.unwrap();
    }
}
