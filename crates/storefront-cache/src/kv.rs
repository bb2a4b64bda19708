//! Typed access over a [`KeyValueStore`].

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{CacheError, KeyValueStore, StorageKey};

/// Type-safe cache with automatic JSON serialization.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    /// Wrap a backend.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap a shared backend.
    pub fn from_arc(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get a value. Returns `None` if the key doesn't exist.
    pub async fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key.as_str()).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_raw(key.as_str(), raw).await
    }

    /// Delete a value.
    pub async fn delete(&self, key: StorageKey) -> Result<(), CacheError> {
        self.store.delete(key.as_str()).await
    }

    /// Read a value stored as a plain string (no JSON quoting).
    pub async fn get_string(&self, key: StorageKey) -> Result<Option<String>, CacheError> {
        self.store.get_raw(key.as_str()).await
    }

    /// Store a plain string (no JSON quoting).
    pub async fn set_string(&self, key: StorageKey, value: impl Into<String>) -> Result<(), CacheError> {
        self.store.set_raw(key.as_str(), value.into()).await
    }

    /// Remove every session-scoped key.
    ///
    /// A failed delete does not stop the rest; the first error is returned
    /// once every key has been tried.
    pub async fn clear_session(&self) -> Result<(), CacheError> {
        let mut first_error = None;
        for key in StorageKey::ALL.iter().filter(|k| k.is_session_scoped()) {
            if let Err(e) = self.delete(*key).await {
                tracing::warn!(key = %key, error = %e, "failed to delete session key");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use serde::Deserialize;

    /// Memory store whose deletes of one key always fail.
    struct StuckKey {
        inner: MemoryStore,
        stuck: &'static str,
    }

    #[async_trait]
    impl KeyValueStore for StuckKey {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.inner.get_raw(key).await
        }

        async fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError> {
            self.inner.set_raw(key, value).await
        }

        async fn delete(&self, key: &str) -> Result<(), CacheError> {
            if key == self.stuck {
                return Err(CacheError::Io(std::io::Error::other("read-only")));
            }
            self.inner.delete(key).await
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        product: String,
        quantity: u32,
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let lines = vec![Line {
            product: "p1".to_string(),
            quantity: 2,
        }];
        cache.set(StorageKey::CartSnapshot, &lines).await.unwrap();
        let loaded: Option<Vec<Line>> = cache.get(StorageKey::CartSnapshot).await.unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[tokio::test]
    async fn test_plain_strings() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "abc").await.unwrap();
        assert_eq!(
            cache.get_string(StorageKey::AuthToken).await.unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_is_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::User, "not json").await.unwrap();
        let result: Result<Option<Line>, _> = cache.get(StorageKey::User).await;
        assert!(matches!(result, Err(CacheError::Serialize(_))));
    }

    #[tokio::test]
    async fn test_clear_session_keeps_preferences() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_string(StorageKey::AuthToken, "t").await.unwrap();
        cache.set(StorageKey::OnboardingComplete, &true).await.unwrap();
        cache.clear_session().await.unwrap();
        assert_eq!(cache.get_string(StorageKey::AuthToken).await.unwrap(), None);
        assert_eq!(
            cache.get::<bool>(StorageKey::OnboardingComplete).await.unwrap(),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_clear_session_tries_every_key() {
        let cache = Cache::new(StuckKey {
            inner: MemoryStore::new(),
            stuck: "auth_token",
        });
        cache.set_string(StorageKey::AuthToken, "t").await.unwrap();
        cache.set_string(StorageKey::User, "{}").await.unwrap();
        cache.set_string(StorageKey::CartSnapshot, "[]").await.unwrap();

        assert!(matches!(cache.clear_session().await, Err(CacheError::Io(_))));
        assert_eq!(cache.get_string(StorageKey::User).await.unwrap(), None);
        assert_eq!(cache.get_string(StorageKey::CartSnapshot).await.unwrap(), None);
        assert_eq!(
            cache.get_string(StorageKey::AuthToken).await.unwrap().as_deref(),
            Some("t")
        );
    }
}
