//! Storage backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::CacheError;

/// Async string key/value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a raw value. `None` when the key is absent.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a raw value, replacing any previous one.
    async fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object on disk.
///
/// The file is read on first access and rewritten on every change via a
/// temporary file and rename, so a crash leaves either the old or the new
/// document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Option<HashMap<String, String>>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, CacheError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), keys = entries.len(), "store persisted");
        Ok(())
    }

    async fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> (R, bool),
    ) -> Result<R, CacheError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.load().await?);
        }
        let current = guard.get_or_insert_with(HashMap::new);
        let mut next = current.clone();
        let (result, dirty) = f(&mut next);
        if dirty {
            self.persist(&next).await?;
            *current = next;
        }
        Ok(result)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.with_entries(|entries| (entries.get(key).cloned(), false))
            .await
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value);
            ((), true)
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.with_entries(|entries| {
            let removed = entries.remove(key).is_some();
            ((), removed)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get_raw("k").await.unwrap(), None);
        store.set_raw("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get_raw("k").await.unwrap().as_deref(), Some("v"));
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get_raw("theme_mode").await.unwrap(), None);
        store.set_raw("theme_mode", "dark".to_string()).await.unwrap();
        store.set_raw("user", "{}".to_string()).await.unwrap();
        store.delete("user").await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get_raw("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(reopened.get_raw("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(
            store.get_raw("k").await,
            Err(CacheError::Serialize(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        // A directory where the temporary file goes makes every write fail.
        let blocker = path.with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();

        let store = FileStore::new(&path);
        assert!(store.set_raw("user", "{}".to_string()).await.is_err());
        assert_eq!(store.get_raw("user").await.unwrap(), None);

        std::fs::remove_dir(&blocker).unwrap();
        store.set_raw("theme_mode", "dark".to_string()).await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get_raw("user").await.unwrap(), None);
        assert_eq!(
            reopened.get_raw("theme_mode").await.unwrap().as_deref(),
            Some("dark")
        );
    }
}
