/// In-memory object store
///
/// Backs the [`ObjectStore`](super::ObjectStore) contract with a process-local
/// map. Exists for tests and local demos; "presigned" URLs use a `memory://`
/// scheme and are only meaningful inside the process that issued them.
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ObjectStore, StorageError};

/// Lifetime advertised by [`MemoryStore::presign`] URLs, in seconds
const PRESIGN_TTL_SECONDS: u64 = 3600;

/// Process-local object store
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError> {
        self.objects.write().await.insert(key.to_owned(), bytes);
        Ok(())
    }

    async fn presign(&self, key: &str) -> Result<String, StorageError> {
        let objects = self.objects.read().await;
        if !objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_owned()));
        }
        Ok(format!("memory://{}?expires_in={}", key, PRESIGN_TTL_SECONDS))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self.objects.write().await.remove(key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(key.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_presign_delete_roundtrip() {
        let store = MemoryStore::new();

        store
            .put("alice/note.txt", Bytes::from("hello"))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);

        let url = store.presign("alice/note.txt").await.unwrap();
        assert!(url.starts_with("memory://alice/note.txt"));

        store.delete("alice/note.txt").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_keys_are_not_found() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.presign("nope").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("nope").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();

        store.put("k", Bytes::from("one")).await.unwrap();
        store.put("k", Bytes::from("two")).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
