/// Object storage collaborator interface, defined but currently inactive
///
/// An earlier iteration of the notes service uploaded note bodies to S3 and
/// handed clients presigned URLs; the live flow stores content directly in
/// the database and this path sits dormant. The contract is kept as an
/// explicit trait so the S3 flow can be reactivated behind it without
/// touching the handlers, and so tests have something concrete to stand in
/// for it.
///
/// The credential core never calls this; it is consumed (when active at
/// all) by the notes handlers, after authentication has already happened.
///
/// # Implementations
///
/// - [`memory::MemoryStore`]: in-process map, for tests and local demos
///
/// # Example
///
/// ```
/// use notevault_shared::storage::{memory::MemoryStore, ObjectStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// store.put("alice/note-1.txt", bytes::Bytes::from("hello")).await?;
/// let url = store.presign("alice/note-1.txt").await?;
/// store.delete("alice/note-1.txt").await?;
/// # Ok(())
/// # }
/// ```
use async_trait::async_trait;
use bytes::Bytes;

pub mod memory;

/// Error type for object storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation
    #[error("storage backend error: {0}")]
    Backend(String),

    /// No object under the given key
    #[error("no object stored under key {0}")]
    NotFound(String),
}

/// Contract for an object storage backend
///
/// Keys are opaque strings; by convention the notes service namespaces them
/// as `<username>/<uuid>.txt` so ownership is visible in the key itself.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`, overwriting any previous object
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError>;

    /// Returns a time-limited URL from which the object can be fetched
    async fn presign(&self, key: &str) -> Result<String, StorageError>;

    /// Removes the object under `key`; removing a missing key is an error
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
