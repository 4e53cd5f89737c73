//! # Object Backend Trait

use super::errors::{StorageError, StorageResult};

/// Blocking key/value object store.
///
/// Keys are `/`-separated relative paths. Implementations are driven from the
/// blocking thread pool by [`AttachmentStorage`](super::AttachmentStorage).
pub trait ObjectBackend: Send + Sync + std::fmt::Debug {
    /// Write data to key, replacing any existing object
    fn write(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Read the object at key
    fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the object at key
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if key exists
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// List keys starting with prefix
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

/// Reject keys that could escape the backend root
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
