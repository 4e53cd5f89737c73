//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::{validate_key, ObjectBackend};
use super::errors::{StorageError, StorageResult};

/// Object backend held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> StorageError {
        StorageError::Internal("Lock poisoned".into())
    }
}

impl ObjectBackend for MemoryBackend {
    fn write(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        let mut objects = self.objects.write().map_err(|_| Self::poisoned())?;
        objects.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut objects = self.objects.write().map_err(|_| Self::poisoned())?;
        objects
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::ObjectNotFound(key.to_string()))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        Ok(objects.contains_key(key))
    }

    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_storage::LocalBackend;

    #[test]
    fn test_write_read_delete() {
        let backend = MemoryBackend::new();
        backend.write("a/b.txt", b"data").unwrap();
        assert_eq!(backend.read("a/b.txt").unwrap(), b"data");
        assert_eq!(backend.len(), 1);

        backend.delete("a/b.txt").unwrap();
        assert!(backend.is_empty());
        assert!(matches!(
            backend.read("a/b.txt"),
            Err(StorageError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_list_prefix() {
        let backend = MemoryBackend::new();
        backend.write("aars/A/1", b"").unwrap();
        backend.write("aars/A/2", b"").unwrap();
        backend.write("aars/B/1", b"").unwrap();
        backend.write("other", b"").unwrap();

        assert_eq!(backend.list("aars/A/").unwrap(), vec!["aars/A/1", "aars/A/2"]);
        assert_eq!(backend.list("").unwrap().len(), 4);
    }

    #[test]
    fn test_bad_keys_match_local_backend() {
        let temp = tempfile::TempDir::new().unwrap();
        let local = LocalBackend::new(temp.path().to_path_buf());
        let memory = MemoryBackend::new();
        let backends: [&dyn ObjectBackend; 2] = [&memory, &local];

        for backend in backends {
            for key in ["../x", "/etc/passwd", "a//b"] {
                let invalid = |r: StorageResult<()>| matches!(r, Err(StorageError::InvalidKey(_)));
                assert!(invalid(backend.write(key, b"")), "{backend:?} write {key}");
                assert!(invalid(backend.read(key).map(|_| ())), "{backend:?} read {key}");
                assert!(invalid(backend.delete(key)), "{backend:?} delete {key}");
                assert!(invalid(backend.exists(key).map(|_| ())), "{backend:?} exists {key}");
            }
        }
    }
}
