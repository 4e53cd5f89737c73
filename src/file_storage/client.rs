//! # Attachment Storage Client
//!
//! Async front for an [`ObjectBackend`]. Each call runs on the blocking pool
//! and is bounded by a deadline; the record store is never involved.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::backend::ObjectBackend;
use super::errors::{StorageError, StorageResult};

/// Default bound on a single storage call
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Object key for an attachment of a record.
///
/// Only the final path component of `filename` is kept.
pub fn attachment_key(aar_id: &str, filename: &str) -> String {
    format!("aars/{}/attachments/{}", aar_id, sanitize_filename(filename))
}

/// Strip directories from a client-supplied filename
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => "unnamed".to_string(),
        name => name.to_string(),
    }
}

/// Deadline-bounded attachment storage
#[derive(Debug, Clone)]
pub struct AttachmentStorage {
    backend: Arc<dyn ObjectBackend>,
    deadline: Duration,
}

impl AttachmentStorage {
    pub fn new(backend: Arc<dyn ObjectBackend>) -> Self {
        Self {
            backend,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Same backend, different per-call deadline
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            deadline,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    async fn run<T, F>(&self, operation: &'static str, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ObjectBackend) -> StorageResult<T> + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let task = tokio::task::spawn_blocking(move || f(backend.as_ref()));

        match tokio::time::timeout(self.deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(StorageError::Internal(join_error.to_string())),
            Err(_) => {
                warn!(operation, deadline = ?self.deadline, "storage call timed out");
                Err(StorageError::Timeout {
                    operation,
                    after: self.deadline,
                })
            }
        }
    }

    /// Store an object
    pub async fn upload(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let size = data.len();
        let owned_key = key.to_string();
        self.run("upload", move |b| b.write(&owned_key, &data)).await?;
        debug!(key, size, "object uploaded");
        Ok(())
    }

    /// Fetch an object
    pub async fn download(&self, key: &str) -> StorageResult<Vec<u8>> {
        let key = key.to_string();
        self.run("download", move |b| b.read(&key)).await
    }

    /// Remove an object
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        let key = key.to_string();
        self.run("delete", move |b| b.delete(&key)).await
    }

    /// Whether an object is stored under key
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        let key = key.to_string();
        self.run("exists", move |b| b.exists(&key)).await
    }

    /// Keys under a prefix
    pub async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let prefix = prefix.to_string();
        self.run("list", move |b| b.list(&prefix)).await
    }

    /// Check the backend is reachable by listing its root.
    ///
    /// Returns the number of objects found.
    pub async fn validate(&self) -> StorageResult<usize> {
        Ok(self.list("").await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_storage::memory::MemoryBackend;

    #[derive(Debug)]
    struct SlowBackend(Duration);

    impl ObjectBackend for SlowBackend {
        fn write(&self, _key: &str, _data: &[u8]) -> StorageResult<()> {
            std::thread::sleep(self.0);
            Ok(())
        }
        fn read(&self, _key: &str) -> StorageResult<Vec<u8>> {
            std::thread::sleep(self.0);
            Ok(Vec::new())
        }
        fn delete(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
        fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(true)
        }
        fn list(&self, _prefix: &str) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_attachment_key() {
        assert_eq!(
            attachment_key("AAR-20251005-0001", "sitrep.pdf"),
            "aars/AAR-20251005-0001/attachments/sitrep.pdf"
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\map.png"), "map.png");
        assert_eq!(sanitize_filename(".."), "unnamed");
        assert_eq!(sanitize_filename(""), "unnamed");
        assert_eq!(sanitize_filename("dir/"), "unnamed");
    }

    #[tokio::test]
    async fn test_upload_download_delete() {
        let storage = AttachmentStorage::new(Arc::new(MemoryBackend::new()));

        storage.upload("aars/A/attachments/x.txt", b"payload".to_vec()).await.unwrap();
        assert_eq!(
            storage.download("aars/A/attachments/x.txt").await.unwrap(),
            b"payload"
        );
        assert_eq!(storage.validate().await.unwrap(), 1);
        assert!(storage.exists("aars/A/attachments/x.txt").await.unwrap());

        storage.delete("aars/A/attachments/x.txt").await.unwrap();
        assert!(!storage.exists("aars/A/attachments/x.txt").await.unwrap());
        assert!(matches!(
            storage.download("aars/A/attachments/x.txt").await,
            Err(StorageError::ObjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_deadline_elapses() {
        let storage = AttachmentStorage::new(Arc::new(SlowBackend(Duration::from_millis(300))))
            .with_deadline(Duration::from_millis(20));

        let err = storage.download("slow").await.unwrap_err();
        assert!(matches!(err, StorageError::Timeout { operation: "download", .. }));
    }

    #[tokio::test]
    async fn test_deadline_not_hit() {
        let storage = AttachmentStorage::new(Arc::new(SlowBackend(Duration::from_millis(5))))
            .with_deadline(Duration::from_secs(5));
        storage.upload("fast", Vec::new()).await.unwrap();
    }
}
