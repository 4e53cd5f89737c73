//! # Local Filesystem Backend

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::backend::{validate_key, ObjectBackend};
use super::errors::{StorageError, StorageResult};

/// Stores each object as a file below a root directory
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend. The root is not created here.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn not_found_or_io(key: &str, e: std::io::Error) -> StorageError {
        if e.kind() == ErrorKind::NotFound {
            StorageError::ObjectNotFound(key.to_string())
        } else {
            StorageError::IoError(e.to_string())
        }
    }
}

impl ObjectBackend for LocalBackend {
    fn write(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let full_path = self.full_path(key)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(())
    }

    fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(key)?;
        fs::read(&full_path).map_err(|e| Self::not_found_or_io(key, e))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        fs::remove_file(&full_path).map_err(|e| Self::not_found_or_io(key, e))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.full_path(key)?.is_file())
    }

    /// Walks the whole tree; fails if the root directory is missing
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(StorageError::IoError(format!(
                "storage root {} is not a directory",
                self.root.display()
            )));
        }

        let mut keys = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Ok(relative) = path.strip_prefix(&self.root) else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("test.txt", b"hello").unwrap();
        assert_eq!(backend.read("test.txt").unwrap(), b"hello");
    }

    #[test]
    fn test_nested_key() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend
            .write("aars/AAR-1/attachments/map.png", b"nested")
            .unwrap();
        assert_eq!(
            backend.read("aars/AAR-1/attachments/map.png").unwrap(),
            b"nested"
        );
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("delete-me.txt", b"bye").unwrap();
        assert!(backend.exists("delete-me.txt").unwrap());

        backend.delete("delete-me.txt").unwrap();
        assert!(!backend.exists("delete-me.txt").unwrap());
        assert!(matches!(
            backend.delete("delete-me.txt"),
            Err(StorageError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        assert!(matches!(
            backend.read("nonexistent.txt"),
            Err(StorageError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_traversal_rejected() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("root"));

        assert!(matches!(
            backend.write("../escape.txt", b"x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_list_recursive_with_prefix() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("aars/A/attachments/1.txt", b"1").unwrap();
        backend.write("aars/A/attachments/2.txt", b"2").unwrap();
        backend.write("aars/B/attachments/3.txt", b"3").unwrap();

        assert_eq!(
            backend.list("aars/A/").unwrap(),
            vec!["aars/A/attachments/1.txt", "aars/A/attachments/2.txt"]
        );
        assert_eq!(backend.list("").unwrap().len(), 3);
    }

    #[test]
    fn test_list_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("absent"));
        assert!(matches!(backend.list(""), Err(StorageError::IoError(_))));
    }
}
