//! # S3 Backend
//!
//! S3 or an S3-compatible service (MinIO, LocalStack) through `object_store`.
//! Requests use path-style addressing so custom endpoints work without
//! bucket DNS entries.
//!
//! The store client is async. Calls are driven on the blocking pool by
//! [`AttachmentStorage`](super::AttachmentStorage), so each one is run to
//! completion with the runtime handle captured at construction. Never call
//! these methods from a runtime worker thread.

use std::future::Future;

use futures_util::TryStreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use tokio::runtime::Handle;

use super::backend::{validate_key, ObjectBackend};
use super::errors::{StorageError, StorageResult};
use crate::config::S3Config;

/// Objects in one S3 bucket
#[derive(Debug)]
pub struct S3Backend {
    store: AmazonS3,
    bucket: String,
    runtime: Handle,
}

impl S3Backend {
    /// Build a client for `config.bucket`. No request is made here.
    pub fn connect(config: &S3Config, runtime: Handle) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_region(&config.region)
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key)
            .with_secret_access_key(&config.secret_key)
            .with_virtual_hosted_style_request(false);

        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.endpoint.starts_with("http://"));
        }

        let store = builder.build().map_err(|e| StorageError::Remote(e.to_string()))?;
        Ok(Self {
            store,
            bucket: config.bucket.clone(),
            runtime,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn path(key: &str) -> StorageResult<ObjectPath> {
        validate_key(key)?;
        ObjectPath::parse(key).map_err(|_| StorageError::InvalidKey(key.to_string()))
    }
}

fn map_error(key: &str, e: object_store::Error) -> StorageError {
    match e {
        object_store::Error::NotFound { .. } => StorageError::ObjectNotFound(key.to_string()),
        other => StorageError::Remote(other.to_string()),
    }
}

/// Directory part of a listing prefix, for the segment-based S3 listing
fn list_root(prefix: &str) -> Option<ObjectPath> {
    match prefix.rfind('/') {
        Some(end) if end > 0 => Some(ObjectPath::from(&prefix[..end])),
        _ => None,
    }
}

impl ObjectBackend for S3Backend {
    fn write(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let path = Self::path(key)?;
        let payload = PutPayload::from(data.to_vec());
        self.block_on(self.store.put(&path, payload))
            .map(|_| ())
            .map_err(|e| map_error(key, e))
    }

    fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = Self::path(key)?;
        self.block_on(async {
            let object = self.store.get(&path).await?;
            object.bytes().await
        })
        .map(|bytes| bytes.to_vec())
        .map_err(|e| map_error(key, e))
    }

    /// S3 deletes are idempotent, so existence is checked first
    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = Self::path(key)?;
        self.block_on(async {
            self.store.head(&path).await?;
            self.store.delete(&path).await
        })
        .map_err(|e| map_error(key, e))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = Self::path(key)?;
        match self.block_on(self.store.head(&path)) {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(map_error(key, e)),
        }
    }

    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let root = list_root(prefix);
        let objects = self
            .block_on(self.store.list(root.as_ref()).try_collect::<Vec<_>>())
            .map_err(|e| map_error(prefix, e))?;

        let mut keys: Vec<String> = objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
