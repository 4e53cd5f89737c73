//! # Attachment File Storage
//!
//! Object storage for AAR attachments: a blocking backend trait with
//! filesystem, in-memory and S3 implementations, and an async client that
//! bounds every call with a deadline.

pub mod backend;
pub mod client;
pub mod errors;
pub mod local;
pub mod memory;
pub mod s3;

pub use backend::ObjectBackend;
pub use client::{attachment_key, sanitize_filename, AttachmentStorage};
pub use errors::{StorageError, StorageResult};
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use s3::S3Backend;
