//! CLI command implementations
//!
//! `serve` boots in a fixed order: configuration, logging, attachment
//! storage check, record store seed, HTTP listener. Any failure before the
//! listener is up aborts startup.

use std::fs;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::config::{mask_secret, Config, StorageBackendKind};
use crate::file_storage::{
    AttachmentStorage, LocalBackend, MemoryBackend, ObjectBackend, S3Backend,
};
use crate::http_server::{AppState, HttpServer};
use crate::logging::init_logging;
use crate::records::RecordStore;
use crate::report::PdfRenderer;

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbosity());
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(args),
        Command::Samples => samples(),
    }
}

/// Start the service and block until shutdown
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(serve_with_config(config))
}

/// Boot sequence once configuration is final
pub async fn serve_with_config(config: Config) -> CliResult<()> {
    log_config(&config);

    let storage = open_storage(&config)?;
    let objects = storage
        .validate()
        .await
        .map_err(|e| CliError::boot_failed(storage_failure(&config, &e.to_string())))?;
    info!(objects, "attachment storage reachable");

    let store = Arc::new(RecordStore::with_sample_data());
    info!(records = store.len(), "record store seeded");

    let renderer = PdfRenderer::new(config.report.renderer.clone(), config.report.timeout());
    let state = AppState::new(store, storage, renderer);

    HttpServer::with_state(config.server, state)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

fn open_storage(config: &Config) -> CliResult<AttachmentStorage> {
    let backend: Arc<dyn ObjectBackend> = match config.storage.backend {
        StorageBackendKind::Local => {
            fs::create_dir_all(&config.storage.root).map_err(|e| {
                CliError::boot_failed(format!(
                    "Cannot create storage root {}: {}",
                    config.storage.root.display(),
                    e
                ))
            })?;
            Arc::new(LocalBackend::new(config.storage.root.clone()))
        }
        StorageBackendKind::Memory => {
            warn!("attachments are kept in memory and lost on exit");
            Arc::new(MemoryBackend::new())
        }
        StorageBackendKind::S3 => {
            let runtime = Handle::try_current().map_err(|e| {
                CliError::boot_failed(format!("S3 storage needs a tokio runtime: {}", e))
            })?;
            let backend = S3Backend::connect(&config.storage.s3, runtime)
                .map_err(|e| CliError::boot_failed(storage_failure(config, &e.to_string())))?;
            Arc::new(backend)
        }
    };

    Ok(AttachmentStorage::new(backend).with_deadline(config.storage.timeout()))
}

/// Startup failure text with enough context to fix the storage settings
fn storage_failure(config: &Config, error: &str) -> String {
    match config.storage.backend {
        StorageBackendKind::S3 => {
            let s3 = &config.storage.s3;
            format!(
                "Cannot reach S3 bucket '{}' at {} (region {}): {}. \
                 Check the credentials, that the bucket exists, and that they \
                 allow ListBucket, GetObject and PutObject.",
                s3.bucket,
                s3.endpoint_display(),
                s3.region,
                error
            )
        }
        backend => format!(
            "Attachment storage check failed ({:?} backend at {}): {}",
            backend,
            config.storage.root.display(),
            error
        ),
    }
}

fn log_config(config: &Config) {
    info!(
        addr = %config.server.socket_addr(),
        cors_origins = config.server.cors_origins.len(),
        max_body_bytes = config.server.max_body_bytes,
        storage_backend = ?config.storage.backend,
        storage_root = %config.storage.root.display(),
        storage_timeout = ?config.storage.timeout(),
        renderer = %config.report.renderer.display(),
        "configuration loaded"
    );

    if config.storage.backend == StorageBackendKind::S3 {
        let s3 = &config.storage.s3;
        info!(
            endpoint = %s3.endpoint_display(),
            region = %s3.region,
            access_key = %mask_secret(&s3.access_key),
            secret_key = %mask_secret(&s3.secret_key),
            bucket = %s3.bucket,
            "S3 storage"
        );
    }
}

/// Print the sample records that `serve` seeds
pub fn samples() -> CliResult<()> {
    let store = RecordStore::with_sample_data();
    write_json(&store.get_all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_local_storage_creates_root() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.root = dir.path().join("nested").join("docs");

        open_storage(&config).unwrap();
        assert!(config.storage.root.is_dir());
    }

    #[tokio::test]
    async fn test_open_memory_storage() {
        let mut config = Config::default();
        config.storage.backend = StorageBackendKind::Memory;

        let storage = open_storage(&config).unwrap();
        assert_eq!(storage.deadline(), config.storage.timeout());
        assert_eq!(storage.validate().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_s3_storage() {
        let mut config = Config::default();
        config.storage.backend = StorageBackendKind::S3;
        config.storage.s3.endpoint = "http://127.0.0.1:9".into();
        config.storage.s3.access_key = "minioadmin".into();
        config.storage.s3.secret_key = "minioadmin".into();
        config.storage.s3.bucket = "aar-documents".into();

        let storage = open_storage(&config).unwrap();
        assert_eq!(storage.deadline(), config.storage.timeout());
    }

    #[test]
    fn test_s3_outside_runtime_fails_boot() {
        let mut config = Config::default();
        config.storage.backend = StorageBackendKind::S3;
        config.storage.s3.bucket = "aar-documents".into();

        let err = open_storage(&config).unwrap_err();
        assert_eq!(err.code_str(), "AAR_CLI_BOOT_FAILED");
    }

    #[test]
    fn test_storage_failure_names_bucket_without_secrets() {
        let mut config = Config::default();
        config.storage.backend = StorageBackendKind::S3;
        config.storage.s3.bucket = "aar-documents".into();
        config.storage.s3.secret_key = "supersecretvalue".into();

        let message = storage_failure(&config, "403 Forbidden");
        assert!(message.contains("'aar-documents'"));
        assert!(message.contains("(AWS S3)"));
        assert!(!message.contains("supersecretvalue"));
    }

    #[test]
    fn test_unwritable_root_fails_boot() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        let mut config = Config::default();
        config.storage.root = blocker.join("docs");

        let err = open_storage(&config).unwrap_err();
        assert_eq!(err.code_str(), "AAR_CLI_BOOT_FAILED");
    }
}
