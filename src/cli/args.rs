//! CLI argument definitions using clap
//!
//! Commands:
//! - aarstore serve [--config <path>] [--host] [--port] [--storage-dir] [--memory-storage]
//!   [--s3-endpoint] [--s3-region] [--s3-access-key] [--s3-secret-key] [--s3-bucket]
//! - aarstore samples

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, StorageBackendKind};
use crate::logging::Verbosity;

/// After Action Report records service
#[derive(Parser, Debug)]
#[command(name = "aarstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print the seeded sample records as JSON
    Samples,
}

/// Flags that override the configuration file
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Path to JSON configuration file
    #[arg(long, env = "AAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding attachment objects
    #[arg(long, env = "AAR_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Keep attachments in memory instead of on disk
    #[arg(long)]
    pub memory_storage: bool,

    /// S3 endpoint URL; leave unset for AWS
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION")]
    pub s3_region: Option<String>,

    #[arg(long, env = "S3_ACCESS_KEY", hide_env_values = true)]
    pub s3_access_key: Option<String>,

    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub s3_secret_key: Option<String>,

    /// Bucket for attachments; selects the S3 backend
    #[arg(long, env = "S3_BUCKET")]
    pub s3_bucket: Option<String>,
}

impl ServeArgs {
    /// Apply flag overrides on top of a loaded configuration
    ///
    /// A bucket selects the S3 backend unless a storage directory or memory
    /// storage is also requested.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        let s3 = &mut config.storage.s3;
        let overrides = [
            (&self.s3_endpoint, &mut s3.endpoint),
            (&self.s3_region, &mut s3.region),
            (&self.s3_access_key, &mut s3.access_key),
            (&self.s3_secret_key, &mut s3.secret_key),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if let Some(bucket) = &self.s3_bucket {
            s3.bucket = bucket.clone();
            config.storage.backend = StorageBackendKind::S3;
        }

        if let Some(dir) = &self.storage_dir {
            config.storage.backend = StorageBackendKind::Local;
            config.storage.root = dir.clone();
        }
        if self.memory_storage {
            config.storage.backend = StorageBackendKind::Memory;
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn verbosity(&self) -> Verbosity {
        match (self.quiet, self.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Trace,
        }
    }
}
