//! Logging setup.
//!
//! Structured `tracing` output to stderr. `RUST_LOG` takes precedence over
//! the verbosity chosen on the command line.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter used when `RUST_LOG` is unset
    pub fn default_filter(&self) -> String {
        let level = self.level();
        // Request spans from TraceLayer are only interesting past Normal
        let http_level = match self {
            Self::Quiet | Self::Normal => Level::WARN,
            Self::Verbose | Self::Trace => level,
        };
        format!("aarstore={},tower_http={}", level, http_level)
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}
