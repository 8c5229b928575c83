//! Log file setup.
//!
//! Logs go to a daily-rotated file so that interactive terminal output stays
//! clean. Filtering follows `RUST_LOG`, falling back to `solotrav=info`.

use std::path::Path;

use thiserror::Error;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "solotrav=info";

/// Base name of the log files.
pub const LOG_FILE_PREFIX: &str = "solotrav.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber writing to `log_dir`.
///
/// The returned guard flushes buffered records when dropped and must be
/// kept alive for the lifetime of the program.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.display().to_string(),
        source,
    })?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339()),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_directory() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        // A global subscriber may already exist in this test binary; only the
        // directory creation is guaranteed.
        let _ = init_logging(&log_dir);
        assert!(log_dir.is_dir());
    }
}
