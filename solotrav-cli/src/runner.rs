//! Shared setup for commands: configuration, logging, runtime.

use solotrav::config::ConfigFile;
use solotrav::logging::{init_logging, WorkerGuard};
use tracing::info;

use crate::error::CliError;

/// Loads configuration and installs file logging for a command.
pub struct CliRunner {
    config: ConfigFile,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load the config file and start logging.
    ///
    /// A logging failure is reported but does not stop the command.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_guard = match init_logging(&config.logging.directory) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: logging disabled: {}", e);
                None
            }
        };

        Ok(Self {
            config,
            _log_guard: log_guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Record which command started, for the log file.
    pub fn log_startup(&self, command: &str) {
        info!(
            version = solotrav::VERSION,
            command,
            log_dir = %self.config.logging.directory.display(),
            "SoloTrav starting"
        );
    }

    /// Build the multi-threaded runtime used by async commands.
    pub fn runtime(&self) -> Result<tokio::runtime::Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))
    }
}
