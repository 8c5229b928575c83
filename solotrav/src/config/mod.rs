//! Configuration file
//!
//! Settings are stored in an INI file at `<config dir>/solotrav/config.ini`.
//! A missing file means "all defaults"; CLI arguments override file values.
//!
//! ```ini
//! [geofence]
//! radius = 500
//!
//! [map]
//! zoom = 15
//!
//! [location]
//! gpsd_host = 127.0.0.1
//! gpsd_port = 2947
//! timeout_ms = 7000
//!
//! [places]
//! endpoint = https://overpass-api.de/api/interpreter
//! search_radius = 3000
//! request_timeout = 30
//!
//! [logging]
//! directory = /home/user/.local/share/solotrav/logs
//! ```

mod file;
mod keys;

use std::path::PathBuf;

use thiserror::Error;

pub use file::{
    ConfigFile, GeofenceSettings, LocationSettings, LoggingSettings, MapSettings, PlacesSettings,
};
pub use keys::ConfigKey;

/// Errors from loading, saving or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// Directory holding the configuration file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solotrav")
}

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}

/// Default directory for log files.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solotrav")
        .join("logs")
}
