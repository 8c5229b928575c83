//! CLI error types.

use std::fmt;

use solotrav::app::AppError;
use solotrav::config::ConfigError;
use solotrav::places::PlaceQueryError;

/// Errors that end a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, saved or applied.
    Config(String),

    /// A command-line argument was out of range.
    InvalidArgument(String),

    /// The session failed.
    App(AppError),

    /// A place query failed.
    Places(PlaceQueryError),

    /// Failed to create the Tokio runtime.
    Runtime(String),
}

impl CliError {
    /// Whether the map surface already showed this error to the user.
    pub fn shown_on_surface(&self) -> bool {
        matches!(self, CliError::App(AppError::InitialFix(_)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::App(e) => write!(f, "{}", e),
            CliError::Places(e) => write!(f, "Nearby place lookup failed: {}", e),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Places(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

impl From<PlaceQueryError> for CliError {
    fn from(e: PlaceQueryError) -> Self {
        CliError::Places(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solotrav::position::PositionError;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Config("missing key".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing key"));
    }

    #[test]
    fn test_cli_error_from_app_error() {
        let err: CliError = AppError::InitialFix(PositionError::PermissionDenied).into();
        assert!(matches!(err, CliError::App(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_initial_fix_failure_is_shown_on_surface_only() {
        let err: CliError = AppError::InitialFix(PositionError::Timeout(7000)).into();
        assert!(err.shown_on_surface());

        let err = CliError::InvalidArgument("radius".to_string());
        assert!(!err.shown_on_surface());
    }
}
