//! Application error types.

use thiserror::Error;

use super::events::AppState;
use crate::position::PositionError;

/// Errors that end or prevent a session.
#[derive(Debug, Error)]
pub enum AppError {
    /// The initial position fix failed; the map was never shown.
    #[error("Failed to acquire initial position: {0}")]
    InitialFix(#[source] PositionError),

    /// An operation needed a different lifecycle state.
    #[error("Session is {actual}, expected {expected}")]
    InvalidState { expected: AppState, actual: AppState },
}

impl AppError {
    /// Message shown to the user when the session cannot start.
    pub fn fatal_message(&self) -> String {
        match self {
            AppError::InitialFix(PositionError::PermissionDenied) => {
                "Location access denied: the app can't work without it.".to_string()
            }
            AppError::InitialFix(_) => {
                "Couldn't determine your location: the app can't work without it.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::InitialFix(PositionError::Timeout(7000));
        assert!(err.to_string().contains("initial position"));
        assert!(err.to_string().contains("7000 ms"));
    }

    #[test]
    fn test_fatal_message_for_permission_denied() {
        let err = AppError::InitialFix(PositionError::PermissionDenied);
        assert!(err.fatal_message().starts_with("Location access denied"));
    }

    #[test]
    fn test_invalid_state_display() {
        let err = AppError::InvalidState {
            expected: AppState::Ready,
            actual: AppState::Failed,
        };
        assert_eq!(err.to_string(), "Session is failed, expected ready");
    }
}
