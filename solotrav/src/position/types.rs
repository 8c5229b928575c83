//! Position source contract and options.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use super::watch::PositionWatch;
use crate::coord::Position;

/// Timeout for a single fix attempt.
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_millis(7000);

/// Options passed to the sensor for every fix attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask the sensor for its most accurate mode.
    pub enable_high_accuracy: bool,
    /// Oldest cached sample that may be returned. Zero means every sample
    /// must be fresh.
    pub maximum_age: Duration,
    /// How long one fix attempt may take before it fails with
    /// [`PositionError::Timeout`].
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            maximum_age: Duration::ZERO,
            timeout: DEFAULT_FIX_TIMEOUT,
        }
    }
}

impl PositionOptions {
    /// Set the per-fix timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors reported by a position source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The user or the system refused access to the sensor.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The sensor could not produce a position.
    #[error("Position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived within the configured timeout.
    #[error("Timed out after {0} ms waiting for a position fix")]
    Timeout(u64),
}

impl PositionError {
    pub(crate) fn timeout(options: &PositionOptions) -> Self {
        PositionError::Timeout(options.timeout.as_millis() as u64)
    }
}

/// A location sensor.
///
/// Implementations must never return a cached sample older than
/// `options.maximum_age`.
pub trait PositionSource: Send + Sync {
    /// Request a single fresh fix.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, PositionError>> + Send;

    /// Subscribe to continuous updates.
    ///
    /// The returned handle yields samples in arrival order until the sensor
    /// goes away or the handle is cancelled or dropped. Must be called from
    /// within a Tokio runtime.
    fn watch(&self, options: &PositionOptions) -> PositionWatch;
}
