//! Inputs to the controller's event loop.

use std::fmt;

use crate::coord::Position;
use crate::places::{PlaceCategory, PlaceOfInterest, PlaceQueryError};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the initial fix.
    Uninitialized,
    /// Map shown, tracking live.
    Ready,
    /// The initial fix failed. Terminal.
    Failed,
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppState::Uninitialized => write!(f, "uninitialized"),
            AppState::Ready => write!(f, "ready"),
            AppState::Failed => write!(f, "failed"),
        }
    }
}

/// A user action delivered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The map was clicked at a coordinate.
    MapClicked(Position),
    /// The radius input changed. Carries the raw text.
    RadiusInput(String),
    /// The user asked for nearby places of a category.
    FindNearby(PlaceCategory),
    /// End the session.
    Quit,
}

/// A finished place query, tagged with the sequence number it was issued
/// under.
#[derive(Debug, Clone)]
pub struct QueryCompletion {
    pub sequence: u64,
    pub category: PlaceCategory,
    pub radius_meters: u32,
    pub result: Result<Vec<PlaceOfInterest>, PlaceQueryError>,
}
