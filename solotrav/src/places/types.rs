//! Place types and the query contract.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use thiserror::Error;

use crate::coord::Position;

/// Search radius for nearby places, independent of the geofence radius.
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 3000;

/// Kind of place that can be searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Police,
    Hospital,
}

impl PlaceCategory {
    /// OpenStreetMap `amenity` tag value.
    pub fn amenity(&self) -> &'static str {
        match self {
            PlaceCategory::Police => "police",
            PlaceCategory::Hospital => "hospital",
        }
    }

    /// Label used when a place has no name.
    pub fn default_label(&self) -> &'static str {
        match self {
            PlaceCategory::Police => "Police Station",
            PlaceCategory::Hospital => "Hospital",
        }
    }

    /// Plural noun for user-facing messages.
    pub fn plural(&self) -> &'static str {
        match self {
            PlaceCategory::Police => "police stations",
            PlaceCategory::Hospital => "hospitals",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.amenity())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "police" => Ok(PlaceCategory::Police),
            "hospital" => Ok(PlaceCategory::Hospital),
            other => Err(format!("unknown place category '{}'", other)),
        }
    }
}

/// A place returned by a nearby query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOfInterest {
    pub position: Position,
    pub label: String,
    pub category: PlaceCategory,
}

impl PlaceOfInterest {
    pub fn new(position: Position, label: impl Into<String>, category: PlaceCategory) -> Self {
        Self {
            position,
            label: label.into(),
            category,
        }
    }
}

/// Errors from a nearby-place query.
///
/// Both variants surface to the user as the same "try again later" message.
/// An empty result is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceQueryError {
    /// The request could not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// The response was not the expected JSON document.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A service that finds places of a category around a position.
pub trait PlaceQuery: Send + Sync + 'static {
    fn query(
        &self,
        category: PlaceCategory,
        center: Position,
        radius_meters: u32,
    ) -> impl Future<Output = Result<Vec<PlaceOfInterest>, PlaceQueryError>> + Send;
}
