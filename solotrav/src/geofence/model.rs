//! Geofence state and classification.

use std::fmt;

use tracing::{debug, warn};

use crate::coord::Position;

/// Radius used until the user enters another one.
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

/// The current geofence: an optional center and a strictly positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceDefinition {
    center: Option<Position>,
    radius_meters: f64,
}

impl GeofenceDefinition {
    /// Center of the circle, or `None` while no geofence is active.
    pub fn center(&self) -> Option<Position> {
        self.center
    }

    /// Radius in meters. Always greater than zero.
    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Whether a center has been placed.
    pub fn is_active(&self) -> bool {
        self.center.is_some()
    }
}

impl Default for GeofenceDefinition {
    fn default() -> Self {
        Self {
            center: None,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}

/// Result of checking a position against the geofence.
///
/// Distances are rounded to the nearest meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    /// No center has been placed yet.
    NoGeofence,
    /// Within the radius (boundary included).
    Inside(u64),
    /// Beyond the radius.
    Outside(u64),
}

impl MembershipStatus {
    /// Rounded distance to the center, if a geofence is active.
    pub fn distance_meters(&self) -> Option<u64> {
        match self {
            MembershipStatus::NoGeofence => None,
            MembershipStatus::Inside(d) | MembershipStatus::Outside(d) => Some(*d),
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, MembershipStatus::Inside(_))
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, MembershipStatus::Outside(_))
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipStatus::NoGeofence => write!(f, "No geofence set"),
            MembershipStatus::Inside(d) => write!(f, "Inside geofence ({} m)", d),
            MembershipStatus::Outside(d) => write!(f, "Outside geofence ({} m)", d),
        }
    }
}

/// Holds the geofence definition and classifies positions against it.
///
/// The model never renders anything; callers project the returned
/// [`MembershipStatus`] onto the map themselves.
#[derive(Debug, Clone, Default)]
pub struct GeofenceModel {
    definition: GeofenceDefinition,
}

impl GeofenceModel {
    /// Create a model with no center and the default radius.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model with a custom starting radius.
    ///
    /// Falls back to [`DEFAULT_RADIUS_METERS`] when `radius_meters` is not a
    /// positive finite number.
    pub fn with_radius(radius_meters: f64) -> Self {
        let mut model = Self::new();
        if !model.set_radius_meters(radius_meters) {
            warn!(
                radius = radius_meters,
                fallback = DEFAULT_RADIUS_METERS,
                "Ignoring invalid initial geofence radius"
            );
        }
        model
    }

    /// Current definition.
    pub fn definition(&self) -> &GeofenceDefinition {
        &self.definition
    }

    /// Place (or move) the center. The radius is unchanged.
    pub fn set_center(&mut self, center: Position) {
        self.definition.center = Some(center);
    }

    /// Apply a radius typed by the user.
    ///
    /// The trimmed input must parse as a number greater than zero; anything
    /// else is ignored and the previous radius is kept. Returns whether the
    /// radius was accepted.
    pub fn set_radius(&mut self, input: &str) -> bool {
        match input.trim().parse::<f64>() {
            Ok(value) => self.set_radius_meters(value),
            Err(_) => {
                debug!(input, "Ignoring non-numeric geofence radius");
                false
            }
        }
    }

    /// Apply a radius in meters. Non-positive or non-finite values are ignored.
    pub fn set_radius_meters(&mut self, radius_meters: f64) -> bool {
        if radius_meters.is_finite() && radius_meters > 0.0 {
            self.definition.radius_meters = radius_meters;
            true
        } else {
            debug!(radius = radius_meters, "Ignoring non-positive geofence radius");
            false
        }
    }

    /// Classify a position against the current geofence.
    pub fn classify(&self, position: &Position) -> MembershipStatus {
        let Some(center) = self.definition.center else {
            return MembershipStatus::NoGeofence;
        };

        let distance = center.distance_to(position);
        let rounded = distance.round() as u64;

        if distance <= self.definition.radius_meters {
            MembershipStatus::Inside(rounded)
        } else {
            MembershipStatus::Outside(rounded)
        }
    }
}
