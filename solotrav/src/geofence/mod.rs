//! Geofence membership
//!
//! A geofence is a single circle (center + radius). The center is placed by
//! clicking the map; until then there is no geofence and every position
//! classifies as [`MembershipStatus::NoGeofence`].
//!
//! # Example
//!
//! ```
//! use solotrav::coord::Position;
//! use solotrav::geofence::{GeofenceModel, MembershipStatus};
//!
//! let mut model = GeofenceModel::new();
//! model.set_center(Position::new(0.0, 0.0));
//! model.set_radius("750");
//!
//! let status = model.classify(&Position::new(0.0, 0.0045));
//! assert_eq!(status, MembershipStatus::Inside(500));
//! ```

mod model;

pub use model::{GeofenceDefinition, GeofenceModel, MembershipStatus, DEFAULT_RADIUS_METERS};
