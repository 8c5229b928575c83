//! Map view
//!
//! [`MapView`] owns everything drawn on the map: the single user marker, the
//! single geofence overlay, and the set of place markers. It talks to a
//! rendering backend through the [`MapSurface`] trait and keeps track of the
//! layer handles so that:
//!
//! - the user marker is moved, never recreated
//! - the old geofence overlay is removed before a new one is added
//! - all place markers are removed before a new set is added
//!
//! Clicks on the surface are delivered to the controller as
//! [`crate::app::AppEvent::MapClicked`].

mod recording;
mod surface;
mod view;

pub use recording::RecordingSurface;
pub use surface::{Layer, LayerId, MapSurface, PlaceIcon, StatusTone};
pub use view::{MapView, DEFAULT_ZOOM, NO_GEOFENCE_PROMPT, USER_MARKER_POPUP};
