//! Rendering backend contract.

use std::fmt;

use crate::coord::Position;
use crate::places::{PlaceCategory, PlaceOfInterest};

/// Handle of a layer added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Color scheme of the status region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// No styling.
    Neutral,
    /// Inside the geofence (green).
    Affirmative,
    /// Outside the geofence (red).
    Warning,
}

/// Icon drawn for a place marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceIcon {
    /// Icon glyph name.
    pub glyph: &'static str,
    /// CSS-style hex color.
    pub color: &'static str,
}

impl PlaceIcon {
    /// Icon used for a place category.
    pub fn for_category(category: PlaceCategory) -> Self {
        match category {
            PlaceCategory::Hospital => PlaceIcon {
                glyph: "house-chimney-medical",
                color: "#d32f2f",
            },
            PlaceCategory::Police => PlaceIcon {
                glyph: "siren-on",
                color: "#1565c0",
            },
        }
    }
}

/// Something drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// The user's live position.
    UserMarker { position: Position, popup: String },
    /// The geofence circle.
    GeofenceCircle {
        center: Position,
        radius_meters: f64,
    },
    /// A nearby place returned by a query.
    PlaceMarker {
        place: PlaceOfInterest,
        icon: PlaceIcon,
    },
}

/// Primitive operations a map backend provides.
///
/// Layer ids are allocated by [`super::MapView`]; backends only store them.
pub trait MapSurface: Send {
    /// Show the map centered on `center` at `zoom`.
    fn open(&mut self, center: Position, zoom: u8);

    /// Add a layer under the given id.
    fn add_layer(&mut self, id: LayerId, layer: Layer);

    /// Move an existing point layer.
    fn move_layer(&mut self, id: LayerId, position: Position);

    /// Remove a layer. Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);

    /// Pan the viewport so `position` is centered.
    fn pan_to(&mut self, position: Position);

    /// Replace the status text and its tone.
    fn set_status(&mut self, text: &str, tone: StatusTone);

    /// Show a dismissable message.
    fn alert(&mut self, message: &str);

    /// Show a blocking error. Nothing else is shown afterwards.
    fn fatal(&mut self, message: &str);
}
