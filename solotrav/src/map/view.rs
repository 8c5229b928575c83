//! Map view: layer bookkeeping on top of a surface.

use tracing::debug;

use super::surface::{Layer, LayerId, MapSurface, PlaceIcon, StatusTone};
use crate::coord::Position;
use crate::geofence::{GeofenceDefinition, MembershipStatus};
use crate::places::PlaceOfInterest;

/// Zoom level used when the map is first shown.
pub const DEFAULT_ZOOM: u8 = 15;

/// Popup text of the user marker.
pub const USER_MARKER_POPUP: &str = "You are here";

/// Status text shown while no geofence is placed.
pub const NO_GEOFENCE_PROMPT: &str = "Click the map to set a geofence center.";

/// The map and everything drawn on it.
#[derive(Debug)]
pub struct MapView<S: MapSurface> {
    surface: S,
    zoom: u8,
    opened: bool,
    next_layer: u64,
    user_marker: Option<LayerId>,
    geofence_overlay: Option<LayerId>,
    place_markers: Vec<LayerId>,
}

impl<S: MapSurface> MapView<S> {
    /// Create a closed view over a surface.
    pub fn new(surface: S, zoom: u8) -> Self {
        Self {
            surface,
            zoom,
            opened: false,
            next_layer: 1,
            user_marker: None,
            geofence_overlay: None,
            place_markers: Vec::new(),
        }
    }

    /// Show the map centered on `center` and place the user marker there.
    pub fn open(&mut self, center: Position) {
        if self.opened {
            debug!("Map already open, recentering");
            self.surface.pan_to(center);
        } else {
            self.surface.open(center, self.zoom);
            self.opened = true;
        }
        self.update_user_position(center);
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Move the user marker and follow it.
    pub fn update_user_position(&mut self, position: Position) {
        if !self.opened {
            debug!("Ignoring user position before the map is open");
            return;
        }

        match self.user_marker {
            Some(id) => self.surface.move_layer(id, position),
            None => {
                let id = self.allocate();
                self.surface.add_layer(
                    id,
                    Layer::UserMarker {
                        position,
                        popup: USER_MARKER_POPUP.to_string(),
                    },
                );
                self.user_marker = Some(id);
            }
        }
        self.surface.pan_to(position);
    }

    /// Redraw the geofence overlay from `definition`.
    ///
    /// The previous overlay is always removed first. Nothing is drawn while
    /// the definition has no center.
    pub fn draw_geofence(&mut self, definition: &GeofenceDefinition) {
        let Some(center) = definition.center() else {
            return;
        };
        if !self.opened {
            debug!("Ignoring geofence redraw before the map is open");
            return;
        }

        if let Some(old) = self.geofence_overlay.take() {
            self.surface.remove_layer(old);
        }

        let id = self.allocate();
        self.surface.add_layer(
            id,
            Layer::GeofenceCircle {
                center,
                radius_meters: definition.radius_meters(),
            },
        );
        self.geofence_overlay = Some(id);
    }

    /// Remove every place marker.
    pub fn clear_places(&mut self) {
        for id in self.place_markers.drain(..) {
            self.surface.remove_layer(id);
        }
    }

    /// Replace the place markers with `places`.
    pub fn replace_places(&mut self, places: &[PlaceOfInterest]) {
        self.clear_places();
        if !self.opened {
            debug!("Ignoring places before the map is open");
            return;
        }

        for place in places {
            let id = self.allocate();
            self.surface.add_layer(
                id,
                Layer::PlaceMarker {
                    place: place.clone(),
                    icon: PlaceIcon::for_category(place.category),
                },
            );
            self.place_markers.push(id);
        }
    }

    /// Project a membership status onto the status region.
    pub fn render_status(&mut self, status: &MembershipStatus) {
        match status {
            MembershipStatus::NoGeofence => {
                self.surface.set_status(NO_GEOFENCE_PROMPT, StatusTone::Neutral)
            }
            MembershipStatus::Inside(_) => {
                self.surface.set_status(&status.to_string(), StatusTone::Affirmative)
            }
            MembershipStatus::Outside(_) => {
                self.surface.set_status(&status.to_string(), StatusTone::Warning)
            }
        }
    }

    /// Show informational text with no styling.
    pub fn show_prompt(&mut self, text: &str) {
        self.surface.set_status(text, StatusTone::Neutral);
    }

    pub fn alert(&mut self, message: &str) {
        self.surface.alert(message);
    }

    pub fn show_fatal(&mut self, message: &str) {
        self.surface.fatal(message);
    }

    /// Number of place markers currently drawn.
    pub fn place_marker_count(&self) -> usize {
        self.place_markers.len()
    }

    pub fn has_geofence_overlay(&self) -> bool {
        self.geofence_overlay.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn allocate(&mut self) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        id
    }
}
