//! In-memory surface that records what would be drawn.

use std::collections::BTreeMap;

use super::surface::{Layer, LayerId, MapSurface, StatusTone};
use crate::coord::Position;
use crate::places::PlaceOfInterest;

/// A [`MapSurface`] that keeps the live layer set plus a log of status
/// changes and alerts. Intended for headless sessions and assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    opened: Option<(Position, u8)>,
    layers: BTreeMap<LayerId, Layer>,
    user_marker_creations: usize,
    pans: Vec<Position>,
    status: Option<(String, StatusTone)>,
    status_history: Vec<String>,
    alerts: Vec<String>,
    fatal: Option<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center and zoom the map was opened with.
    pub fn opened(&self) -> Option<(Position, u8)> {
        self.opened
    }

    /// Current position of the user marker.
    pub fn user_marker(&self) -> Option<Position> {
        self.layers.values().find_map(|layer| match layer {
            Layer::UserMarker { position, .. } => Some(*position),
            _ => None,
        })
    }

    /// How many times a user marker layer was added.
    pub fn user_marker_creations(&self) -> usize {
        self.user_marker_creations
    }

    /// Live geofence overlays as (center, radius).
    pub fn geofence_overlays(&self) -> Vec<(Position, f64)> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::GeofenceCircle {
                    center,
                    radius_meters,
                } => Some((*center, *radius_meters)),
                _ => None,
            })
            .collect()
    }

    /// Live place markers, in the order they were added.
    pub fn place_markers(&self) -> Vec<PlaceOfInterest> {
        self.layers
            .values()
            .filter_map(|layer| match layer {
                Layer::PlaceMarker { place, .. } => Some(place.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn last_pan(&self) -> Option<Position> {
        self.pans.last().copied()
    }

    /// Current status text and tone.
    pub fn status(&self) -> Option<(&str, StatusTone)> {
        self.status.as_ref().map(|(text, tone)| (text.as_str(), *tone))
    }

    /// Every status text set so far, oldest first.
    pub fn status_history(&self) -> &[String] {
        &self.status_history
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }
}

impl MapSurface for RecordingSurface {
    fn open(&mut self, center: Position, zoom: u8) {
        self.opened = Some((center, zoom));
    }

    fn add_layer(&mut self, id: LayerId, layer: Layer) {
        if matches!(layer, Layer::UserMarker { .. }) {
            self.user_marker_creations += 1;
        }
        self.layers.insert(id, layer);
    }

    fn move_layer(&mut self, id: LayerId, to: Position) {
        match self.layers.get_mut(&id) {
            Some(Layer::UserMarker { position, .. }) => *position = to,
            Some(Layer::PlaceMarker { place, .. }) => place.position = to,
            Some(Layer::GeofenceCircle { center, .. }) => *center = to,
            None => {}
        }
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn pan_to(&mut self, position: Position) {
        self.pans.push(position);
    }

    fn set_status(&mut self, text: &str, tone: StatusTone) {
        self.status_history.push(text.to_string());
        self.status = Some((text.to_string(), tone));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn fatal(&mut self, message: &str) {
        self.fatal = Some(message.to_string());
    }
}
