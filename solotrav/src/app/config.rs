//! Session configuration.

use std::time::Duration;

use crate::config::ConfigFile;
use crate::geofence::DEFAULT_RADIUS_METERS;
use crate::map::DEFAULT_ZOOM;
use crate::places::DEFAULT_SEARCH_RADIUS_METERS;
use crate::position::PositionOptions;

/// Everything a session needs besides its collaborators.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Geofence radius before the user changes it.
    pub initial_radius_meters: f64,
    /// Zoom level of the map when first shown.
    pub zoom: u8,
    /// Options for every position fix.
    pub position: PositionOptions,
    /// Radius of nearby place searches.
    pub search_radius_meters: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_radius_meters: DEFAULT_RADIUS_METERS,
            zoom: DEFAULT_ZOOM,
            position: PositionOptions::default(),
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}

impl AppConfig {
    /// Create session config from the configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            initial_radius_meters: config.geofence.radius,
            zoom: config.map.zoom,
            position: PositionOptions::default()
                .with_timeout(Duration::from_millis(config.location.timeout_ms)),
            search_radius_meters: config.places.search_radius,
        }
    }

    /// Set the initial geofence radius.
    pub fn with_initial_radius(mut self, radius_meters: f64) -> Self {
        self.initial_radius_meters = radius_meters;
        self
    }

    /// Set the place search radius.
    pub fn with_search_radius(mut self, radius_meters: u32) -> Self {
        self.search_radius_meters = radius_meters;
        self
    }
}
