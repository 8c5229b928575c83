//! Loading and saving the INI configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use super::keys::ConfigKey;
use super::{config_file_path, default_log_dir, ConfigError};
use crate::geofence::DEFAULT_RADIUS_METERS;
use crate::map::DEFAULT_ZOOM;
use crate::places::{DEFAULT_OVERPASS_ENDPOINT, DEFAULT_SEARCH_RADIUS_METERS};
use crate::position::{DEFAULT_FIX_TIMEOUT, DEFAULT_GPSD_PORT};

/// `[geofence]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceSettings {
    /// Initial radius in meters.
    pub radius: f64,
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub zoom: u8,
}

/// `[location]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    pub gpsd_host: String,
    pub gpsd_port: u16,
    /// Per-fix timeout in milliseconds.
    pub timeout_ms: u64,
}

/// `[places]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesSettings {
    pub endpoint: String,
    /// Search radius in meters.
    pub search_radius: u32,
    /// HTTP request timeout in seconds.
    pub request_timeout: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub geofence: GeofenceSettings,
    pub map: MapSettings,
    pub location: LocationSettings,
    pub places: PlacesSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            geofence: GeofenceSettings {
                radius: DEFAULT_RADIUS_METERS,
            },
            map: MapSettings { zoom: DEFAULT_ZOOM },
            location: LocationSettings {
                gpsd_host: "127.0.0.1".to_string(),
                gpsd_port: DEFAULT_GPSD_PORT,
                timeout_ms: DEFAULT_FIX_TIMEOUT.as_millis() as u64,
            },
            places: PlacesSettings {
                endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
                search_radius: DEFAULT_SEARCH_RADIUS_METERS,
                request_timeout: 30,
            },
            logging: LoggingSettings {
                directory: default_log_dir(),
            },
        }
    }
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Build from parsed INI data. Absent keys keep their defaults; unknown
    /// keys are ignored.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Serialize every key to INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to a specific path, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.ini")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.geofence.radius, 500.0);
        assert_eq!(config.places.search_radius, 3000);
        assert_eq!(config.location.timeout_ms, 7000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.geofence.radius = 750.0;
        config.location.gpsd_host = "gps.local".to_string();
        config.places.endpoint = "https://overpass.example/api/interpreter".to_string();
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[map]\nzoom = 12\n\n[other]\nkey = value\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.geofence.radius, 500.0);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[geofence]\nradius = -5\n").unwrap();

        let result = ConfigFile::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
