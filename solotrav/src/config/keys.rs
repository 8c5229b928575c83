//! Addressable configuration keys (`section.key`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFile;
use super::ConfigError;

/// Every key that can be read or written in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GeofenceRadius,
    MapZoom,
    LocationGpsdHost,
    LocationGpsdPort,
    LocationTimeoutMs,
    PlacesEndpoint,
    PlacesSearchRadius,
    PlacesRequestTimeout,
    LoggingDirectory,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::GeofenceRadius,
            ConfigKey::MapZoom,
            ConfigKey::LocationGpsdHost,
            ConfigKey::LocationGpsdPort,
            ConfigKey::LocationTimeoutMs,
            ConfigKey::PlacesEndpoint,
            ConfigKey::PlacesSearchRadius,
            ConfigKey::PlacesRequestTimeout,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::GeofenceRadius => "geofence",
            ConfigKey::MapZoom => "map",
            ConfigKey::LocationGpsdHost
            | ConfigKey::LocationGpsdPort
            | ConfigKey::LocationTimeoutMs => "location",
            ConfigKey::PlacesEndpoint
            | ConfigKey::PlacesSearchRadius
            | ConfigKey::PlacesRequestTimeout => "places",
            ConfigKey::LoggingDirectory => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::GeofenceRadius => "radius",
            ConfigKey::MapZoom => "zoom",
            ConfigKey::LocationGpsdHost => "gpsd_host",
            ConfigKey::LocationGpsdPort => "gpsd_port",
            ConfigKey::LocationTimeoutMs => "timeout_ms",
            ConfigKey::PlacesEndpoint => "endpoint",
            ConfigKey::PlacesSearchRadius => "search_radius",
            ConfigKey::PlacesRequestTimeout => "request_timeout",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value rendered as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::GeofenceRadius => config.geofence.radius.to_string(),
            ConfigKey::MapZoom => config.map.zoom.to_string(),
            ConfigKey::LocationGpsdHost => config.location.gpsd_host.clone(),
            ConfigKey::LocationGpsdPort => config.location.gpsd_port.to_string(),
            ConfigKey::LocationTimeoutMs => config.location.timeout_ms.to_string(),
            ConfigKey::PlacesEndpoint => config.places.endpoint.clone(),
            ConfigKey::PlacesSearchRadius => config.places.search_radius.to_string(),
            ConfigKey::PlacesRequestTimeout => config.places.request_timeout.to_string(),
            ConfigKey::LoggingDirectory => config.logging.directory.to_string_lossy().to_string(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::GeofenceRadius => {
                let radius: f64 = self.parse(value)?;
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(self.invalid(value, "must be a positive number of meters"));
                }
                config.geofence.radius = radius;
            }
            ConfigKey::MapZoom => {
                let zoom: u8 = self.parse(value)?;
                if zoom > 19 {
                    return Err(self.invalid(value, "must be between 0 and 19"));
                }
                config.map.zoom = zoom;
            }
            ConfigKey::LocationGpsdHost => {
                if value.is_empty() {
                    return Err(self.invalid(value, "must not be empty"));
                }
                config.location.gpsd_host = value.to_string();
            }
            ConfigKey::LocationGpsdPort => config.location.gpsd_port = self.parse(value)?,
            ConfigKey::LocationTimeoutMs => {
                config.location.timeout_ms = self.parse_positive(value)?;
            }
            ConfigKey::PlacesEndpoint => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(self.invalid(value, "must be an http(s) URL"));
                }
                config.places.endpoint = value.to_string();
            }
            ConfigKey::PlacesSearchRadius => {
                config.places.search_radius = self.parse_positive(value)? as u32;
            }
            ConfigKey::PlacesRequestTimeout => {
                config.places.request_timeout = self.parse_positive(value)?;
            }
            ConfigKey::LoggingDirectory => {
                if value.is_empty() {
                    return Err(self.invalid(value, "must not be empty"));
                }
                config.logging.directory = PathBuf::from(value);
            }
        }
        Ok(())
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigError> {
        value
            .parse()
            .map_err(|_| self.invalid(value, "not a valid number"))
    }

    fn parse_positive(&self, value: &str) -> Result<u64, ConfigError> {
        let parsed: u64 = self.parse(value)?;
        if parsed == 0 || parsed > u32::MAX as u64 {
            return Err(self.invalid(value, "must be a positive integer"));
        }
        Ok(parsed)
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
