//! SoloTrav - live geofence tracking and nearby emergency services
//!
//! This library keeps a map centered on the user's live position, checks that
//! position against a circular geofence the user places by clicking the map,
//! and looks up nearby police stations and hospitals through the Overpass API.
//!
//! # Architecture
//!
//! ```text
//! PositionSource ──► AppController ──► GeofenceModel (classify)
//!                         │  ▲
//!                         │  └──── AppEvent (click, radius, find nearby)
//!                         ▼
//!                      MapView ──► MapSurface (terminal, recording, ...)
//!                         ▲
//!   PlaceQuery (Overpass) ┘ (last query wins)
//! ```

pub mod app;
pub mod config;
pub mod coord;
pub mod geofence;
pub mod logging;
pub mod map;
pub mod places;
pub mod position;

/// Library version, shared with the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
