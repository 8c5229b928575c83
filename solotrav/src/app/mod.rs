//! Session controller.
//!
//! [`AppController`] is the single owner of a session: the position source,
//! the geofence model, the map view and the place query service. All state is
//! touched from one event loop, so no locking is involved.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──(initial fix ok)────► Ready ◄──┐ samples, clicks, radius,
//!       │                                 └─────┘ place requests
//!       └────────(initial fix fails)───► Failed (terminal)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut app = AppController::new(config, source, surface, places);
//! app.start().await?;
//! app.run(events).await?;
//! ```

mod config;
mod controller;
mod error;
mod events;

pub use config::AppConfig;
pub use controller::{
    no_results_message, AppController, GEOFENCE_SET_PROMPT, LOCATION_NOT_READY,
    PLACES_FAILED_MESSAGE,
};
pub use error::AppError;
pub use events::{AppEvent, AppState, QueryCompletion};
