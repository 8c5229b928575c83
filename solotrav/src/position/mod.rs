//! Position sources
//!
//! A [`PositionSource`] wraps a location sensor. It offers two contracts:
//!
//! - [`PositionSource::current_position`]: a one-shot fix used at startup.
//!   Its failure is fatal to the session.
//! - [`PositionSource::watch`]: a continuous subscription returned as a
//!   [`PositionWatch`] handle. Individual failures in the stream are
//!   reported as `Err` items and the stream keeps going.
//!
//! # Backends
//!
//! - [`GpsdPositionSource`]: reads TPV reports from a gpsd daemon over TCP
//! - [`ChannelPositionSource`]: positions pushed through a [`PositionFeed`]

mod channel;
mod gpsd;
mod types;
mod watch;

pub use channel::{ChannelPositionSource, PositionFeed};
pub use gpsd::{parse_report, GpsdPositionSource, DEFAULT_GPSD_PORT, DEFAULT_RECONNECT_DELAY};
pub use types::{PositionError, PositionOptions, PositionSource, DEFAULT_FIX_TIMEOUT};
pub use watch::{PositionWatch, WatchSender};
