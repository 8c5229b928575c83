//! gpsd position source.
//!
//! Connects to a gpsd daemon, enables JSON watch mode and turns `TPV`
//! (time-position-velocity) reports with a 2D or 3D fix into positions.
//!
//! ```text
//! client ── ?WATCH={"enable":true,"json":true} ──► gpsd
//! client ◄── {"class":"VERSION",...}            ── gpsd
//! client ◄── {"class":"TPV","mode":3,"lat":..,"lon":..} ── gpsd
//! ```

use std::io;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use super::types::{PositionError, PositionOptions, PositionSource};
use super::watch::{PositionWatch, WatchSender};
use crate::coord::Position;

/// Default gpsd TCP port.
pub const DEFAULT_GPSD_PORT: u16 = 2947;

/// Command enabling streaming JSON reports.
const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true}\n";

/// Minimum TPV mode carrying a usable horizontal position (2 = 2D fix).
const MIN_FIX_MODE: u8 = 2;

/// Subset of a gpsd report we care about.
#[derive(Debug, Deserialize)]
struct GpsdReport {
    class: String,
    #[serde(default)]
    mode: u8,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Parse one line of gpsd output.
///
/// Returns `Ok(None)` for reports that carry no usable fix (other classes,
/// or a TPV without a 2D/3D fix).
pub fn parse_report(line: &str) -> Result<Option<Position>, PositionError> {
    let report: GpsdReport = serde_json::from_str(line)
        .map_err(|e| PositionError::Unavailable(format!("malformed gpsd report: {}", e)))?;

    if report.class != "TPV" || report.mode < MIN_FIX_MODE {
        return Ok(None);
    }

    match (report.lat, report.lon) {
        (Some(lat), Some(lon)) => Position::try_new(lat, lon)
            .map(Some)
            .map_err(|e| PositionError::Unavailable(e.to_string())),
        _ => Ok(None),
    }
}

/// What an open gpsd session produced next.
enum GpsdEvent {
    Fix(Position),
    /// A report that could not be used; the session stays open.
    Invalid(PositionError),
    /// The session is gone.
    Disconnected(String),
}

/// An open gpsd session yielding fixes.
struct GpsdReports {
    lines: Lines<BufReader<TcpStream>>,
}

impl GpsdReports {
    /// Read until the next usable fix, a bad report or the end of the session.
    async fn next_event(&mut self) -> GpsdEvent {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return GpsdEvent::Disconnected("gpsd closed the connection".to_string()),
                Err(e) => return GpsdEvent::Disconnected(format!("gpsd read failed: {}", e)),
            };
            match parse_report(&line) {
                Ok(Some(position)) => return GpsdEvent::Fix(position),
                Ok(None) => {}
                Err(e) => return GpsdEvent::Invalid(e),
            }
        }
    }
}

/// Delay between reconnection attempts of a watch.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Position source backed by a gpsd daemon.
///
/// A watch survives daemon restarts: a lost or refused connection is
/// reported as [`PositionError::Unavailable`] and retried after the
/// reconnect delay until the watch is cancelled.
#[derive(Debug, Clone)]
pub struct GpsdPositionSource {
    host: String,
    port: u16,
    reconnect_delay: Duration,
}

impl GpsdPositionSource {
    /// Create a source for the given gpsd host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    /// Set the delay between reconnection attempts.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn connect(&self, options: &PositionOptions) -> Result<GpsdReports, PositionError> {
        let address = self.address();
        debug!(
            address = %address,
            high_accuracy = options.enable_high_accuracy,
            "Connecting to gpsd"
        );

        let mut stream = TcpStream::connect(&address)
            .await
            .map_err(|e| map_io_error(&address, e))?;
        stream
            .write_all(WATCH_COMMAND)
            .await
            .map_err(|e| map_io_error(&address, e))?;

        Ok(GpsdReports {
            lines: BufReader::new(stream).lines(),
        })
    }
}

fn map_io_error(address: &str, error: io::Error) -> PositionError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => PositionError::PermissionDenied,
        _ => PositionError::Unavailable(format!("gpsd at {}: {}", address, error)),
    }
}

/// Forward fixes from one gpsd session.
///
/// Returns `true` when the session was lost and `false` when the watch is
/// gone.
async fn forward_session(
    tx: &WatchSender,
    reports: &mut GpsdReports,
    options: &PositionOptions,
) -> bool {
    loop {
        let next = tokio::select! {
            _ = tx.cancelled() => return false,
            next = tokio::time::timeout(options.timeout, reports.next_event()) => next,
        };

        let sample = match next {
            Ok(GpsdEvent::Fix(position)) => Ok(position),
            Ok(GpsdEvent::Invalid(e)) => Err(e),
            Ok(GpsdEvent::Disconnected(reason)) => {
                warn!(reason = %reason, "gpsd session lost");
                return tx.send(Err(PositionError::Unavailable(reason))).await;
            }
            Err(_) => Err(PositionError::timeout(options)),
        };
        if !tx.send(sample).await {
            return false;
        }
    }
}

impl PositionSource for GpsdPositionSource {
    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError> {
        let attempt = async {
            let mut reports = self.connect(options).await?;
            match reports.next_event().await {
                GpsdEvent::Fix(position) => Ok(position),
                GpsdEvent::Invalid(e) => Err(e),
                GpsdEvent::Disconnected(reason) => Err(PositionError::Unavailable(reason)),
            }
        };

        tokio::time::timeout(options.timeout, attempt)
            .await
            .map_err(|_| PositionError::timeout(options))?
    }

    fn watch(&self, options: &PositionOptions) -> PositionWatch {
        let (tx, watch) = PositionWatch::channel();
        let source = self.clone();
        let options = options.clone();

        tokio::spawn(async move {
            loop {
                let connected = tokio::select! {
                    _ = tx.cancelled() => break,
                    connected = source.connect(&options) => connected,
                };

                match connected {
                    Ok(mut reports) => {
                        info!(address = %source.address(), "Watching gpsd for position updates");
                        if !forward_session(&tx, &mut reports, &options).await {
                            break;
                        }
                    }
                    Err(e) => {
                        if !tx.send(Err(e)).await {
                            break;
                        }
                    }
                }

                debug!(delay_ms = source.reconnect_delay.as_millis() as u64, "Reconnecting to gpsd");
                tokio::select! {
                    _ = tx.cancelled() => break,
                    _ = tokio::time::sleep(source.reconnect_delay) => {}
                }
            }
            debug!("gpsd watch ended");
        });

        watch
    }
}
