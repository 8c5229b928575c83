//! Track command - live geofence session against gpsd.
//!
//! Reads user controls from stdin and renders the map to the terminal.

use solotrav::app::{AppConfig, AppController, AppEvent};
use solotrav::position::GpsdPositionSource;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::common::overpass_client;
use crate::error::CliError;
use crate::input::{parse_command, Input, HELP};
use crate::runner::CliRunner;
use crate::surface::TerminalSurface;

/// Arguments for the track command.
#[derive(Debug)]
pub struct TrackArgs {
    pub gpsd_host: Option<String>,
    pub gpsd_port: Option<u16>,
    pub radius: Option<f64>,
    pub endpoint: Option<String>,
}

/// Run the track command.
pub fn run(args: TrackArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("track");

    let config = runner.config();
    let host = args
        .gpsd_host
        .unwrap_or_else(|| config.location.gpsd_host.clone());
    let port = args.gpsd_port.unwrap_or(config.location.gpsd_port);
    let endpoint = args
        .endpoint
        .unwrap_or_else(|| config.places.endpoint.clone());

    let mut app_config = AppConfig::from_config_file(config);
    if let Some(radius) = args.radius {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CliError::InvalidArgument(format!(
                "radius must be a positive number of meters, got {}",
                radius
            )));
        }
        app_config = app_config.with_initial_radius(radius);
    }

    let source = GpsdPositionSource::new(host, port);
    let places = overpass_client(&endpoint, config.places.request_timeout)?;
    let runtime = runner.runtime()?;

    println!("Connecting to gpsd at {}...", source.address());
    let result = runtime.block_on(async move {
        let mut app = AppController::new(app_config, source, TerminalSurface::stdout(), places);
        app.start().await?;

        println!("{}", HELP);
        let (events_tx, events_rx) = mpsc::channel(16);
        tokio::spawn(read_controls(events_tx));

        app.run(events_rx).await?;
        info!("Tracking stopped");
        Ok::<(), CliError>(())
    });

    // The stdin reader may still be blocked on a read.
    runtime.shutdown_background();
    result
}

/// Forward stdin lines to the session as events. EOF quits.
async fn read_controls(events: mpsc::Sender<AppEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => {
                let _ = events.send(AppEvent::Quit).await;
                return;
            }
        };

        match parse_command(&line) {
            Ok(Input::Event(event)) => {
                let quit = matches!(event, AppEvent::Quit);
                if events.send(event).await.is_err() || quit {
                    return;
                }
            }
            Ok(Input::Help) => println!("{}", HELP),
            Ok(Input::Empty) => {}
            Err(message) => {
                debug!(line = %line, "Unrecognized input");
                println!("{}", message);
            }
        }
    }
}
