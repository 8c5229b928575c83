//! SoloTrav CLI - command-line interface
//!
//! Tracks the live gpsd position against a geofence and finds nearby police
//! stations and hospitals.

mod commands;
mod error;
mod input;
mod runner;
mod surface;

use clap::{Parser, Subcommand};

use commands::common::CategoryArg;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "solotrav", version, about = "Live geofence tracking with nearby emergency services")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the configuration file with default settings
    Init,

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Track the live position from gpsd against a geofence
    Track {
        /// gpsd host (overrides location.gpsd_host)
        #[arg(long)]
        gpsd_host: Option<String>,

        /// gpsd port (overrides location.gpsd_port)
        #[arg(long)]
        gpsd_port: Option<u16>,

        /// Initial geofence radius in meters (overrides geofence.radius)
        #[arg(long)]
        radius: Option<f64>,

        /// Overpass interpreter URL (overrides places.endpoint)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Find police stations or hospitals around a position
    Nearby {
        /// What to look for
        #[arg(value_enum)]
        category: CategoryArg,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in meters (overrides places.search_radius)
        #[arg(long)]
        radius: Option<u32>,

        /// Overpass interpreter URL (overrides places.endpoint)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Check whether a position lies inside a geofence
    Check {
        /// Geofence center latitude
        #[arg(long, allow_hyphen_values = true)]
        center_lat: f64,

        /// Geofence center longitude
        #[arg(long, allow_hyphen_values = true)]
        center_lon: f64,

        /// Position latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Position longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Geofence radius in meters (overrides geofence.radius)
        #[arg(long)]
        radius: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config { command } => commands::config::run(command),
        Commands::Track {
            gpsd_host,
            gpsd_port,
            radius,
            endpoint,
        } => commands::track::run(commands::track::TrackArgs {
            gpsd_host,
            gpsd_port,
            radius,
            endpoint,
        }),
        Commands::Nearby {
            category,
            lat,
            lon,
            radius,
            endpoint,
        } => commands::nearby::run(commands::nearby::NearbyArgs {
            category,
            lat,
            lon,
            radius,
            endpoint,
        }),
        Commands::Check {
            center_lat,
            center_lon,
            lat,
            lon,
            radius,
        } => commands::check::run(commands::check::CheckArgs {
            center_lat,
            center_lon,
            lat,
            lon,
            radius,
        }),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &CliError) {
    if !error.shown_on_surface() {
        eprintln!("Error: {}", error);
    }
}
