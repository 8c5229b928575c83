//! Check command - classify one position against a geofence.

use console::style;
use solotrav::geofence::{GeofenceModel, MembershipStatus};

use super::common::position_arg;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the check command.
#[derive(Debug)]
pub struct CheckArgs {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<String>,
}

/// Run the check command.
pub fn run(args: CheckArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("check");

    let center = position_arg(args.center_lat, args.center_lon)?;
    let position = position_arg(args.lat, args.lon)?;

    let mut geofence = GeofenceModel::with_radius(runner.config().geofence.radius);
    if let Some(radius) = &args.radius {
        if !geofence.set_radius(radius) {
            return Err(CliError::InvalidArgument(format!(
                "radius must be a positive number of meters, got '{}'",
                radius
            )));
        }
    }
    geofence.set_center(center);

    let status = geofence.classify(&position);
    println!(
        "Geofence: {} (radius {} m)",
        center,
        geofence.definition().radius_meters()
    );
    println!("Position: {}", position);
    println!("{}", styled_status(&status));
    Ok(())
}

fn styled_status(status: &MembershipStatus) -> String {
    match status {
        MembershipStatus::Inside(_) => style(status).green().to_string(),
        MembershipStatus::Outside(_) => style(status).red().to_string(),
        MembershipStatus::NoGeofence => status.to_string(),
    }
}
