//! Nearby command - one-shot search for police stations or hospitals.

use solotrav::app::no_results_message;
use solotrav::places::{PlaceCategory, PlaceOfInterest, PlaceQuery};
use tracing::{error, info};

use super::common::{overpass_client, position_arg, CategoryArg};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the nearby command.
#[derive(Debug)]
pub struct NearbyArgs {
    pub category: CategoryArg,
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<u32>,
    pub endpoint: Option<String>,
}

/// Run the nearby command.
pub fn run(args: NearbyArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("nearby");

    let config = runner.config();
    let category = PlaceCategory::from(args.category);
    let center = position_arg(args.lat, args.lon)?;
    let radius = args.radius.unwrap_or(config.places.search_radius);
    if radius == 0 {
        return Err(CliError::InvalidArgument(
            "search radius must be greater than 0".to_string(),
        ));
    }
    let endpoint = args
        .endpoint
        .unwrap_or_else(|| config.places.endpoint.clone());

    let client = overpass_client(&endpoint, config.places.request_timeout)?;
    let runtime = runner.runtime()?;
    info!(
        %category,
        %center,
        radius,
        endpoint = client.endpoint(),
        "Querying nearby places"
    );

    println!(
        "Searching for {} within {} m of {}...",
        category.plural(),
        radius,
        center
    );
    let places = runtime
        .block_on(client.query(category, center, radius))
        .map_err(|e| {
            error!(%category, error = %e, "Nearby query failed");
            CliError::Places(e)
        })?;

    info!(%category, count = places.len(), "Nearby query complete");
    print!("{}", render_places(category, radius, &places));
    Ok(())
}

fn render_places(category: PlaceCategory, radius: u32, places: &[PlaceOfInterest]) -> String {
    if places.is_empty() {
        return format!("{}\n", no_results_message(category, radius));
    }

    let mut out = format!("Found {} {}:\n", places.len(), category.plural());
    for place in places {
        out.push_str(&format!("  {:<40} {}\n", place.label, place.position));
    }
    out
}
