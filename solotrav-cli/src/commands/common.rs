//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use solotrav::coord::Position;
use solotrav::places::{AsyncReqwestClient, OverpassClient, PlaceCategory};

use crate::error::CliError;

/// Place category selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum CategoryArg {
    /// Police stations
    Police,
    /// Hospitals
    Hospital,
}

impl From<CategoryArg> for PlaceCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Police => PlaceCategory::Police,
            CategoryArg::Hospital => PlaceCategory::Hospital,
        }
    }
}

/// Validate a latitude/longitude pair given on the command line.
pub fn position_arg(latitude: f64, longitude: f64) -> Result<Position, CliError> {
    Position::try_new(latitude, longitude).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Overpass client configured from the request timeout and endpoint.
pub fn overpass_client(
    endpoint: &str,
    request_timeout_secs: u64,
) -> Result<OverpassClient<AsyncReqwestClient>, CliError> {
    let http = AsyncReqwestClient::with_timeout(request_timeout_secs)?;
    Ok(OverpassClient::new(http).with_endpoint(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_arg_conversion() {
        assert_eq!(PlaceCategory::from(CategoryArg::Police), PlaceCategory::Police);
        assert_eq!(
            PlaceCategory::from(CategoryArg::Hospital),
            PlaceCategory::Hospital
        );
    }

    #[test]
    fn test_position_arg_rejects_out_of_range() {
        assert!(position_arg(52.5, 13.4).is_ok());
        assert!(matches!(
            position_arg(91.0, 0.0),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            position_arg(0.0, -181.0),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
