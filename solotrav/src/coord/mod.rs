//! Coordinate module
//!
//! Provides the [`Position`] type shared by every other module and the
//! great-circle distance used for geofence membership.

mod types;

pub use types::{CoordError, Position, EARTH_RADIUS_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Haversine distance between two positions in meters.
///
/// Uses a sphere of radius [`EARTH_RADIUS_M`].
#[inline]
pub fn haversine_distance(from: &Position, to: &Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Position::new(52.52, 13.405);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_berlin_to_paris() {
        let berlin = Position::new(52.5200, 13.4050);
        let paris = Position::new(48.8566, 2.3522);

        let km = haversine_distance(&berlin, &paris) / 1000.0;
        assert!((km - 878.0).abs() < 10.0, "got {} km", km);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Position::new(40.7128, -74.0060);
        let b = Position::new(40.7306, -73.9352);
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_small_longitude_offset_on_equator() {
        // 0.0045° of longitude on the equator is just over 500 m
        let center = Position::new(0.0, 0.0);
        let sample = Position::new(0.0, 0.0045);

        let meters = center.distance_to(&sample);
        assert!(meters > 500.0 && meters < 501.0, "got {} m", meters);
    }

    #[test]
    fn test_try_new_rejects_invalid_latitude() {
        let result = Position::try_new(91.0, 0.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_try_new_rejects_nan_longitude() {
        let result = Position::try_new(0.0, f64::NAN);
        assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
    }

    #[test]
    fn test_position_display() {
        let p = Position::new(1.5, -2.25);
        assert_eq!(p.to_string(), "1.500000, -2.250000");
    }
}
