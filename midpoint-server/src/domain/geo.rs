//! Great-circle distance and midpoint computation.

use super::Coordinate;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default radius for station searches around the midpoint (3 km).
pub const STATION_SEARCH_RADIUS_METERS: u32 = 3000;

/// Default radius for place searches around the active anchor (1 km).
pub const PLACE_SEARCH_RADIUS_METERS: u32 = 1000;

/// Great-circle distance between two coordinates, rounded to the nearest meter.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
///
/// # Examples
///
/// ```
/// use midpoint_server::domain::{Coordinate, distance_meters};
///
/// let a = Coordinate::new(35.681, 139.767).unwrap();
/// let b = Coordinate::new(35.658, 139.701).unwrap();
/// assert_eq!(distance_meters(a, b), distance_meters(b, a));
/// assert_eq!(distance_meters(a, a), 0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> u32 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = (b.latitude() - a.latitude()).to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let half_phi = (d_phi / 2.0).sin();
    let half_lambda = (d_lambda / 2.0).sin();
    let h = half_phi * half_phi + phi1.cos() * phi2.cos() * half_lambda * half_lambda;
    // Rounding error can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    (EARTH_RADIUS_METERS * c).round() as u32
}

/// Arithmetic mean of two coordinates.
///
/// This is a flat-plane average, not the geodesic midpoint. It is close
/// enough for two locations in the same city but drifts near the poles and
/// is wrong across the antimeridian.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::from_valid(
        (a.latitude() + b.latitude()) / 2.0,
        (a.longitude() + b.longitude()) / 2.0,
    )
}
