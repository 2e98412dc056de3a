//! Great-circle distance math.

use crate::models::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two points in kilometers using the Haversine
/// formula.
///
/// This is the standard formula for great-circle distance between two
/// points on a sphere given their latitudes and longitudes. Symmetric in
/// its arguments and zero for identical points.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(28.6139, 77.2090);
        assert!(haversine_distance(p, p) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(28.6315, 77.2167);
        let b = Coordinate::new(28.4595, 77.0266);
        let d1 = haversine_distance(a, b);
        let d2 = haversine_distance(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn quarter_circumference_along_equator() {
        // (0,0) to (0,90) is a quarter of the Earth's circumference, ~10007.5 km.
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 90.0));
        assert!((d - 10_007.5).abs() < 100.0, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~111 km between these points (1 degree latitude)
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }
}
