use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "lon", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside their geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// NaN components propagate to a NaN result; validate with
/// [`Coordinate::is_valid`] first when the input is untrusted.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp keeps antipodal rounding inside asin's domain; NaN passes through.
    let c = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn identical_points_are_zero_apart() {
        let p = Coordinate::new(48.8566, 2.3522);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let berlin = Coordinate::new(52.52, 13.405);
        let there = haversine_km(paris, berlin);
        let back = haversine_km(berlin, paris);
        assert!((there - back).abs() < TOLERANCE);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.194_926_6).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn paris_to_berlin_is_about_878_km() {
        let d = Coordinate::new(48.8566, 2.3522).distance_to(&Coordinate::new(52.52, 13.405));
        assert!((d - 877.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn triangle_inequality_holds() {
        let a = Coordinate::new(40.7128, -74.006);
        let b = Coordinate::new(41.8781, -87.6298);
        let c = Coordinate::new(34.0522, -118.2437);
        assert!(haversine_km(a, c) <= haversine_km(a, b) + haversine_km(b, c) + TOLERANCE);
    }

    #[test]
    fn nan_propagates() {
        let d = haversine_km(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(d.is_nan(), "expected NaN, got {d}");
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, f64::NAN));
        assert!(d.is_nan(), "expected NaN, got {d}");
    }

    #[test]
    fn infinite_components_do_not_produce_a_distance() {
        let d = haversine_km(Coordinate::new(f64::INFINITY, 0.0), Coordinate::new(0.0, 0.0));
        assert!(d.is_nan(), "expected NaN, got {d}");
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::INFINITY, 0.0).is_valid());
    }
}
