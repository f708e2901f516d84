//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres, used for great-circle distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 (latitude, longitude) pair.
///
/// Latitude is constrained to [-90, 90] and longitude to [-180, 180],
/// and both must be finite. Any `Coordinate` value is valid by
/// construction, so downstream code never re-checks ranges.
///
/// # Examples
///
/// ```
/// use nearby_server::domain::Coordinate;
///
/// let boston = Coordinate::new(42.3601, -71.0589).unwrap();
/// assert_eq!(boston.latitude(), 42.3601);
///
/// // Out-of-range latitude is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
///
/// // NaN is rejected
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Construct a coordinate, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be in [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be in [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another coordinate, in metres.
    ///
    /// Haversine formula on a spherical Earth. Accurate to well under a
    /// percent at walking scales, which is all the heuristic walk
    /// estimate needs.
    pub fn haversine_meters(&self, other: &Coordinate) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let dphi = (other.lat - self.lat).to_radians();
        let dlam = (other.lon - self.lon).to_radians();

        let a = (dphi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (dlam / 2.0).sin().powi(2);
        EARTH_RADIUS_M * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ranges() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(42.3601, -71.0589).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.01, 0.0).is_err());
        assert!(Coordinate::new(-90.01, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.01).is_err());
        assert!(Coordinate::new(0.0, -180.01).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = Coordinate::new(42.3601, -71.0589).unwrap();
        assert_eq!(p.haversine_meters(&p), 0.0);
    }

    #[test]
    fn haversine_known_distance() {
        // Park Street to Downtown Crossing, roughly 350 m apart.
        let park = Coordinate::new(42.35639, -71.06249).unwrap();
        let dtx = Coordinate::new(42.35542, -71.06025).unwrap();

        let d = park.haversine_meters(&dtx);
        assert!((150.0..400.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_symmetric() {
        let a = Coordinate::new(42.0, -71.0).unwrap();
        let b = Coordinate::new(42.1, -71.1).unwrap();
        assert!((a.haversine_meters(&b) - b.haversine_meters(&a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_latitude_is_about_111_km() {
        let a = Coordinate::new(42.0, -71.0).unwrap();
        let b = Coordinate::new(43.0, -71.0).unwrap();
        let d = a.haversine_meters(&b);
        assert!((d - 111_195.0).abs() < 200.0, "got {d}");
    }
}
