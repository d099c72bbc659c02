use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::error::{Error, Result};

/// Capability required of a graph coordinate.
///
/// Coordinates double as vertex identities, so equality and hashing must be
/// consistent and must not change for the lifetime of a graph. The distance
/// is expected in the same unit as edge lengths; the A* heuristic divides it
/// by a speed to obtain a time estimate.
pub trait Location: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// Non-negative distance between `self` and `other`.
    fn distance(&self, other: &Self) -> f64;
}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    fn key(&self) -> (u64, u64) {
        (
            normalize_zero(self.latitude).to_bits(),
            normalize_zero(self.longitude).to_bits(),
        )
    }
}

// `-0.0` and `0.0` name the same place; give them one bit pattern.
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl Location for GeoPoint {
    /// Great-circle (haversine) distance in kilometres.
    fn distance(&self, other: &Self) -> f64 {
        Haversine.distance(self.point(), other.point()) / 1000.0
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        normalize_zero(self.latitude)
            .total_cmp(&normalize_zero(other.latitude))
            .then_with(|| {
                normalize_zero(self.longitude).total_cmp(&normalize_zero(other.longitude))
            })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = Error;

    /// Parse `"<latitude>,<longitude>"`, tolerating whitespace around either value.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidLocation {
            input: input.to_string(),
        };

        let (lat, lon) = input.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equal_fields_mean_equal_points() {
        let a = GeoPoint::new(32.8648772, -117.2254046);
        let b = GeoPoint::new(32.8648772, -117.2254046);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b), "equal points hash identically");
    }

    #[test]
    fn negative_zero_is_the_same_point() {
        let a = GeoPoint::new(0.0, 1.0);
        let b = GeoPoint::new(-0.0, 1.0);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = GeoPoint::new(1.0, 1.0);
        let b = GeoPoint::new(8.0, -1.0);
        assert_eq!(a.distance(&a), 0.0);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        assert!((a.distance(&b) - 111.195).abs() < 0.01);
    }

    #[test]
    fn longitude_degrees_shrink_towards_the_poles() {
        let equator = GeoPoint::new(0.0, 0.0).distance(&GeoPoint::new(0.0, 1.0));
        let north = GeoPoint::new(60.0, 0.0).distance(&GeoPoint::new(60.0, 1.0));
        assert!((north - equator / 2.0).abs() < 0.01);
    }

    #[test]
    fn serializes_as_named_fields() {
        let json = serde_json::to_value(GeoPoint::new(1.5, -2.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "latitude": 1.5, "longitude": -2.0 }));
    }

    #[test]
    fn parses_latitude_longitude_pairs() {
        let point: GeoPoint = " 32.86, -117.22 ".parse().expect("valid point");
        assert_eq!(point, GeoPoint::new(32.86, -117.22));
    }

    #[test]
    fn rejects_malformed_points() {
        for input in ["", "1.0", "a,b", "1.0;2.0", "NaN,1.0"] {
            let err = input.parse::<GeoPoint>().expect_err(input);
            assert!(matches!(err, Error::InvalidLocation { .. }));
        }
    }
}
