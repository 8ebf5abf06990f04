use std::fmt;
use std::hash::{Hash, Hasher};

use crate::Point;
use crate::bearing::initial_bearing;
use crate::haversine::haversine_distance;
use crate::intersection::{intersection, Intersection};

/// A point on the earth.
///
/// Latitude and longitude are either a value inside their legal range or
/// unknown. Out-of-range input does not fail, it just leaves that axis unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f64>,
    bearing: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::from_parts(Some(latitude), Some(longitude))
    }

    /// Builds a coordinate from optional axes. Missing axes stay unknown.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Coordinate {
        Coordinate {
            latitude: latitude.and_then(|it| within(it, 90.)),
            longitude: longitude.and_then(|it| within(it, 180.)),
            altitude: None,
            bearing: None,
        }
    }

    /// A coordinate with no known location.
    pub fn unknown() -> Coordinate {
        Coordinate::default()
    }

    /// Altitude in feet. Non-finite values clear it.
    pub fn with_altitude(self, altitude: f64) -> Coordinate {
        Coordinate { altitude: finite(altitude), ..self }
    }

    /// Bearing in degrees. Non-finite values clear it.
    pub fn with_bearing(self, bearing: f64) -> Coordinate {
        Coordinate { bearing: finite(bearing), ..self }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Great-circle distance in miles, `None` if either side has no location.
    pub fn distance_to(&self, other: &dyn Point) -> Option<f64> {
        haversine_distance(self, other)
    }

    /// Initial bearing in degrees `[0, 360)` towards `other`.
    pub fn bearing_to(&self, other: &dyn Point) -> Option<f64> {
        initial_bearing(self, other)
    }

    /// Where the path leaving `self` on `bearing` crosses the path leaving
    /// `other` on `other_bearing`.
    pub fn intersection_with(&self, bearing: f64, other: &Coordinate, other_bearing: f64) -> Intersection {
        intersection(self, bearing, other, other_bearing)
    }

    /// Parses a `"<lat>,<lon>"` pair.
    ///
    /// Never fails: `None`, anything but two numeric segments, or values out
    /// of range produce a coordinate without (part of) its location.
    pub fn parse_lat_lon(text: Option<&str>) -> Coordinate {
        let text = match text {
            Some(text) => text,
            None => return Coordinate::unknown(),
        };

        let parts = text.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();

        if parts.len() != 2 {
            return Coordinate::unknown();
        }

        match (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => Coordinate::new(latitude, longitude),
            _ => Coordinate::unknown(),
        }
    }

    fn key(&self) -> (Option<u64>, Option<u64>, Option<u64>) {
        (bits(self.latitude), bits(self.longitude), bits(self.altitude))
    }
}

fn within(value: f64, limit: f64) -> Option<f64> {
    if value >= -limit && value <= limit { Some(value) } else { None }
}

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}

// adding 0.0 folds -0.0 into 0.0 so both share a key
fn bits(value: Option<f64>) -> Option<u64> {
    value.map(|it| (it + 0.).to_bits())
}

/// Bearing is not part of a coordinate's identity. Unknown axes are equal to
/// each other, so two coordinates without a location compare equal.
impl PartialEq for Coordinate {
    fn eq(&self, other: &Coordinate) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => write!(f, "{}, {}", latitude, longitude),
            _ => write!(f, "Unknown"),
        }
    }
}

impl From<&str> for Coordinate {
    fn from(text: &str) -> Coordinate {
        Coordinate::parse_lat_lon(Some(text))
    }
}

impl Point for Coordinate {
    fn latitude(&self) -> Option<f64> {
        self.latitude
    }
    fn longitude(&self) -> Option<f64> {
        self.longitude
    }
    fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn valid_axes_have_location() {
        for &(lat, lon) in &[(0., 0.), (90., 180.), (-90., -180.), (38.8977, -77.0365)] {
            let coordinate = Coordinate::new(lat, lon);
            assert!(coordinate.has_location());
            assert_eq!(coordinate.latitude(), Some(lat));
            assert_eq!(coordinate.longitude(), Some(lon));
        }
    }

    #[test]
    fn out_of_range_axes_are_unknown() {
        let coordinate = Coordinate::new(90.5, 10.);
        assert_eq!(coordinate.latitude(), None);
        assert_eq!(coordinate.longitude(), Some(10.));
        assert!(!coordinate.has_location());

        let coordinate = Coordinate::new(-45., -180.1);
        assert_eq!(coordinate.latitude(), Some(-45.));
        assert_eq!(coordinate.longitude(), None);
        assert!(!coordinate.has_location());

        assert!(!Coordinate::new(std::f64::NAN, 0.).has_location());
        assert!(!Coordinate::new(0., std::f64::INFINITY).has_location());
    }

    #[test]
    fn missing_parts_are_not_zero() {
        let coordinate = Coordinate::from_parts(None, Some(12.));
        assert_eq!(coordinate.latitude(), None);
        assert_ne!(coordinate, Coordinate::new(0., 12.));
    }

    #[test]
    fn equality() {
        assert_eq!(Coordinate::new(10., 20.), Coordinate::new(10., 20.));
        assert_ne!(Coordinate::new(10., 20.), Coordinate::new(10., 21.));
        assert_ne!(Coordinate::new(10., 20.).with_altitude(100.), Coordinate::new(10., 20.));
        assert_eq!(Coordinate::new(0., 0.), Coordinate::new(-0., -0.));
        assert_eq!(Coordinate::unknown(), Coordinate::new(100., 200.));
    }

    #[test]
    fn bearing_is_ignored_by_equality() {
        let a = Coordinate::new(10., 20.).with_bearing(90.);
        let b = Coordinate::new(10., 20.).with_bearing(270.);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Coordinate::new(10., 20.).with_bearing(1.));
        set.insert(Coordinate::new(10., 20.).with_bearing(2.));
        set.insert(Coordinate::new(0., 0.));
        set.insert(Coordinate::new(-0., 0.));
        set.insert(Coordinate::unknown());
        set.insert(Coordinate::from_parts(None, None));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(38.8977, -77.0365).to_string(), "38.8977, -77.0365");
        assert_eq!(Coordinate::new(10., 20.).to_string(), "10, 20");
        assert_eq!(Coordinate::from_parts(Some(10.), None).to_string(), "Unknown");
    }

    #[test]
    fn parse() {
        assert_eq!(Coordinate::from("38.8977, -77.0365"), Coordinate::new(38.8977, -77.0365));
        assert_eq!(Coordinate::from(",10,,20,"), Coordinate::new(10., 20.));
        assert!(!Coordinate::parse_lat_lon(None).has_location());
        assert!(!Coordinate::from("garbage").has_location());
        assert!(!Coordinate::from("1,2,3").has_location());
        assert!(!Coordinate::from("1,north").has_location());
        assert!(!Coordinate::from("").has_location());
    }

    #[test]
    fn parse_keeps_range_rules() {
        let coordinate = Coordinate::from("95, 20");
        assert_eq!(coordinate.latitude(), None);
        assert_eq!(coordinate.longitude(), Some(20.));
    }

    #[test]
    fn display_round_trips() {
        for &(lat, lon) in &[(0.1, 0.2), (-89.999999, 179.123456789), (51.301389, 6.953333), (-33.8688, 151.2093)] {
            let coordinate = Coordinate::new(lat, lon);
            assert_eq!(Coordinate::from(coordinate.to_string().as_str()), coordinate);
        }
    }
}
