//! Latitude/longitude rectangles.

use crate::angle::Angle;
use crate::latlon::LatLon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A region bounded by two parallels and two meridians.
///
/// Bounds are assumed normalized (latitude in [−90, 90], longitude in
/// [−180, 180]) with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Southern bound.
    pub min_latitude: Angle,
    /// Northern bound.
    pub max_latitude: Angle,
    /// Western bound.
    pub min_longitude: Angle,
    /// Eastern bound.
    pub max_longitude: Angle,
}

impl Sector {
    /// The whole sphere.
    pub const FULL_SPHERE: Sector = Sector {
        min_latitude: Angle::NEG90,
        max_latitude: Angle::POS90,
        min_longitude: Angle::NEG180,
        max_longitude: Angle::POS180,
    };

    /// Sector from its four bounds.
    pub fn new(
        min_latitude: Angle,
        max_latitude: Angle,
        min_longitude: Angle,
        max_longitude: Angle,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Sector from bounds in degrees.
    pub fn from_degrees(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self::new(
            Angle::from_degrees(min_lat),
            Angle::from_degrees(max_lat),
            Angle::from_degrees(min_lon),
            Angle::from_degrees(max_lon),
        )
    }

    /// Latitude span.
    pub fn delta_lat(&self) -> Angle {
        Angle::from_degrees(self.max_latitude.degrees() - self.min_latitude.degrees())
    }

    /// Longitude span.
    pub fn delta_lon(&self) -> Angle {
        Angle::from_degrees(self.max_longitude.degrees() - self.min_longitude.degrees())
    }

    /// Midpoint of the bounds.
    pub fn centroid(&self) -> LatLon {
        LatLon::new(
            Angle::from_degrees(0.5 * (self.max_latitude.degrees() + self.min_latitude.degrees())),
            Angle::from_degrees(0.5 * (self.max_longitude.degrees() + self.min_longitude.degrees())),
        )
    }

    /// Whether `location` lies inside or on the boundary.
    pub fn contains(&self, location: &LatLon) -> bool {
        let lat = location.latitude.degrees();
        let lon = location.longitude.degrees();
        lat >= self.min_latitude.degrees()
            && lat <= self.max_latitude.degrees()
            && lon >= self.min_longitude.degrees()
            && lon <= self.max_longitude.degrees()
    }

    /// Corner locations in SW, SE, NE, NW order.
    pub fn corners(&self) -> [LatLon; 4] {
        [
            LatLon::new(self.min_latitude, self.min_longitude),
            LatLon::new(self.min_latitude, self.max_longitude),
            LatLon::new(self.max_latitude, self.max_longitude),
            LatLon::new(self.max_latitude, self.min_longitude),
        ]
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}), ({}, {})",
            self.min_latitude, self.min_longitude, self.max_latitude, self.max_longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_and_centroid() {
        let s = Sector::from_degrees(10.0, 30.0, -20.0, 40.0);
        assert_eq!(s.delta_lat().degrees(), 20.0);
        assert_eq!(s.delta_lon().degrees(), 60.0);
        assert_eq!(s.centroid(), LatLon::from_degrees(20.0, 10.0));
        assert_eq!(Sector::FULL_SPHERE.delta_lon().degrees(), 360.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let s = Sector::from_degrees(10.0, 30.0, -20.0, 40.0);
        assert!(s.contains(&LatLon::from_degrees(10.0, 40.0)));
        assert!(s.contains(&LatLon::from_degrees(20.0, 0.0)));
        assert!(!s.contains(&LatLon::from_degrees(31.0, 0.0)));
    }

    #[test]
    fn test_corner_order() {
        let s = Sector::from_degrees(10.0, 30.0, -20.0, 40.0);
        let c = s.corners();
        assert_eq!(c[0], LatLon::from_degrees(10.0, -20.0));
        assert_eq!(c[1], LatLon::from_degrees(10.0, 40.0));
        assert_eq!(c[2], LatLon::from_degrees(30.0, 40.0));
        assert_eq!(c[3], LatLon::from_degrees(30.0, -20.0));
    }
}
