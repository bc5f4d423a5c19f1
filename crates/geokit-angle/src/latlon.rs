//! Geographic locations: [`LatLon`] and [`Position`].

use crate::angle::Angle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude.
    pub latitude: Angle,
    /// Longitude.
    pub longitude: Angle,
}

impl LatLon {
    /// The origin, 0°N 0°E.
    pub const ZERO: LatLon = LatLon {
        latitude: Angle::ZERO,
        longitude: Angle::ZERO,
    };

    /// Location from two angles.
    pub fn new(latitude: Angle, longitude: Angle) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Location from degrees.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(Angle::from_degrees(latitude), Angle::from_degrees(longitude))
    }

    /// Location from radians.
    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        Self::new(Angle::from_radians(latitude), Angle::from_radians(longitude))
    }

    /// Great-circle arc length between two locations, by the haversine formula.
    pub fn great_circle_distance(a: &LatLon, b: &LatLon) -> Angle {
        let (lat1, lon1) = (a.latitude.radians(), a.longitude.radians());
        let (lat2, lon2) = (b.latitude.radians(), b.longitude.radians());
        if lat1 == lat2 && lon1 == lon2 {
            return Angle::ZERO;
        }

        let s_lat = ((lat2 - lat1) / 2.0).sin();
        let s_lon = ((lon2 - lon1) / 2.0).sin();
        let c = s_lat * s_lat + lat1.cos() * lat2.cos() * s_lon * s_lon;
        let distance = 2.0 * c.sqrt().asin();

        if distance.is_nan() {
            Angle::ZERO
        } else {
            Angle::from_radians(distance)
        }
    }

    /// Initial great-circle heading from `a` toward `b`, clockwise from north.
    pub fn great_circle_azimuth(a: &LatLon, b: &LatLon) -> Angle {
        let (lat1, lon1) = (a.latitude.radians(), a.longitude.radians());
        let (lat2, lon2) = (b.latitude.radians(), b.longitude.radians());
        if lat1 == lat2 && lon1 == lon2 {
            return Angle::ZERO;
        }
        if lon1 == lon2 {
            return if lat1 > lat2 { Angle::POS180 } else { Angle::ZERO };
        }

        let y = lat2.cos() * (lon2 - lon1).sin();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();
        let azimuth = y.atan2(x);

        if azimuth.is_nan() {
            Angle::ZERO
        } else {
            Angle::from_radians(azimuth)
        }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A location plus an elevation above the reference surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Geographic location.
    pub lat_lon: LatLon,
    /// Elevation in model units.
    pub elevation: f64,
}

impl Position {
    /// Position from a location and elevation.
    pub fn new(lat_lon: LatLon, elevation: f64) -> Self {
        Self { lat_lon, elevation }
    }

    /// Position from degrees and an elevation.
    pub fn from_degrees(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self::new(LatLon::from_degrees(latitude, longitude), elevation)
    }

    /// Latitude.
    pub fn latitude(&self) -> Angle {
        self.lat_lon.latitude
    }

    /// Longitude.
    pub fn longitude(&self) -> Angle {
        self.lat_lon.longitude
    }
}
