//! The elevation model that geographic bounding volumes are built over.

use geokit_angle::{Angle, Sector};
use geokit_math::{Point3, Vec3};

/// A globe surface with elevations.
///
/// Bounding-volume constructors only read from it.
pub trait Terrain {
    /// Lowest and highest elevation inside `sector`, in meters.
    fn elevation_range(&self, sector: &Sector) -> (f64, f64);

    /// Model-space point at `height` above the surface.
    fn point_on_surface(&self, latitude: Angle, longitude: Angle, height: f64) -> Point3;

    /// Unit outward normal of the surface at `point`.
    fn surface_normal(&self, point: &Point3) -> Vec3;

    /// Radius of the globe at the equator.
    fn equatorial_radius(&self) -> f64;
}

/// A spherical globe with a fixed elevation range, `+Y` through the north
/// pole and `+Z` through latitude 0, longitude 0.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct SphericalTerrain {
    pub radius: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

#[cfg(test)]
impl Terrain for SphericalTerrain {
    fn elevation_range(&self, _sector: &Sector) -> (f64, f64) {
        (self.min_elevation, self.max_elevation)
    }

    fn point_on_surface(&self, latitude: Angle, longitude: Angle, height: f64) -> Point3 {
        let r = self.radius + height;
        let cos_lat = latitude.cos();
        Point3::new(
            r * cos_lat * longitude.sin(),
            r * latitude.sin(),
            r * cos_lat * longitude.cos(),
        )
    }

    fn surface_normal(&self, point: &Point3) -> Vec3 {
        point.coords.normalize()
    }

    fn equatorial_radius(&self) -> f64 {
        self.radius
    }
}
