//! Bounding spheres.

use crate::terrain::Terrain;
use geokit_angle::{LatLon, Sector};
use geokit_geom::{
    sphere_projected_area, Extent, Frustum, GeomError, Intersection, Line, Plane, Result, View,
};
use geokit_math::{extrema, Point3, Vec3};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Unit sphere at the origin.
    pub const UNIT: Sphere = Sphere {
        center: Point3 {
            coords: Vec3::new(0.0, 0.0, 0.0),
        },
        radius: 1.0,
    };

    /// Sphere around `center`. Fails unless `radius > 0`.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(GeomError::invalid(format!(
                "sphere radius {radius} must be positive"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Sphere around the axis-aligned box of `points`.
    ///
    /// Loose but linear in the number of points. A set whose box is a single
    /// point gets radius 1.
    pub fn bounding_sphere(points: &[Point3]) -> Result<Self> {
        let (min, max) = extrema(points)
            .ok_or_else(|| GeomError::invalid("bounding sphere needs at least one point"))?;
        let center = nalgebra::center(&min, &max);
        let mut radius = (max - min).norm() / 2.0;
        if radius == 0.0 {
            debug!(?center, "bounding sphere radius fell back to 1");
            radius = 1.0;
        }
        Self::new(center, radius)
    }

    /// Sphere centered on the mean of the extents' centers, reaching the far
    /// side of each extent's own bounding sphere.
    ///
    /// `None` for an empty slice.
    pub fn bounding_sphere_of_extents(extents: &[&dyn Extent]) -> Option<Sphere> {
        if extents.is_empty() {
            return None;
        }
        let sum = extents
            .iter()
            .fold(Vec3::zeros(), |acc, e| acc + e.center().coords);
        let center = Point3::from(sum / extents.len() as f64);
        let radius = extents
            .iter()
            .map(|e| (e.center() - center).norm() + e.radius())
            .fold(0.0, f64::max);
        Sphere::new(center, radius).ok()
    }

    /// Sphere around the terrain in `sector`: the centroid and four corners
    /// at the exaggerated maximum elevation, and the four corners at the
    /// exaggerated minimum.
    pub fn bounding_sector_sphere(
        terrain: &dyn Terrain,
        exaggeration: f64,
        sector: &Sector,
    ) -> Result<Self> {
        let (min_elevation, max_elevation) = terrain.elevation_range(sector);
        let min_height = min_elevation * exaggeration;
        let max_height = max_elevation * exaggeration;
        let centroid = sector.centroid();

        let mut points = Vec::with_capacity(9);
        points.push(terrain.point_on_surface(centroid.latitude, centroid.longitude, max_height));
        for height in [max_height, min_height] {
            for corner in sector.corners() {
                points.push(terrain.point_on_surface(corner.latitude, corner.longitude, height));
            }
        }
        Self::bounding_sphere(&points)
    }

    /// Point on the surface at `location`, with latitude taken as the polar
    /// angle from `+Z` and longitude as the azimuth from `+X`.
    pub fn point_on_sphere(&self, location: &LatLon) -> Point3 {
        let sin_lat = location.latitude.sin();
        self.center
            + Vec3::new(
                sin_lat * location.longitude.cos(),
                sin_lat * location.longitude.sin(),
                location.latitude.cos(),
            ) * self.radius
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }

    /// Surface area.
    pub fn surface_area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.center;
        write!(
            f,
            "Sphere: center = ({}, {}, {}) radius = {}",
            c.x, c.y, c.z, self.radius
        )
    }
}

impl Extent for Sphere {
    fn center(&self) -> Point3 {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn effective_radius(&self, _plane: &Plane) -> f64 {
        self.radius
    }

    fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        let nr = -self.radius;
        frustum
            .planes()
            .iter()
            .all(|plane| plane.dot_point(&self.center) > nr)
    }

    fn intersects_line(&self, line: &Line) -> bool {
        line.distance_to(&self.center) <= self.radius
    }

    fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.dot_point(&self.center) > -self.radius
    }

    fn intersect(&self, line: &Line) -> Vec<Intersection> {
        // Quadratic in t for |origin + t*dir - center|^2 = r^2.
        let oc = line.origin() - self.center;
        let dir = line.direction();
        let a = dir.norm_squared();
        let b = 2.0 * oc.dot(dir);
        let c = oc.norm_squared() - self.radius * self.radius;

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }
        let root = disc.sqrt();
        let t_near = (-b - root) / (2.0 * a);
        if disc == 0.0 {
            return vec![Intersection::with_length(line.point_at(t_near), t_near, true)];
        }
        let t_far = (-b + root) / (2.0 * a);
        vec![
            Intersection::with_length(line.point_at(t_near), t_near, false),
            Intersection::with_length(line.point_at(t_far), t_far, false),
        ]
    }

    fn projected_area(&self, view: &dyn View) -> f64 {
        sphere_projected_area(view, &self.center, self.radius)
    }
}
