//! Bounding cylinders.
//!
//! # Frustum test
//!
//! [`Extent::intersects_frustum`] walks the planes in the order near, far,
//! left, right, top, bottom. Each plane may shorten the cylinder's axis
//! segment to the part on its inner side, and every later plane sees the
//! shortened segment. A plane with both (possibly shortened) endpoints
//! beyond the cylinder's effective radius rejects it.
//!
//! # Line test
//!
//! [`Extent::intersect`] first solves against the infinite cylinder, then
//! clips the resulting range to the two end caps (Graphics Gems IV, V.2).

use crate::terrain::Terrain;
use geokit_angle::Sector;
use geokit_geom::{
    sphere_projected_area, Extent, Frustum, GeomError, Intersection, Line, Plane, Result, View,
};
use geokit_math::{circle_through_points, principal_axes, Point3, Vec3};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// A finite right circular cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    bottom: Point3,
    top: Point3,
    axis: Vec3,
    radius: f64,
    height: f64,
}

impl Cylinder {
    /// Cylinder between two cap centers.
    ///
    /// Fails when the centers coincide or `radius <= 0`.
    pub fn new(bottom: Point3, top: Point3, radius: f64) -> Result<Self> {
        let axis = (top - bottom)
            .try_normalize(0.0)
            .ok_or_else(|| GeomError::invalid("cylinder end points coincide"))?;
        Self::with_axis(bottom, top, axis, radius)
    }

    /// Cylinder with an explicitly supplied axis direction, normalized on
    /// construction.
    pub fn with_axis(bottom: Point3, top: Point3, axis: Vec3, radius: f64) -> Result<Self> {
        if bottom == top {
            return Err(GeomError::invalid("cylinder end points coincide"));
        }
        if !(radius > 0.0) {
            return Err(GeomError::invalid(format!(
                "cylinder radius {radius} must be positive"
            )));
        }
        let axis = axis
            .try_normalize(0.0)
            .ok_or_else(|| GeomError::invalid("cylinder axis has zero length"))?;
        Ok(Self {
            bottom,
            top,
            axis,
            radius,
            height: (top - bottom).norm(),
        })
    }

    /// Center of the bottom cap.
    pub fn bottom_center(&self) -> Point3 {
        self.bottom
    }

    /// Center of the top cap.
    pub fn top_center(&self) -> Point3 {
        self.top
    }

    /// Unit axis, bottom to top.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Radius of the cylinder itself. [`Extent::radius`] is the radius of
    /// its bounding sphere.
    pub fn cylinder_radius(&self) -> f64 {
        self.radius
    }

    /// Distance between the cap centers.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.height
    }

    /// Cylinder around `points` along their principal axis.
    ///
    /// The cross-section circle is grown one point at a time, starting from
    /// the two points farthest apart along the second principal axis, until
    /// no point lies outside it. Fails for an empty slice.
    pub fn bounding_cylinder(points: &[Point3]) -> Result<Self> {
        let [r, s, _] = principal_axes(points)
            .ok_or_else(|| GeomError::invalid("bounding cylinder needs at least one point"))?;

        let mut min_r = f64::MAX;
        let mut max_r = -f64::MAX;
        let flattened: Vec<Point3> = points
            .iter()
            .map(|p| {
                let pr = p.coords.dot(&r);
                min_r = min_r.min(pr);
                max_r = max_r.max(pr);
                p - r * pr
            })
            .collect();

        let mut min_point = flattened[0];
        let mut max_point = flattened[0];
        let mut min_s = f64::MAX;
        let mut max_s = -f64::MAX;
        for p in &flattened {
            let d = p.coords.dot(&s);
            if d < min_s {
                min_point = *p;
                min_s = d;
            }
            if d > max_s {
                max_point = *p;
                max_s = d;
            }
        }

        let mut center = nalgebra::center(&min_point, &max_point);
        let mut radius = (center - min_point).norm();
        for h in &flattened {
            let hq = h - center;
            let d = hq.norm();
            if d > radius {
                let g = center - hq / d * radius;
                center = nalgebra::center(&g, h);
                radius = d;
            }
        }

        finish(center + r * min_r, center + r * max_r, radius)
    }

    /// Vertical cylinder around the terrain in `sector`, using the terrain's
    /// own elevation range.
    pub fn vertical_bounding_cylinder(
        terrain: &dyn Terrain,
        exaggeration: f64,
        sector: &Sector,
    ) -> Result<Self> {
        let (min, max) = terrain.elevation_range(sector);
        Self::vertical_bounding_cylinder_with_elevations(terrain, exaggeration, sector, min, max)
    }

    /// Vertical cylinder around `sector` between two elevations.
    ///
    /// Sectors spanning 180° or more in latitude or longitude get a cylinder
    /// along the polar axis covering the latitude range. Smaller sectors get
    /// a cylinder around the circle through their corners, or around their
    /// corner vertices when those corners are degenerate.
    pub fn vertical_bounding_cylinder_with_elevations(
        terrain: &dyn Terrain,
        exaggeration: f64,
        sector: &Sector,
        min_elevation: f64,
        max_elevation: f64,
    ) -> Result<Self> {
        let min_height = min_elevation * exaggeration;
        let mut max_height = max_elevation * exaggeration;
        if min_height == max_height {
            max_height = min_height + 1.0;
        }

        if sector.delta_lat().degrees() >= 180.0 || sector.delta_lon().degrees() >= 180.0 {
            latitude_range_bounds(terrain, sector, max_height)
        } else {
            quadrilateral_bounds(terrain, sector, min_height, max_height)
        }
    }

    /// Shorten `ends` to the part of the axis segment not beyond `plane` by
    /// more than the effective radius. `None` when both ends are beyond it.
    fn truncate(&self, plane: &Plane, ends: [Point3; 2]) -> Option<[Point3; 2]> {
        let effective_radius = self.effective_radius(plane);
        let dq1 = plane.dot_point(&ends[0]);
        let dq2 = plane.dot_point(&ends[1]);
        let beyond1 = dq1 <= -effective_radius;
        let beyond2 = dq2 <= -effective_radius;

        if beyond1 && beyond2 {
            return None;
        }
        if beyond1 == beyond2 {
            return Some(ends);
        }

        let t = (effective_radius + dq1) / plane.normal().dot(&(ends[0] - ends[1]));
        let cut = ends[0] + (ends[1] - ends[0]) * t;
        Some(if beyond1 { [cut, ends[1]] } else { [ends[0], cut] })
    }
}

/// Polar-axis cylinder for sectors too wide for the corner circle.
fn latitude_range_bounds(terrain: &dyn Terrain, sector: &Sector, max_height: f64) -> Result<Cylinder> {
    let axis = Vec3::y();
    let radius = terrain.equatorial_radius() + max_height;
    let low = terrain.point_on_surface(sector.min_latitude, sector.min_longitude, max_height);
    let high = terrain.point_on_surface(sector.max_latitude, sector.max_longitude, max_height);
    let bottom = Point3::from(axis * low.coords.dot(&axis));
    let top = Point3::from(axis * high.coords.dot(&axis));
    finish(bottom, top, radius)
}

fn quadrilateral_bounds(
    terrain: &dyn Terrain,
    sector: &Sector,
    min_height: f64,
    max_height: f64,
) -> Result<Cylinder> {
    let point = |lat, lon, height| terrain.point_on_surface(lat, lon, height);
    let (min_lat, max_lat) = (sector.min_latitude, sector.max_latitude);
    let (min_lon, max_lon) = (sector.min_longitude, sector.max_longitude);

    // Two corners on the edge nearer the equator plus one opposite.
    let (p0, p1, p2) = if min_lat.degrees().abs() <= max_lat.degrees().abs() {
        (
            point(min_lat, max_lon, max_height),
            point(min_lat, min_lon, max_height),
            point(max_lat, min_lon, max_height),
        )
    } else {
        (
            point(max_lat, min_lon, max_height),
            point(max_lat, max_lon, max_height),
            point(min_lat, min_lon, max_height),
        )
    };

    let Some(circle) = circle_through_points(&p0, &p1, &p2) else {
        debug!(%sector, "sector corners are degenerate, bounding its vertices instead");
        return vertices_bounds(terrain, sector, min_height, max_height);
    };
    let center = circle.center;
    let axis = circle.axis;
    let project = |p: Point3| (p - center).dot(&axis);

    let min_proj = project(point(min_lat, min_lon, min_height))
        .min(project(point(max_lat, max_lon, min_height)));
    let centroid = sector.centroid();
    let max_proj = project(point(centroid.latitude, centroid.longitude, max_height));

    finish(center + axis * min_proj, center + axis * max_proj, circle.radius)
}

fn vertices_bounds(
    terrain: &dyn Terrain,
    sector: &Sector,
    min_height: f64,
    max_height: f64,
) -> Result<Cylinder> {
    let centroid = sector.centroid();
    let top = terrain.point_on_surface(centroid.latitude, centroid.longitude, max_height);
    let axis = terrain.surface_normal(&top);

    let corners = sector
        .corners()
        .map(|c| terrain.point_on_surface(c.latitude, c.longitude, min_height));
    let min_proj = corners
        .iter()
        .map(|c| (c - top).dot(&axis))
        .fold(f64::INFINITY, f64::min);
    let radius = corners
        .iter()
        .map(|c| (c - top).norm())
        .fold(0.0, f64::max);

    finish(top + axis * min_proj, top, radius)
}

/// Build the cylinder, replacing a zero radius with 1 and separating
/// coincident cap centers by one unit along `X`.
fn finish(bottom: Point3, mut top: Point3, mut radius: f64) -> Result<Cylinder> {
    if radius == 0.0 {
        debug!(?bottom, ?top, "bounding cylinder radius fell back to 1");
        radius = 1.0;
    }
    if bottom == top {
        debug!(?bottom, "bounding cylinder end points coincide, offsetting top");
        top = bottom + Vec3::x();
    }
    Cylinder::new(bottom, top, radius)
}

/// Ray range `(enter, exit)` against the infinite cylinder, or `None` on a
/// miss. A ray parallel to the axis and inside it gets `(-∞, +∞)`.
fn intersect_infinite(line: &Line, base: &Point3, axis: &Vec3, radius: f64) -> Option<(f64, f64)> {
    let rc = line.origin() - base;
    let dir = line.direction();
    let n = dir.cross(axis);
    let ln = n.norm();

    if ln == 0.0 {
        let along = rc.dot(axis);
        let d = (rc - axis * along).norm();
        return (d <= radius).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }

    let n = n / ln;
    let d = rc.dot(&n).abs();
    if d > radius {
        return None;
    }
    let t = -rc.cross(axis).dot(&n) / ln;
    let o = n.cross(axis).normalize();
    let s = ((radius * radius - d * d).sqrt() / dir.dot(&o)).abs();
    Some((t - s, t + s))
}

/// Clip the range `(enter, exit)` to the slab between the cap planes.
fn clip_to_caps(
    line: &Line,
    bottom: &Point3,
    top: &Point3,
    axis: &Vec3,
    (mut enter, mut exit): (f64, f64),
) -> Option<(f64, f64)> {
    let dc = axis.dot(line.direction());
    let origin_along = axis.dot(&line.origin().coords);
    let dwb = origin_along - axis.dot(&bottom.coords);
    let dwt = origin_along - axis.dot(&top.coords);

    if dc == 0.0 {
        if dwb <= 0.0 || dwt >= 0.0 {
            return None;
        }
    } else {
        let tb = -dwb / dc;
        let tt = -dwt / dc;
        if dc >= 0.0 {
            if tb > exit || tt < enter {
                return None;
            }
            if tb > enter && tb < exit {
                enter = tb;
            }
            if tt > enter && tt < exit {
                exit = tt;
            }
        } else {
            if tb < enter || tt > exit {
                return None;
            }
            if tb > enter && tb < exit {
                exit = tb;
            }
            if tt > enter && tt < exit {
                enter = tt;
            }
        }
    }

    (enter < exit).then_some((enter, exit))
}

impl fmt::Display for Cylinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (b, t, a) = (self.bottom, self.top, self.axis);
        write!(
            f,
            "Cylinder: radius = {}, bottom = ({}, {}, {}), top = ({}, {}, {}), axis = ({}, {}, {})",
            self.radius, b.x, b.y, b.z, t.x, t.y, t.z, a.x, a.y, a.z
        )
    }
}

impl Extent for Cylinder {
    fn center(&self) -> Point3 {
        nalgebra::center(&self.bottom, &self.top)
    }

    fn radius(&self) -> f64 {
        let half_height = self.height / 2.0;
        (half_height * half_height + self.radius * self.radius).sqrt()
    }

    fn effective_radius(&self, plane: &Plane) -> f64 {
        let dot = plane.normal().dot(&self.axis);
        let scale = 1.0 - dot * dot;
        if scale <= 0.0 {
            0.0
        } else {
            self.radius * scale.sqrt()
        }
    }

    fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        frustum
            .planes()
            .iter()
            .try_fold([self.bottom, self.top], |ends, plane| self.truncate(plane, ends))
            .is_some()
    }

    fn intersects_line(&self, line: &Line) -> bool {
        !self.intersect(line).is_empty()
    }

    fn intersects_plane(&self, plane: &Plane) -> bool {
        let effective_radius = self.effective_radius(plane);
        let beyond = |p: &Point3| plane.dot_point(p) <= -effective_radius;
        !(beyond(&self.bottom) && beyond(&self.top))
    }

    fn intersect(&self, line: &Line) -> Vec<Intersection> {
        let Some((enter, exit)) = intersect_infinite(line, &self.bottom, &self.axis, self.radius)
            .and_then(|range| clip_to_caps(line, &self.bottom, &self.top, &self.axis, range))
        else {
            return Vec::new();
        };

        [enter, exit]
            .into_iter()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .map(|t| Intersection::with_length(line.point_at(t), t, false))
            .collect()
    }

    fn projected_area(&self, view: &dyn View) -> f64 {
        sphere_projected_area(view, &self.center(), self.radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::SphericalTerrain;
    use approx::assert_relative_eq;

    fn upright() -> Cylinder {
        Cylinder::new(Point3::origin(), Point3::new(0.0, 0.0, 10.0), 1.0).unwrap()
    }

    fn distance_to_axis(cylinder: &Cylinder, p: &Point3) -> f64 {
        Line::new(cylinder.bottom_center(), cylinder.axis())
            .unwrap()
            .distance_to(p)
    }

    fn along_axis(cylinder: &Cylinder, p: &Point3) -> f64 {
        (p - cylinder.bottom_center()).dot(&cylinder.axis())
    }

    fn assert_encloses(cylinder: &Cylinder, p: &Point3, tolerance: f64) {
        assert!(
            distance_to_axis(cylinder, p) <= cylinder.cylinder_radius() + tolerance,
            "{p} is outside {cylinder}"
        );
        let h = along_axis(cylinder, p);
        assert!(h >= -tolerance && h <= cylinder.height() + tolerance, "{p} is beyond the caps of {cylinder}");
    }

    #[test]
    fn test_construction_checks() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(Cylinder::new(p, p, 1.0).is_err());
        assert!(Cylinder::new(Point3::origin(), p, 0.0).is_err());
        assert!(Cylinder::new(Point3::origin(), p, -2.0).is_err());
        assert!(Cylinder::with_axis(Point3::origin(), p, Vec3::zeros(), 1.0).is_err());

        let c = Cylinder::with_axis(Point3::origin(), Point3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 2.0), 3.0)
            .unwrap();
        assert_relative_eq!(c.axis(), Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_measures() {
        let c = upright();
        assert_relative_eq!(c.height(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(c.center(), Point3::new(0.0, 0.0, 5.0), epsilon = 1e-12);
        assert_relative_eq!(c.radius(), 26f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(c.diameter(), 2.0 * 26f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(c.volume(), 10.0 * PI, epsilon = 1e-12);
        assert_eq!(
            c.to_string(),
            "Cylinder: radius = 1, bottom = (0, 0, 0), top = (0, 0, 10), axis = (0, 0, 1)"
        );
    }

    #[test]
    fn test_line_across_side() {
        let c = upright();
        let line = Line::new(Point3::new(-5.0, 0.0, 5.0), Vec3::x()).unwrap();
        let hits = c.intersect(&line);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(*hits[0].point(), Point3::new(-1.0, 0.0, 5.0), epsilon = 1e-12);
        assert_relative_eq!(*hits[1].point(), Point3::new(1.0, 0.0, 5.0), epsilon = 1e-12);
        assert!(c.intersects_line(&line));
    }

    #[test]
    fn test_line_along_axis() {
        let c = upright();
        let line = Line::new(Point3::new(0.0, 0.0, -5.0), Vec3::z()).unwrap();
        let hits = c.intersect(&line);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(*hits[0].point(), Point3::origin(), epsilon = 1e-12);
        assert_relative_eq!(*hits[1].point(), Point3::new(0.0, 0.0, 10.0), epsilon = 1e-12);

        let outside = Line::new(Point3::new(2.0, 0.0, -5.0), Vec3::z()).unwrap();
        assert!(c.intersect(&outside).is_empty());
    }

    #[test]
    fn test_line_from_inside_and_behind() {
        let c = upright();
        let inside = Line::new(Point3::new(0.0, 0.0, 5.0), Vec3::x()).unwrap();
        let hits = c.intersect(&inside);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(*hits[0].point(), Point3::new(1.0, 0.0, 5.0), epsilon = 1e-12);

        let behind = Line::new(Point3::new(5.0, 0.0, 5.0), Vec3::x()).unwrap();
        assert!(c.intersect(&behind).is_empty());
    }

    #[test]
    fn test_line_misses() {
        let c = upright();
        let wide = Line::new(Point3::new(-5.0, 3.0, 5.0), Vec3::x()).unwrap();
        assert!(c.intersect(&wide).is_empty());
        let above = Line::new(Point3::new(-5.0, 0.0, 15.0), Vec3::x()).unwrap();
        assert!(c.intersect(&above).is_empty());
        assert!(!c.intersects_line(&above));
    }

    #[test]
    fn test_effective_radius() {
        let c = upright();
        let cap_plane = Plane::new(0.0, 0.0, 1.0, 0.0).unwrap();
        let side_plane = Plane::new(1.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(c.effective_radius(&cap_plane), 0.0);
        assert_relative_eq!(c.effective_radius(&side_plane), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_side() {
        let c = upright();
        assert!(c.intersects_plane(&Plane::new(0.0, 0.0, 1.0, -5.0).unwrap()));
        assert!(!c.intersects_plane(&Plane::new(0.0, 0.0, 1.0, -20.0).unwrap()));
        // Touching within the radius counts.
        assert!(c.intersects_plane(&Plane::new(1.0, 0.0, 0.0, 0.5).unwrap()));
        assert!(!c.intersects_plane(&Plane::new(1.0, 0.0, 0.0, -1.5).unwrap()));
    }

    #[test]
    fn test_frustum_has_no_false_negatives() {
        let frustum = Frustum::default();
        let steps = [-0.6, 0.0, 0.6];
        let axes = [Vec3::x(), Vec3::y(), Vec3::z(), Vec3::new(1.0, 1.0, 1.0).normalize()];
        for &x in &steps {
            for &y in &steps {
                for &z in &steps {
                    let center = Point3::new(x, y, z);
                    for axis in &axes {
                        let c = Cylinder::new(center - axis * 0.2, center + axis * 0.2, 0.1).unwrap();
                        assert!(c.intersects_frustum(&frustum), "{c} should be visible");
                    }
                }
            }
        }
    }

    #[test]
    fn test_frustum_rejects_and_accepts() {
        let frustum = Frustum::default();
        let far_away = Cylinder::new(Point3::new(5.0, 0.0, 0.0), Point3::new(6.0, 0.0, 0.0), 0.5).unwrap();
        assert!(!far_away.intersects_frustum(&frustum));

        let poking_in = Cylinder::new(Point3::origin(), Point3::new(5.0, 0.0, 0.0), 0.1).unwrap();
        assert!(poking_in.intersects_frustum(&frustum));

        let through = Cylinder::new(Point3::new(0.0, 0.0, -10.0), Point3::new(0.0, 0.0, 10.0), 0.1).unwrap();
        assert!(through.intersects_frustum(&frustum));
    }

    #[test]
    fn test_truncation_carries_to_later_planes() {
        // Passes outside the corner at x = y = 1. Clipped by the right plane
        // first, the remaining segment lies wholly beyond the top plane.
        let frustum = Frustum::default();
        let diagonal = Cylinder::new(Point3::new(3.0, 0.0, 0.0), Point3::new(0.0, 3.0, 0.0), 0.1).unwrap();
        assert!(!diagonal.intersects_frustum(&frustum));

        // Its bounding sphere alone would not be culled.
        let center = diagonal.center();
        assert!(frustum
            .planes()
            .iter()
            .all(|p| p.dot_point(&center) > -diagonal.radius()));
    }

    #[test]
    fn test_bounding_cylinder_encloses_points() {
        let points: Vec<Point3> = (0..60)
            .map(|i| {
                let t = i as f64;
                Point3::new(
                    t * 0.5,
                    (t * 0.7).sin() * 2.0 + t * 0.1,
                    (t * 1.3).cos() * 1.5 - 3.0,
                )
            })
            .collect();
        let c = Cylinder::bounding_cylinder(&points).unwrap();
        for p in &points {
            assert_encloses(&c, p, 1e-9);
        }
    }

    #[test]
    fn test_bounding_cylinder_degenerate_sets() {
        assert!(matches!(
            Cylinder::bounding_cylinder(&[]),
            Err(GeomError::InvalidArgument(_))
        ));

        let collinear = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let c = Cylinder::bounding_cylinder(&collinear).unwrap();
        assert!(c.cylinder_radius() > 0.0);
        assert_relative_eq!(c.height(), 2.0, epsilon = 1e-9);
        for p in &collinear {
            assert_encloses(&c, p, 1e-9);
        }

        let single = Cylinder::bounding_cylinder(&[Point3::new(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(single.cylinder_radius(), 1.0);
        assert_relative_eq!(single.height(), 1.0, epsilon = 1e-12);
    }

    fn globe() -> SphericalTerrain {
        SphericalTerrain {
            radius: 1000.0,
            min_elevation: 0.0,
            max_elevation: 10.0,
        }
    }

    #[test]
    fn test_vertical_cylinder_over_small_sector() {
        let globe = globe();
        let sector = Sector::from_degrees(10.0, 20.0, 30.0, 45.0);
        let c = Cylinder::vertical_bounding_cylinder(&globe, 2.0, &sector).unwrap();

        let mut samples = Vec::new();
        for corner in sector.corners() {
            for height in [0.0, 20.0] {
                samples.push(globe.point_on_surface(corner.latitude, corner.longitude, height));
            }
        }
        let centroid = sector.centroid();
        samples.push(globe.point_on_surface(centroid.latitude, centroid.longitude, 20.0));
        for p in &samples {
            assert_encloses(&c, p, 1e-6);
        }
        // The axis points away from the globe center.
        assert!(c.axis().dot(&c.center().coords) > 0.0);
    }

    #[test]
    fn test_vertical_cylinder_over_southern_sector() {
        let globe = globe();
        let sector = Sector::from_degrees(-50.0, -40.0, -10.0, 5.0);
        let c = Cylinder::vertical_bounding_cylinder(&globe, 1.0, &sector).unwrap();
        for corner in sector.corners() {
            for height in [0.0, 10.0] {
                let p = globe.point_on_surface(corner.latitude, corner.longitude, height);
                assert_encloses(&c, &p, 1e-6);
            }
        }
    }

    #[test]
    fn test_vertical_cylinder_over_wide_sector() {
        let globe = globe();
        let c = Cylinder::vertical_bounding_cylinder(&globe, 2.0, &Sector::FULL_SPHERE).unwrap();
        assert_relative_eq!(c.axis(), Vec3::y(), epsilon = 1e-12);
        assert_relative_eq!(c.cylinder_radius(), 1020.0, epsilon = 1e-9);
        assert_relative_eq!(c.bottom_center(), Point3::new(0.0, -1020.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(c.top_center(), Point3::new(0.0, 1020.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_cylinder_over_point_sector() {
        let globe = globe();
        let sector = Sector::from_degrees(10.0, 10.0, 30.0, 30.0);
        let c = Cylinder::vertical_bounding_cylinder(&globe, 2.0, &sector).unwrap();
        let centroid = sector.centroid();
        let top = globe.point_on_surface(centroid.latitude, centroid.longitude, 20.0);
        assert_relative_eq!(c.top_center(), top, epsilon = 1e-9);
        assert_relative_eq!(c.height(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(c.cylinder_radius(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_elevation_range_gets_height() {
        let globe = globe();
        let sector = Sector::from_degrees(10.0, 20.0, 30.0, 45.0);
        let c = Cylinder::vertical_bounding_cylinder_with_elevations(&globe, 1.0, &sector, 5.0, 5.0)
            .unwrap();
        assert!(c.height() > 0.0);
    }
}
