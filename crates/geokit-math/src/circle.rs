//! The circle passing through three points.

use crate::{Point3, Vec3};

/// A circle in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Circle center.
    pub center: Point3,
    /// Unit normal of the circle's plane.
    pub axis: Vec3,
    /// Circle radius.
    pub radius: f64,
}

/// Relative tolerance on the barycentric denominator.
const DEGENERATE_TOLERANCE: f64 = 1e-6;

/// Compute the circle through `p0`, `p1` and `p2`.
///
/// The center is expressed in barycentric form relative to the triangle's
/// edge products. Returns `None` when the points are collinear or two of
/// them coincide.
pub fn circle_through_points(p0: &Point3, p1: &Point3, p2: &Point3) -> Option<Circle> {
    let v0 = p1 - p0;
    let v1 = p2 - p1;
    let v2 = p2 - p0;

    let d0 = v0.dot(&v2);
    let d1 = -v0.dot(&v1);
    let d2 = v1.dot(&v2);

    let t0 = d1 + d2;
    let t1 = d0 + d2;
    let t2 = d0 + d1;

    let e0 = d0 * t0;
    let e1 = d1 * t1;
    let e2 = d2 * t2;

    let max_e = e0.max(e1).max(e2);
    let min_e = e0.min(e1).min(e2);
    let e = e0 + e1 + e2;

    if e.abs() <= DEGENERATE_TOLERANCE * (max_e - min_e) {
        return None;
    }

    let radius_squared = 0.5 * t0 * t1 * t2 / e;
    if radius_squared < 0.0 {
        return None;
    }

    let center = Point3::from(
        p0.coords * (e0 / e) + p1.coords * (e1 / e) + p2.coords * (e2 / e),
    );
    let axis = v2.cross(&v0).normalize();

    Some(Circle {
        center,
        axis,
        radius: radius_squared.sqrt(),
    })
}
