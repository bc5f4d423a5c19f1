//! Triangles and line/triangle intersection.

use crate::intersection::Intersection;
use crate::line::Line;
use geokit_math::Point3;

/// Determinant magnitude below which a line is treated as lying in the
/// triangle's plane.
const EPSILON: f64 = 1e-5;

/// A triangle given by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,
    /// Second vertex.
    pub b: Point3,
    /// Third vertex.
    pub c: Point3,
}

impl Triangle {
    /// Triangle from three vertices.
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// Whether `p`, assumed to lie in the triangle's plane, is inside it or
    /// on its boundary.
    pub fn contains(&self, p: &Point3) -> bool {
        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = p - self.a;

        let dot00 = v0.dot(&v0);
        let dot01 = v0.dot(&v1);
        let dot02 = v0.dot(&v2);
        let dot11 = v1.dot(&v1);
        let dot12 = v1.dot(&v2);

        let inv = 1.0 / (dot00 * dot11 - dot01 * dot01);
        let u = (dot11 * dot02 - dot01 * dot12) * inv;
        let v = (dot00 * dot12 - dot01 * dot02) * inv;
        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// Where `line` crosses the triangle at a non-negative parameter.
    ///
    /// Uses the Möller–Trumbore test. A line (nearly) parallel to the
    /// triangle's plane never hits.
    pub fn intersect(&self, line: &Line) -> Option<Intersection> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let dir = line.direction();

        let pvec = dir.cross(&edge2);
        let det = edge1.dot(&pvec);
        if det > -EPSILON && det < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = line.origin() - self.a;
        let u = inv_det * tvec.dot(&pvec);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(&edge1);
        let v = inv_det * dir.dot(&qvec);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(&qvec);
        if t < 0.0 {
            return None;
        }
        Some(Intersection::with_length(line.point_at(t), t, false))
    }
}
