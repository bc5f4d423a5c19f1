//! Planes in homogeneous form: `n · (x, y, z, 1) = 0`.

use crate::error::{GeomError, Result};
use crate::line::Line;
use geokit_math::{homogeneous, Matrix3, Point3, Vec3, Vec4};
use tracing::debug;

/// Three normals whose determinant is at most this fraction of the product
/// of their lengths count as linearly dependent.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Where a segment meets a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneCrossing {
    /// The segment crosses (or touches) the plane at this point.
    Point(Point3),
    /// The whole segment lies in the plane.
    Coincident,
}

/// A plane stored as `(nx, ny, nz, d)`.
///
/// The normal need not be unit length; [`Plane::normalize`] makes it so.
/// A point is on the positive ("inside") side when `dot_point > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    n: Vec4,
}

impl Plane {
    /// Plane from normal components and the distance term.
    pub fn new(nx: f64, ny: f64, nz: f64, d: f64) -> Result<Self> {
        Self::from_vec4(Vec4::new(nx, ny, nz, d))
    }

    /// Plane from literal components known to have a non-zero normal.
    pub(crate) fn from_raw(nx: f64, ny: f64, nz: f64, d: f64) -> Self {
        Self {
            n: Vec4::new(nx, ny, nz, d),
        }
    }

    /// Plane from a homogeneous vector whose `w` is the distance term.
    pub fn from_vec4(n: Vec4) -> Result<Self> {
        if n.x == 0.0 && n.y == 0.0 && n.z == 0.0 {
            return Err(GeomError::invalid("plane normal has zero length"));
        }
        Ok(Self { n })
    }

    /// Plane through three points, normal `(b - a) × (c - a)`.
    ///
    /// Collinear points give a zero normal and fail with
    /// [`GeomError::InvalidArgument`].
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        Self::from_normal_and_point(&normal, a)
    }

    /// Plane with the given normal passing through `point`.
    pub fn from_normal_and_point(normal: &Vec3, point: &Point3) -> Result<Self> {
        let d = -normal.dot(&point.coords);
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// Normal direction (not necessarily unit length).
    pub fn normal(&self) -> Vec3 {
        self.n.xyz()
    }

    /// Distance term `d`.
    pub fn distance(&self) -> f64 {
        self.n.w
    }

    /// The plane as a homogeneous vector.
    pub fn vector(&self) -> Vec4 {
        self.n
    }

    /// Same plane with a unit normal.
    pub fn normalize(&self) -> Plane {
        let length = self.n.xyz().norm();
        if length == 0.0 {
            return *self;
        }
        Plane { n: self.n / length }
    }

    /// 4-component dot product with a homogeneous vector.
    #[inline]
    pub fn dot(&self, v: &Vec4) -> f64 {
        self.n.dot(v)
    }

    /// Dot product with a point (`w = 1`).
    #[inline]
    pub fn dot_point(&self, p: &Point3) -> f64 {
        self.n.dot(&homogeneous(p))
    }

    /// Signed distance of `p` from the plane, scaled by the normal length.
    #[inline]
    pub fn distance_to(&self, p: &Point3) -> f64 {
        self.dot_point(p)
    }

    /// Parameter `t` at which `line` meets the plane.
    ///
    /// Returns `+∞` when the line lies in the plane and NaN when it is
    /// parallel to it.
    pub fn intersect_distance(&self, line: &Line) -> f64 {
        let ldotv = self.normal().dot(line.direction());
        let ldots = self.dot_point(line.origin());
        if ldotv == 0.0 {
            return if ldots == 0.0 { f64::INFINITY } else { f64::NAN };
        }
        -ldots / ldotv
    }

    /// Point where `line` meets the plane.
    ///
    /// A line lying in the plane returns its origin.
    pub fn intersect(&self, line: &Line) -> Option<Point3> {
        let t = self.intersect_distance(line);
        if t.is_nan() {
            None
        } else if t.is_infinite() {
            Some(*line.origin())
        } else {
            Some(line.point_at(t))
        }
    }

    /// Where the segment `pa`-`pb` meets the plane, if it does.
    ///
    /// Equal endpoints are a point test: the point is returned only when it
    /// lies exactly on the plane.
    pub fn intersect_segment(&self, pa: &Point3, pb: &Point3) -> Option<PlaneCrossing> {
        if pa == pb {
            return (self.distance_to(pa) == 0.0).then_some(PlaneCrossing::Point(*pa));
        }
        let line = Line::from_segment(pa, pb).ok()?;
        let t = self.intersect_distance(&line);
        if t.is_infinite() {
            return Some(PlaneCrossing::Coincident);
        }
        if t.is_nan() || !(0.0..=1.0).contains(&t) {
            return None;
        }
        Some(PlaneCrossing::Point(line.point_at(t)))
    }

    /// The part of `pa`-`pb` on the non-negative side of the plane.
    ///
    /// Returns `None` for a degenerate segment, a segment parallel to and
    /// off the plane, or one that does not cross it. A segment lying in the
    /// plane is returned unchanged.
    pub fn clip(&self, pa: &Point3, pb: &Point3) -> Option<(Point3, Point3)> {
        if pa == pb {
            return None;
        }
        let direction = pb - pa;
        let ldotv = self.normal().dot(&direction);
        let ldots = self.dot_point(pa);
        if ldotv == 0.0 {
            return (ldots == 0.0).then_some((*pa, *pb));
        }

        let t = -ldots / ldotv;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        let p = pa + direction * t;
        if ldotv > 0.0 {
            Some((p, *pb))
        } else {
            Some((*pa, p))
        }
    }

    /// `-1` if both points are strictly behind the plane, `1` if both are
    /// strictly in front, `0` otherwise.
    pub fn on_same_side(&self, pa: &Point3, pb: &Point3) -> i32 {
        let da = self.distance_to(pa);
        let db = self.distance_to(pb);
        if da < 0.0 && db < 0.0 {
            -1
        } else if da > 0.0 && db > 0.0 {
            1
        } else {
            0
        }
    }

    /// Like [`Plane::on_same_side`] for any number of points. Empty input
    /// gives `0`.
    pub fn on_same_side_all(&self, points: &[Point3]) -> i32 {
        let Some((first, rest)) = points.split_first() else {
            return 0;
        };
        let d = self.distance_to(first);
        let side = if d < 0.0 {
            -1
        } else if d > 0.0 {
            1
        } else {
            return 0;
        };

        for p in rest {
            let d = self.distance_to(p);
            if (side == -1 && d >= 0.0) || (side == 1 && d <= 0.0) {
                return 0;
            }
        }
        side
    }

    /// The single point shared by three planes.
    ///
    /// Fails with [`GeomError::Singular`] when the normals are linearly
    /// dependent, including when rounding leaves a tiny nonzero
    /// determinant.
    pub fn intersect_planes(a: &Plane, b: &Plane, c: &Plane) -> Result<Point3> {
        let (na, nb, nc) = (a.normal(), b.normal(), c.normal());
        let m = Matrix3::new(
            na.x, na.y, na.z,
            nb.x, nb.y, nb.z,
            nc.x, nc.y, nc.z,
        );
        let scale = na.norm() * nb.norm() * nc.norm();
        let inverse = if m.determinant().abs() > SINGULAR_EPSILON * scale {
            m.try_inverse()
        } else {
            None
        };
        let Some(inverse) = inverse else {
            debug!(?a, ?b, ?c, "planes have no unique common point");
            return Err(GeomError::Singular(
                "plane normals are linearly dependent".into(),
            ));
        };
        let d = Vec3::new(-a.distance(), -b.distance(), -c.distance());
        Ok(Point3::from(inverse * d))
    }
}
