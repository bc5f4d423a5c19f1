//! Barycentric weights over triangles and bilinear coordinates over
//! quadrilaterals.
//!
//! Corners are named by their bilinear coordinates: `p00` is the origin
//! corner, `p10` lies along `u`, `p01` along `v` and `p11` is opposite the
//! origin.

use geokit_angle::LatLon;
use geokit_math::Point3;

/// Tolerance for treating the far corner's weight as exactly 1.
const WEIGHT_EPSILON: f64 = 1e-9;

fn geographic_point(location: &LatLon) -> Point3 {
    Point3::new(location.longitude.radians(), location.latitude.radians(), 0.0)
}

/// A triangle with corners `p00`, `p10`, `p01`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricTriangle {
    p00: Point3,
    p10: Point3,
    p01: Point3,
}

impl BarycentricTriangle {
    /// Triangle from its three corners.
    pub fn new(p00: Point3, p10: Point3, p01: Point3) -> Self {
        Self { p00, p10, p01 }
    }

    /// Triangle over geographic locations, using longitude and latitude in
    /// radians as `x` and `y`.
    pub fn from_lat_lons(p00: &LatLon, p10: &LatLon, p01: &LatLon) -> Self {
        Self::new(
            geographic_point(p00),
            geographic_point(p10),
            geographic_point(p01),
        )
    }

    /// Weights `[w00, w10, w01]` of `p`, which should lie in the plane of
    /// the triangle. They sum to 1.
    ///
    /// The system is solved in the coordinate plane most nearly parallel to
    /// the triangle, so it stays well conditioned for any orientation.
    pub fn barycentric_coords(&self, p: &Point3) -> [f64; 3] {
        let q1 = self.p10 - self.p00;
        let q3 = self.p01 - self.p00;
        let n = q1.cross(&q3);
        let q2 = p - self.p00;

        let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
        let (b1, b2) = if ax >= ay && ax >= az {
            (
                (q2.y * q3.z - q2.z * q3.y) / n.x,
                (q1.y * q2.z - q1.z * q2.y) / n.x,
            )
        } else if ay >= az {
            (
                (q2.z * q3.x - q2.x * q3.z) / n.y,
                (q1.z * q2.x - q1.x * q2.z) / n.y,
            )
        } else {
            (
                (q2.x * q3.y - q2.y * q3.x) / n.z,
                (q1.x * q2.y - q1.y * q2.x) / n.z,
            )
        };
        [1.0 - b1 - b2, b1, b2]
    }

    /// Whether `p` lies inside the triangle or on its edges.
    pub fn contains(&self, p: &Point3) -> bool {
        let [_, b1, b2] = self.barycentric_coords(p);
        b1 >= 0.0 && b2 >= 0.0 && b1 + b2 <= 1.0
    }

    /// Point with the given weights.
    pub fn point(&self, w: &[f64; 3]) -> Point3 {
        Point3::from(self.p00.coords * w[0] + self.p10.coords * w[1] + self.p01.coords * w[2])
    }

    /// Geographic location with the given weights, for a triangle built by
    /// [`BarycentricTriangle::from_lat_lons`].
    pub fn location(&self, w: &[f64; 3]) -> LatLon {
        let p = self.point(w);
        LatLon::from_radians(p.y, p.x)
    }

    /// Bilinear coordinates of barycentric `(alpha, beta)`. On a triangle
    /// they coincide.
    pub fn bilinear_coords(&self, alpha: f64, beta: f64) -> (f64, f64) {
        (alpha, beta)
    }

    /// Corners `p00`, `p10`, `p01`.
    pub fn corners(&self) -> [Point3; 3] {
        [self.p00, self.p10, self.p01]
    }
}

/// A quadrilateral with corners `p00`, `p10`, `p11`, `p01`.
///
/// Barycentric weights are taken against the triangle `p00`, `p10`, `p01`;
/// the weights of `p11` against that triangle are computed once at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricQuadrilateral {
    triangle: BarycentricTriangle,
    p11: Point3,
    w11: [f64; 3],
}

impl BarycentricQuadrilateral {
    /// Quadrilateral from its corners in counter-clockwise order.
    pub fn new(p00: Point3, p10: Point3, p11: Point3, p01: Point3) -> Self {
        let triangle = BarycentricTriangle::new(p00, p10, p01);
        let w11 = triangle.barycentric_coords(&p11);
        Self { triangle, p11, w11 }
    }

    /// Quadrilateral over geographic locations; see
    /// [`BarycentricTriangle::from_lat_lons`].
    pub fn from_lat_lons(p00: &LatLon, p10: &LatLon, p11: &LatLon, p01: &LatLon) -> Self {
        Self::new(
            geographic_point(p00),
            geographic_point(p10),
            geographic_point(p11),
            geographic_point(p01),
        )
    }

    /// The base triangle `p00`, `p10`, `p01`.
    pub fn triangle(&self) -> &BarycentricTriangle {
        &self.triangle
    }

    /// Weights of `p11` against the base triangle.
    pub fn w11(&self) -> [f64; 3] {
        self.w11
    }

    /// Corners `p00`, `p10`, `p11`, `p01`.
    pub fn corners(&self) -> [Point3; 4] {
        let [p00, p10, p01] = self.triangle.corners();
        [p00, p10, self.p11, p01]
    }

    /// Weights of `p` against the base triangle.
    pub fn barycentric_coords(&self, p: &Point3) -> [f64; 3] {
        self.triangle.barycentric_coords(p)
    }

    /// Whether `p` lies in either half of the quadrilateral.
    pub fn contains(&self, p: &Point3) -> bool {
        if self.triangle.contains(p) {
            return true;
        }
        let [_, p10, p01] = self.triangle.corners();
        BarycentricTriangle::new(self.p11, p01, p10).contains(p)
    }

    /// Bilinear `(u, v)` of the point whose barycentric weights are
    /// `(alpha, beta)` for `p10` and `p01`.
    ///
    /// Returns `None` when the quadratic has no real root or a divisor
    /// vanishes, which happens on degenerate or folded quadrilaterals.
    pub fn bilinear_coords(&self, alpha: f64, beta: f64) -> Option<(f64, f64)> {
        let alpha11 = self.w11[1];
        let beta11 = self.w11[2];

        if (alpha11 - 1.0).abs() < WEIGHT_EPSILON {
            let u = alpha;
            let v = if (beta11 - 1.0).abs() < WEIGHT_EPSILON {
                beta
            } else {
                checked_div(beta, u * (beta11 - 1.0) + 1.0)?
            };
            return Some((u, v));
        }
        if (beta11 - 1.0).abs() < WEIGHT_EPSILON {
            let v = beta;
            let u = checked_div(alpha, v * (alpha11 - 1.0) + 1.0)?;
            return Some((u, v));
        }

        let a = 1.0 - beta11;
        let b = alpha * (beta11 - 1.0) - beta * (alpha11 - 1.0) - 1.0;
        let c = alpha;
        let disc = b * b - 4.0 * a * c;
        if a == 0.0 || disc < 0.0 {
            return None;
        }

        let sign_b = if b < 0.0 { -1.0 } else { 1.0 };
        let q = -0.5 * (b + sign_b * disc.sqrt());
        let mut u = q / a;
        if !(0.0..=1.0).contains(&u) {
            u = checked_div(c, q)?;
        }
        let v = checked_div(beta, u * (beta11 - 1.0) + 1.0)?;
        Some((u, v))
    }
}

fn checked_div(numerator: f64, divisor: f64) -> Option<f64> {
    (divisor.abs() >= WEIGHT_EPSILON).then(|| numerator / divisor)
}

/// Bilinear `(u, v)` of point `u_pt` on the quadrilateral `x`, `y`, `z`, `w`
/// (corners `p00`, `p10`, `p11`, `p01`), solved directly from edge cross
/// products.
///
/// Returns `None` when the quadratic has no real root or the result is not
/// finite. The root choice is known to fail on some strongly non-planar or
/// folded quadrilaterals; prefer [`BarycentricQuadrilateral::bilinear_coords`]
/// where the barycentric weights are available.
pub fn invert_bilinear(
    u_pt: &Point3,
    x: &Point3,
    y: &Point3,
    z: &Point3,
    w: &Point3,
) -> Option<(f64, f64)> {
    let s1 = w - x;
    let s2 = z - y;
    let ux = u_pt - x;
    let uy = u_pt - y;
    let normal = (z - x).cross(&(w - y));

    let a = s1.cross(&s2).dot(&normal);
    let b = -(ux.cross(&s2).dot(&normal) - uy.cross(&s1).dot(&normal));
    let c = ux.cross(&uy).dot(&normal);

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let beta = if b > 0.0 {
        (-b - root) / (2.0 * a)
    } else {
        (2.0 * c) / (-b + root)
    };

    let sl = x + s1 * beta;
    let sr = y + s2 * beta;
    let span = sr - sl;
    let alpha = (u_pt - sl).dot(&span) / span.dot(&span);

    (alpha.is_finite() && beta.is_finite()).then_some((alpha, beta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn test_triangle_weights() {
        let t = BarycentricTriangle::new(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0));
        let w = t.barycentric_coords(&p(0.5, 1.0));
        assert_relative_eq!(w[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(w[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(t.point(&w), p(0.5, 1.0), epsilon = 1e-12);
        assert!(t.contains(&p(1.0, 1.0)));
        assert!(!t.contains(&p(1.5, 1.0)));
        assert_eq!(t.bilinear_coords(0.3, 0.4), (0.3, 0.4));
    }

    #[test]
    fn test_triangle_weights_any_orientation() {
        // Triangle in the YZ plane exercises the x-dominant branch.
        let t = BarycentricTriangle::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        );
        let w = t.barycentric_coords(&Point3::new(1.0, 0.2, 0.3));
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(w[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(w[2], 0.3, epsilon = 1e-12);

        // And the XZ plane the y-dominant one.
        let t = BarycentricTriangle::new(
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(1.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 1.0),
        );
        let w = t.barycentric_coords(&Point3::new(0.6, 4.0, 0.1));
        assert_relative_eq!(w[1], 0.6, epsilon = 1e-12);
        assert_relative_eq!(w[2], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_geographic_triangle() {
        let t = BarycentricTriangle::from_lat_lons(
            &LatLon::from_degrees(0.0, 0.0),
            &LatLon::from_degrees(0.0, 10.0),
            &LatLon::from_degrees(10.0, 0.0),
        );
        let loc = t.location(&[0.5, 0.25, 0.25]);
        assert_relative_eq!(loc.latitude.degrees(), 2.5, epsilon = 1e-9);
        assert_relative_eq!(loc.longitude.degrees(), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_square_bilinear() {
        let q = BarycentricQuadrilateral::new(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0));
        let w = q.barycentric_coords(&p(0.3, 0.6));
        let (u, v) = q.bilinear_coords(w[1], w[2]).unwrap();
        assert_relative_eq!(u, 0.3, epsilon = 1e-9);
        assert_relative_eq!(v, 0.6, epsilon = 1e-9);
        assert!(q.contains(&p(0.9, 0.9)));
        assert!(!q.contains(&p(1.1, 0.5)));
    }

    #[test]
    fn test_trapezoid_bilinear() {
        let q = BarycentricQuadrilateral::new(p(0.0, 0.0), p(2.0, 0.0), p(1.5, 1.0), p(0.5, 1.0));
        let w = q.barycentric_coords(&p(1.0, 0.5));
        let (u, v) = q.bilinear_coords(w[1], w[2]).unwrap();
        assert_relative_eq!(u, 0.5, epsilon = 1e-9);
        assert_relative_eq!(v, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_general_quad_bilinear() {
        let q = BarycentricQuadrilateral::new(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 2.0), p(0.0, 1.0));
        let w = q.barycentric_coords(&p(0.75, 0.75));
        let (u, v) = q.bilinear_coords(w[1], w[2]).unwrap();
        assert_relative_eq!(u, 0.5, epsilon = 1e-9);
        assert_relative_eq!(v, 0.5, epsilon = 1e-9);
        assert_eq!(q.corners()[2], p(2.0, 2.0));
    }

    #[test]
    fn test_bilinear_vanishing_divisor() {
        // p11 collapses onto p10, so the v divisor is zero at u = 1.
        let collapsed = BarycentricQuadrilateral::new(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert_eq!(collapsed.bilinear_coords(1.0, 0.5), None);
        assert!(collapsed.bilinear_coords(0.5, 0.25).is_some());

        // Folded quad with p11 = 2 * p10 - p01: the root u = 0.5 zeroes the divisor.
        let folded = BarycentricQuadrilateral::new(p(0.0, 0.0), p(1.0, 0.0), p(2.0, -1.0), p(0.0, 1.0));
        assert_eq!(folded.bilinear_coords(0.25, 0.0), None);
    }

    #[test]
    fn test_invert_bilinear() {
        let (x, y, z, w) = (p(0.0, 0.0), p(2.0, 0.0), p(1.5, 1.0), p(0.5, 1.0));
        let (alpha, beta) = invert_bilinear(&p(1.0, 0.5), &x, &y, &z, &w).unwrap();
        assert_relative_eq!(alpha, 0.5, epsilon = 1e-9);
        assert_relative_eq!(beta, 0.5, epsilon = 1e-9);

        let (x, y, z, w) = (p(0.0, 0.0), p(1.0, 0.0), p(2.0, 2.0), p(0.0, 1.0));
        let (alpha, beta) = invert_bilinear(&p(0.75, 0.75), &x, &y, &z, &w).unwrap();
        assert_relative_eq!(alpha, 0.5, epsilon = 1e-9);
        assert_relative_eq!(beta, 0.5, epsilon = 1e-9);
    }
}
