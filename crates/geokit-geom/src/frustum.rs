//! View frustums: six inward-facing planes.

use crate::error::{GeomError, Result};
use crate::extent::Extent;
use crate::plane::Plane;
use geokit_angle::Angle;
use geokit_math::{homogeneous, Matrix4, Point3, Vec3, Vec4};

/// A truncated pyramid bounded by six planes whose positive sides face
/// inward.
///
/// Planes are kept in the order near, far, left, right, top, bottom, and
/// [`Frustum::planes`] returns them in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    near: Plane,
    far: Plane,
    left: Plane,
    right: Plane,
    top: Plane,
    bottom: Plane,
}

/// The eight corners of a frustum: `n`/`f` for near/far, `b`/`t` for
/// bottom/top, `l`/`r` for left/right.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct FrustumCorners {
    pub nbl: Point3,
    pub nbr: Point3,
    pub ntl: Point3,
    pub ntr: Point3,
    pub fbl: Point3,
    pub fbr: Point3,
    pub ftl: Point3,
    pub ftr: Point3,
}

impl Default for Frustum {
    /// The cube `[-1, 1]³`.
    fn default() -> Self {
        Self {
            near: Plane::from_raw(0.0, 0.0, -1.0, 1.0),
            far: Plane::from_raw(0.0, 0.0, 1.0, 1.0),
            left: Plane::from_raw(1.0, 0.0, 0.0, 1.0),
            right: Plane::from_raw(-1.0, 0.0, 0.0, 1.0),
            top: Plane::from_raw(0.0, -1.0, 0.0, 1.0),
            bottom: Plane::from_raw(0.0, 1.0, 0.0, 1.0),
        }
    }
}

impl Frustum {
    /// Frustum from its six planes.
    pub fn new(near: Plane, far: Plane, left: Plane, right: Plane, top: Plane, bottom: Plane) -> Self {
        Self {
            near,
            far,
            left,
            right,
            top,
            bottom,
        }
    }

    /// Extract the clipping planes of a projection matrix: the fourth row
    /// plus or minus each of the first three, normalized.
    pub fn from_projection_matrix(m: &Matrix4) -> Result<Self> {
        let row = |i: usize| -> Vec4 { m.row(i).transpose() };
        let (r1, r2, r3, r4) = (row(0), row(1), row(2), row(3));
        let norm = |v: Vec4| Plane::from_vec4(v).map(|p| p.normalize());
        Ok(Self {
            near: norm(r4 + r3)?,
            far: norm(r4 - r3)?,
            left: norm(r4 + r1)?,
            right: norm(r4 - r1)?,
            top: norm(r4 - r2)?,
            bottom: norm(r4 + r2)?,
        })
    }

    /// Eye-space perspective frustum for a horizontal field of view.
    ///
    /// The eye sits at the origin looking down `-Z`. Requires
    /// `0° < fov <= 180°`, a non-empty viewport and `0 < near < far`.
    pub fn from_perspective(
        horizontal_fov: Angle,
        viewport_width: f64,
        viewport_height: f64,
        near: f64,
        far: f64,
    ) -> Result<Self> {
        let fov = horizontal_fov.degrees();
        if fov <= 0.0 || fov > 180.0 {
            return Err(GeomError::invalid(format!("field of view {fov}° out of range")));
        }
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return Err(GeomError::invalid("viewport must be non-empty"));
        }
        if near <= 0.0 || far <= near {
            return Err(GeomError::invalid(format!(
                "clip distances near={near} far={far} must satisfy 0 < near < far"
            )));
        }

        let focal = 1.0 / horizontal_fov.tan_half_angle();
        let aspect = viewport_height / viewport_width;
        let lr = (focal * focal + 1.0).sqrt();
        let bt = (focal * focal + aspect * aspect).sqrt();

        Ok(Self {
            near: Plane::new(0.0, 0.0, -1.0, -near)?,
            far: Plane::new(0.0, 0.0, 1.0, far)?,
            left: Plane::new(focal / lr, 0.0, -1.0 / lr, 0.0)?,
            right: Plane::new(-focal / lr, 0.0, -1.0 / lr, 0.0)?,
            top: Plane::new(0.0, -focal / bt, -aspect / bt, 0.0)?,
            bottom: Plane::new(0.0, focal / bt, -aspect / bt, 0.0)?,
        })
    }

    /// Box of the given width and height centered on the `Z` axis,
    /// between the `near` and `far` distances down `-Z`.
    pub fn from_orthographic(width: f64, height: f64, near: f64, far: f64) -> Result<Self> {
        if far - near <= 0.0 || width <= 0.0 || height <= 0.0 {
            return Err(GeomError::invalid(format!(
                "orthographic volume {width}x{height} [{near}, {far}] is empty"
            )));
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        Ok(Self {
            near: Plane::new(0.0, 0.0, -1.0, if near < 0.0 { near } else { -near })?,
            far: Plane::new(0.0, 0.0, 1.0, if far < 0.0 { -far } else { far })?,
            left: Plane::new(1.0, 0.0, 0.0, hw)?,
            right: Plane::new(-1.0, 0.0, 0.0, hw)?,
            top: Plane::new(0.0, -1.0, 0.0, hh)?,
            bottom: Plane::new(0.0, 1.0, 0.0, hh)?,
        })
    }

    /// Perspective frustum from the four eye-space corner rays.
    ///
    /// Side planes pass through the eye; a pair of parallel corner rays is
    /// rejected.
    pub fn from_perspective_vecs(
        v_tl: &Vec3,
        v_tr: &Vec3,
        v_bl: &Vec3,
        v_br: &Vec3,
        near: f64,
        far: f64,
    ) -> Result<Self> {
        if far - near <= 0.0 {
            return Err(GeomError::invalid(format!(
                "clip distances near={near} far={far} must satisfy near < far"
            )));
        }
        let side = |a: &Vec3, b: &Vec3| -> Result<Plane> {
            let n = a
                .cross(b)
                .try_normalize(0.0)
                .ok_or_else(|| GeomError::invalid("frustum corner rays are parallel"))?;
            Plane::new(n.x, n.y, n.z, 0.0)
        };
        Ok(Self {
            near: Plane::new(0.0, 0.0, -1.0, if near < 0.0 { near } else { -near })?,
            far: Plane::new(0.0, 0.0, 1.0, if far < 0.0 { -far } else { far })?,
            left: side(v_bl, v_tl)?,
            right: side(v_tr, v_br)?,
            top: side(v_tl, v_tr)?,
            bottom: side(v_br, v_bl)?,
        })
    }

    /// Near plane.
    pub fn near(&self) -> &Plane {
        &self.near
    }

    /// Far plane.
    pub fn far(&self) -> &Plane {
        &self.far
    }

    /// Left plane.
    pub fn left(&self) -> &Plane {
        &self.left
    }

    /// Right plane.
    pub fn right(&self) -> &Plane {
        &self.right
    }

    /// Top plane.
    pub fn top(&self) -> &Plane {
        &self.top
    }

    /// Bottom plane.
    pub fn bottom(&self) -> &Plane {
        &self.bottom
    }

    /// All six planes: near, far, left, right, top, bottom.
    pub fn planes(&self) -> [Plane; 6] {
        [self.near, self.far, self.left, self.right, self.top, self.bottom]
    }

    /// Whether `p` is strictly inside every plane.
    pub fn contains_point(&self, p: &Point3) -> bool {
        let v = homogeneous(p);
        self.planes().iter().all(|plane| plane.dot(&v) > 0.0)
    }

    /// Whether the bounding sphere of `extent` lies entirely inside.
    pub fn contains_extent(&self, extent: &dyn Extent) -> bool {
        let c = homogeneous(&extent.center());
        let r = extent.radius();
        self.planes().iter().all(|plane| plane.dot(&c) > r)
    }

    /// Whether `extent` may intersect this frustum.
    pub fn intersects(&self, extent: &dyn Extent) -> bool {
        extent.intersects_frustum(self)
    }

    /// Whether the segment `pa`-`pb` reaches into the frustum.
    ///
    /// Accepts as soon as an endpoint is inside or some plane crosses the
    /// segment, so a segment passing just outside an edge can be reported
    /// as intersecting.
    pub fn intersects_segment(&self, pa: &Point3, pb: &Point3) -> bool {
        if self.contains_point(pa) || self.contains_point(pb) {
            return true;
        }
        if pa == pb {
            return false;
        }
        for plane in self.planes() {
            if plane.on_same_side(pa, pb) < 0 {
                return false;
            }
            if plane.clip(pa, pb).is_some() {
                return true;
            }
        }
        false
    }

    /// Frustum with every plane vector multiplied by `m`.
    ///
    /// To move an eye-space frustum into model coordinates pass the
    /// transpose of the modelview matrix.
    pub fn transform_by(&self, m: &Matrix4) -> Result<Frustum> {
        let t = |p: &Plane| Plane::from_vec4(m * p.vector());
        Ok(Self {
            near: t(&self.near)?,
            far: t(&self.far)?,
            left: t(&self.left)?,
            right: t(&self.right)?,
            top: t(&self.top)?,
            bottom: t(&self.bottom)?,
        })
    }

    /// The eight corner points.
    pub fn corners(&self) -> Result<FrustumCorners> {
        let at = |a: &Plane, b: &Plane, c: &Plane| Plane::intersect_planes(a, b, c);
        Ok(FrustumCorners {
            nbl: at(&self.near, &self.bottom, &self.left)?,
            nbr: at(&self.near, &self.bottom, &self.right)?,
            ntl: at(&self.near, &self.top, &self.left)?,
            ntr: at(&self.near, &self.top, &self.right)?,
            fbl: at(&self.far, &self.bottom, &self.left)?,
            fbr: at(&self.far, &self.bottom, &self.right)?,
            ftl: at(&self.far, &self.top, &self.left)?,
            ftr: at(&self.far, &self.top, &self.right)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geokit_math::Transform;

    fn assert_planes_eq(a: &Frustum, b: &Frustum) {
        for (pa, pb) in a.planes().iter().zip(b.planes().iter()) {
            assert_relative_eq!(pa.vector(), pb.vector(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unit_frustum_contains() {
        let f = Frustum::default();
        assert!(f.contains_point(&Point3::origin()));
        assert!(f.contains_point(&Point3::new(0.9, -0.9, 0.9)));
        assert!(!f.contains_point(&Point3::new(1.0, 0.0, 0.0)));
        assert!(!f.contains_point(&Point3::new(0.0, 0.0, -1.5)));
    }

    #[test]
    fn test_perspective_matches_projection_matrix() {
        let fov = Angle::from_degrees(60.0);
        let direct = Frustum::from_perspective(fov, 800.0, 600.0, 1.0, 100.0).unwrap();
        let proj = Transform::perspective(fov.radians(), 800.0, 600.0, 1.0, 100.0).unwrap();
        let extracted = Frustum::from_projection_matrix(&proj.matrix).unwrap();
        assert_planes_eq(&direct, &extracted);
    }

    #[test]
    fn test_perspective_contains_points_down_negative_z() {
        let f = Frustum::from_perspective(Angle::from_degrees(90.0), 100.0, 100.0, 1.0, 10.0).unwrap();
        assert!(f.contains_point(&Point3::new(0.0, 0.0, -5.0)));
        assert!(f.contains_point(&Point3::new(4.0, 0.0, -5.0)));
        assert!(!f.contains_point(&Point3::new(6.0, 0.0, -5.0)));
        assert!(!f.contains_point(&Point3::new(0.0, 0.0, 5.0)));
        assert!(!f.contains_point(&Point3::new(0.0, 0.0, -0.5)));
        assert!(!f.contains_point(&Point3::new(0.0, 0.0, -11.0)));
    }

    #[test]
    fn test_perspective_validation() {
        let fov = Angle::from_degrees(45.0);
        assert!(Frustum::from_perspective(Angle::ZERO, 1.0, 1.0, 1.0, 2.0).is_err());
        assert!(Frustum::from_perspective(Angle::from_degrees(181.0), 1.0, 1.0, 1.0, 2.0).is_err());
        assert!(Frustum::from_perspective(fov, 0.0, 1.0, 1.0, 2.0).is_err());
        assert!(Frustum::from_perspective(fov, 1.0, 1.0, 0.0, 2.0).is_err());
        assert!(Frustum::from_perspective(fov, 1.0, 1.0, 2.0, 2.0).is_err());
        assert!(Frustum::from_perspective(Angle::POS180, 1.0, 1.0, 1.0, 2.0).is_ok());
    }

    #[test]
    fn test_orthographic_box() {
        let f = Frustum::from_orthographic(4.0, 2.0, 1.0, 10.0).unwrap();
        assert!(f.contains_point(&Point3::new(1.9, 0.9, -5.0)));
        assert!(!f.contains_point(&Point3::new(2.1, 0.0, -5.0)));
        assert!(!f.contains_point(&Point3::new(0.0, 0.0, -0.5)));
        assert!(Frustum::from_orthographic(4.0, 2.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn test_perspective_vecs_matches_square_fov() {
        let tl = Vec3::new(-1.0, 1.0, -1.0);
        let tr = Vec3::new(1.0, 1.0, -1.0);
        let bl = Vec3::new(-1.0, -1.0, -1.0);
        let br = Vec3::new(1.0, -1.0, -1.0);
        let from_vecs = Frustum::from_perspective_vecs(&tl, &tr, &bl, &br, 1.0, 10.0).unwrap();
        let from_fov = Frustum::from_perspective(Angle::from_degrees(90.0), 1.0, 1.0, 1.0, 10.0).unwrap();
        assert_planes_eq(&from_vecs, &from_fov);

        assert!(Frustum::from_perspective_vecs(&tl, &tl, &bl, &br, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_intersects_segment() {
        let f = Frustum::default();
        let o = Point3::origin();
        assert!(f.intersects_segment(&o, &Point3::new(5.0, 0.0, 0.0)));
        assert!(f.intersects_segment(&Point3::new(-5.0, 0.0, 0.0), &Point3::new(5.0, 0.0, 0.0)));
        assert!(!f.intersects_segment(&Point3::new(2.0, -3.0, 0.0), &Point3::new(2.0, 3.0, 0.0)));
        let out = Point3::new(3.0, 3.0, 3.0);
        assert!(!f.intersects_segment(&out, &out));
    }

    #[test]
    fn test_transform_by_translation() {
        // Moving the planes by the transposed inverse of a translation
        // moves the volume by that translation.
        let m = Transform::translation(-10.0, 0.0, 0.0).transpose().matrix;
        let moved = Frustum::default().transform_by(&m).unwrap();
        assert!(moved.contains_point(&Point3::new(10.5, 0.0, 0.0)));
        assert!(!moved.contains_point(&Point3::origin()));
    }

    #[test]
    fn test_corners() {
        let c = Frustum::default().corners().unwrap();
        assert_relative_eq!(c.nbl, Point3::new(-1.0, -1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(c.ftr, Point3::new(1.0, 1.0, -1.0), epsilon = 1e-12);

        let p = Frustum::from_perspective(Angle::from_degrees(90.0), 1.0, 1.0, 1.0, 10.0)
            .unwrap()
            .corners()
            .unwrap();
        assert_relative_eq!(p.ntr, Point3::new(1.0, 1.0, -1.0), epsilon = 1e-9);
        assert_relative_eq!(p.fbl, Point3::new(-10.0, -10.0, -10.0), epsilon = 1e-9);
    }
}
