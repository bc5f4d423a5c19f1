#![warn(missing_docs)]

//! Math types for the geokit geometry crates.
//!
//! Thin wrappers around nalgebra providing the vocabulary shared by the
//! angle, geometry and bounding-volume crates: points, homogeneous
//! vectors and view/projection transforms, plus a few numeric routines
//! over point sets.
//!
//! # Architecture
//!
//! - [`Transform`] - 4x4 matrices, including perspective and look-at builders
//! - [`quaternion`] - axis-angle quaternions and spherical interpolation
//! - [`stats`] - averages, extrema, covariance and principal axes of point sets
//! - [`circle`] - the circle passing through three points

pub mod circle;
pub mod quaternion;
pub mod stats;

pub use circle::{circle_through_points, Circle};
pub use stats::{average, covariance, extrema, principal_axes};

use nalgebra::{Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A homogeneous 4-component vector. Planes use `w` as the distance term.
pub type Vec4 = Vector4<f64>;

/// A 4x4 matrix (column vectors on the right).
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// A 3x3 matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Lift a point to homogeneous coordinates (`w = 1`).
#[inline]
pub fn homogeneous(p: &Point3) -> Vec4 {
    Vec4::new(p.x, p.y, p.z, 1.0)
}

/// A 4x4 transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4,
}

/// Eye-to-center distances and cross products shorter than this make
/// [`Transform::look_at`] degenerate.
const LOOK_AT_EPSILON: f64 = 1e-9;

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&Vec3::new(dx, dy, dz));
        Self { matrix }
    }

    /// Perspective projection using a *horizontal* field of view.
    ///
    /// Returns `None` unless `0 < fov <= π`, the viewport is non-empty and
    /// `0 < near < far`.
    pub fn perspective(
        horizontal_fov: f64,
        viewport_width: f64,
        viewport_height: f64,
        near: f64,
        far: f64,
    ) -> Option<Self> {
        if horizontal_fov <= 0.0 || horizontal_fov > std::f64::consts::PI {
            return None;
        }
        if viewport_width <= 0.0 || viewport_height <= 0.0 || near <= 0.0 || far <= near {
            return None;
        }
        let f = 1.0 / (horizontal_fov / 2.0).tan();
        let depth = far - near;
        let matrix = Matrix4::new(
            f, 0.0, 0.0, 0.0,
            0.0, f * viewport_width / viewport_height, 0.0, 0.0,
            0.0, 0.0, -(far + near) / depth, -(2.0 * far * near) / depth,
            0.0, 0.0, -1.0, 0.0,
        );
        Some(Self { matrix })
    }

    /// View matrix looking from `eye` toward `center` with the given `up`.
    ///
    /// Eye space looks down `-Z`. Returns `None` if `eye` and `center`
    /// coincide or `up` is parallel to the view direction.
    pub fn look_at(eye: &Point3, center: &Point3, up: &Vec3) -> Option<Self> {
        let forward = (center - eye).try_normalize(LOOK_AT_EPSILON)?;
        let side = forward.cross(up).try_normalize(LOOK_AT_EPSILON)?;
        let up = side.cross(&forward);
        let axes = Matrix4::new(
            side.x, side.y, side.z, 0.0,
            up.x, up.y, up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let to_eye = Transform::translation(-eye.x, -eye.y, -eye.z);
        Some(Self {
            matrix: axes * to_eye.matrix,
        })
    }

    /// Transpose of this transform.
    ///
    /// Planes move by the transposed inverse of the matrix that moves points.
    pub fn transpose(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn apply(t: &Transform, p: &Point3) -> Point3 {
        let v = t.matrix * homogeneous(p);
        Point3::new(v.x, v.y, v.z) / v.w
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = apply(&t, &Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(result, Point3::new(11.0, 22.0, 33.0), epsilon = 1e-12);
    }

    #[test]
    fn test_transposed_translation_moves_planes() {
        // The x >= 0 half-space, moved by +2 in x, becomes x >= 2.
        let plane = Vec4::new(1.0, 0.0, 0.0, 0.0);
        let moved = Transform::translation(-2.0, 0.0, 0.0).transpose().matrix * plane;
        assert_relative_eq!(moved, Vec4::new(1.0, 0.0, 0.0, -2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_look_at_maps_center_to_negative_z() {
        let eye = Point3::new(0.0, 0.0, 10.0);
        let view = Transform::look_at(&eye, &Point3::origin(), &Vec3::y()).unwrap();
        let c = apply(&view, &Point3::origin());
        assert_relative_eq!(c, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-12);
        let e = apply(&view, &eye);
        assert_relative_eq!(e, Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_look_at_degenerate() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(Transform::look_at(&p, &p, &Vec3::y()).is_none());
        let eye = Point3::new(0.0, 10.0, 0.0);
        assert!(Transform::look_at(&eye, &Point3::origin(), &Vec3::y()).is_none());
    }

    #[test]
    fn test_perspective_validation() {
        assert!(Transform::perspective(PI / 2.0, 800.0, 600.0, 1.0, 100.0).is_some());
        assert!(Transform::perspective(0.0, 800.0, 600.0, 1.0, 100.0).is_none());
        assert!(Transform::perspective(PI / 2.0, 800.0, 600.0, 0.0, 100.0).is_none());
        assert!(Transform::perspective(PI / 2.0, 800.0, 600.0, 10.0, 10.0).is_none());
        assert!(Transform::perspective(PI / 2.0, 0.0, 600.0, 1.0, 100.0).is_none());
    }

    #[test]
    fn test_perspective_near_plane_maps_to_minus_one() {
        let p = Transform::perspective(PI / 2.0, 100.0, 100.0, 1.0, 100.0).unwrap();
        assert_relative_eq!(apply(&p, &Point3::new(0.0, 0.0, -1.0)).z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(apply(&p, &Point3::new(0.0, 0.0, -100.0)).z, 1.0, epsilon = 1e-12);
    }
}
