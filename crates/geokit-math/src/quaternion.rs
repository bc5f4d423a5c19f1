//! Axis-angle quaternions and spherical linear interpolation.

use crate::Vec3;
use nalgebra::Quaternion;

/// Below this `1 - |a·b|` the inputs are treated as parallel and blended linearly.
const SLERP_EPSILON: f64 = 1e-4;

/// Quaternion rotating by `radians` about `axis`. The axis is normalized here.
pub fn from_axis_angle(axis: &Vec3, radians: f64) -> Quaternion<f64> {
    let len = axis.norm();
    let (s, c) = (radians / 2.0).sin_cos();
    let (x, y, z) = if len > 0.0 {
        (axis.x / len, axis.y / len, axis.z / len)
    } else {
        (0.0, 0.0, 0.0)
    };
    Quaternion::new(c, x * s, y * s, z * s)
}

/// Spherical linear interpolation from `a` to `b`.
///
/// `t` outside `[0, 1]` returns the nearer endpoint. The shorter arc is
/// taken by flipping `b` when the dot product is negative.
pub fn slerp(t: f64, a: &Quaternion<f64>, b: &Quaternion<f64>) -> Quaternion<f64> {
    if t < 0.0 {
        return *a;
    } else if t > 1.0 {
        return *b;
    }

    let mut dot = a.dot(b);
    let b = if dot < 0.0 {
        dot = -dot;
        -*b
    } else {
        *b
    };

    let (t1, t2) = if 1.0 - dot > SLERP_EPSILON {
        let angle = dot.acos();
        let sin_angle = angle.sin();
        (
            ((1.0 - t) * angle).sin() / sin_angle,
            (t * angle).sin() / sin_angle,
        )
    } else {
        (1.0 - t, t)
    };

    *a * t1 + b * t2
}

/// Rotation about the X axis encoded by `q`, in radians.
///
/// Returns `None` when the extraction is not a number.
pub fn rotation_x(q: &Quaternion<f64>) -> Option<f64> {
    let (x, y, z, w) = (q.i, q.j, q.k, q.w);
    let radians = (2.0 * x * w - 2.0 * y * z).atan2(1.0 - 2.0 * x * x - 2.0 * z * z);
    if radians.is_nan() {
        None
    } else {
        Some(radians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_x_round_trip() {
        for deg in [-170.0_f64, -90.0, -12.5, 0.0, 33.0, 90.0, 179.0] {
            let q = from_axis_angle(&Vec3::x(), deg.to_radians());
            let r = rotation_x(&q).unwrap();
            assert!((r - deg.to_radians()).abs() < 1e-12, "deg {deg}");
        }
    }

    #[test]
    fn test_slerp_midpoint() {
        let a = from_axis_angle(&Vec3::x(), 0.0);
        let b = from_axis_angle(&Vec3::x(), PI / 2.0);
        let mid = slerp(0.5, &a, &b);
        assert!((rotation_x(&mid).unwrap() - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_slerp_clamps_amount() {
        let a = from_axis_angle(&Vec3::x(), 0.1);
        let b = from_axis_angle(&Vec3::x(), 0.2);
        assert_eq!(slerp(-1.0, &a, &b), a);
        assert_eq!(slerp(2.0, &a, &b), b);
    }

    #[test]
    fn test_slerp_nearly_parallel_is_linear() {
        let a = from_axis_angle(&Vec3::x(), 0.3);
        let b = from_axis_angle(&Vec3::x(), 0.3 + 1e-6);
        let q = slerp(0.5, &a, &b);
        assert!((rotation_x(&q).unwrap() - (0.3 + 0.5e-6)).abs() < 1e-9);
    }
}
