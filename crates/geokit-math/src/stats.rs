//! Statistics over point sets: mean, extrema, covariance and principal axes.

use crate::{Matrix3, Point3, Vec3};
use nalgebra::SymmetricEigen;
use std::cmp::Ordering;

/// Arithmetic mean of `points`, or `None` for an empty slice.
pub fn average(points: &[Point3]) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Component-wise minimum and maximum of `points`.
pub fn extrema(points: &[Point3]) -> Option<(Point3, Point3)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }
    Some((min, max))
}

/// Population covariance matrix of `points` about their mean.
pub fn covariance(points: &[Point3]) -> Option<Matrix3> {
    let mean = average(points)?;
    let mut c = Matrix3::zeros();
    for p in points {
        let d = p - mean;
        c += d * d.transpose();
    }
    Some(c / points.len() as f64)
}

/// Principal axes of `points`: the unit eigenvectors of the covariance
/// matrix, ordered by descending eigenvalue.
pub fn principal_axes(points: &[Point3]) -> Option<[Vec3; 3]> {
    let c = covariance(points)?;
    let eigen = SymmetricEigen::new(c);

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(Ordering::Equal)
    });

    let axis = |i: usize| -> Vec3 {
        let v: Vec3 = eigen.eigenvectors.column(order[i]).into_owned();
        let len = v.norm();
        if len > 0.0 {
            v / len
        } else {
            v
        }
    };
    Some([axis(0), axis(1), axis(2)])
}
