//! The bounding-volume query surface and the view it is projected through.

use crate::error::{GeomError, Result};
use crate::frustum::Frustum;
use crate::intersection::Intersection;
use crate::line::Line;
use crate::plane::Plane;
use geokit_angle::Angle;
use geokit_math::{homogeneous, Matrix4, Point3, Transform, Vec3};
use std::f64::consts::PI;
use std::fmt::Debug;

/// A bounding volume that can be culled against frustums and picked by
/// lines.
///
/// Implementors are immutable values, safe to test from many threads at
/// once.
pub trait Extent: Send + Sync + Debug {
    /// Center of the volume.
    fn center(&self) -> Point3;

    /// Radius of a sphere enclosing the volume.
    fn radius(&self) -> f64;

    /// Twice [`Extent::radius`].
    fn diameter(&self) -> f64 {
        2.0 * self.radius()
    }

    /// Extent of the volume along the normal of `plane`.
    fn effective_radius(&self, plane: &Plane) -> f64;

    /// Whether the volume may intersect `frustum`. False positives are
    /// allowed, false negatives are not.
    fn intersects_frustum(&self, frustum: &Frustum) -> bool;

    /// Whether `line` passes through the volume.
    fn intersects_line(&self, line: &Line) -> bool;

    /// Whether the volume reaches the positive side of `plane`.
    fn intersects_plane(&self, plane: &Plane) -> bool;

    /// Crossings of `line` with the surface, nearest first.
    fn intersect(&self, line: &Line) -> Vec<Intersection>;

    /// Approximate screen area in pixels. `f64::INFINITY` when the eye is
    /// inside the volume or part of it is behind the eye.
    fn projected_area(&self, view: &dyn View) -> f64;
}

/// What an extent needs from a camera to estimate its screen size.
pub trait View {
    /// Eye position in model coordinates.
    fn eye_point(&self) -> Point3;

    /// Model-to-eye transform. Eye space looks down `-Z`.
    fn modelview(&self) -> &Matrix4;

    /// Width in model units of one pixel at `distance` from the eye.
    fn pixel_size_at_distance(&self, distance: f64) -> f64;
}

/// A perspective camera.
#[derive(Debug, Clone)]
pub struct PerspectiveView {
    modelview: Matrix4,
    eye: Point3,
    field_of_view: Angle,
    viewport_width: f64,
    viewport_height: f64,
    frustum: Frustum,
    model_frustum: Frustum,
}

impl PerspectiveView {
    /// Camera at `eye` looking at `center`.
    ///
    /// Fails when the eye and center coincide, `up` is parallel to the view
    /// direction, or the projection parameters are rejected by
    /// [`Frustum::from_perspective`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        eye: Point3,
        center: Point3,
        up: Vec3,
        field_of_view: Angle,
        viewport_width: f64,
        viewport_height: f64,
        near: f64,
        far: f64,
    ) -> Result<Self> {
        let look = Transform::look_at(&eye, &center, &up)
            .ok_or_else(|| GeomError::invalid("degenerate look-at configuration"))?;
        let frustum =
            Frustum::from_perspective(field_of_view, viewport_width, viewport_height, near, far)?;
        let model_frustum = frustum.transform_by(&look.matrix.transpose())?;
        Ok(Self {
            modelview: look.matrix,
            eye,
            field_of_view,
            viewport_width,
            viewport_height,
            frustum,
            model_frustum,
        })
    }

    /// Horizontal field of view.
    pub fn field_of_view(&self) -> Angle {
        self.field_of_view
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Frustum in eye coordinates.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Frustum in model coordinates.
    pub fn frustum_in_model_coordinates(&self) -> &Frustum {
        &self.model_frustum
    }
}

impl View for PerspectiveView {
    fn eye_point(&self) -> Point3 {
        self.eye
    }

    fn modelview(&self) -> &Matrix4 {
        &self.modelview
    }

    fn pixel_size_at_distance(&self, distance: f64) -> f64 {
        let frustum_width = 2.0 * self.field_of_view.tan_half_angle();
        distance.abs() * frustum_width / self.viewport_width.max(1.0)
    }
}

/// Screen area in pixels of a sphere seen through `view`.
///
/// Zero for a zero radius; infinite when the eye is inside the sphere or
/// the sphere reaches behind the eye.
pub fn sphere_projected_area(view: &dyn View, center: &Point3, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    if (center - view.eye_point()).norm() <= radius {
        return f64::INFINITY;
    }
    let z = (view.modelview() * homogeneous(center)).z;
    if z + radius >= 0.0 {
        return f64::INFINITY;
    }
    let pixel = view.pixel_size_at_distance(z.abs());
    let screen_radius = radius / pixel;
    PI * screen_radius * screen_radius
}
