//! Oriented rectangles bounding a point set.

use crate::error::{GeomError, Result};
use crate::plane::Plane;
use geokit_math::{average, principal_axes, Point3, Vec3};

/// The tightest rectangle around a point set in the frame of its two
/// leading principal axes.
///
/// Every call to [`BoundedPlane::expand`] recomputes the frame from the full
/// vertex list. Expanding takes `&mut self`, so sharing one instance
/// between threads that grow it requires a lock.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedPlane {
    vertices: Vec<Point3>,
    center: Point3,
    axes: [Vec3; 2],
    axis_lengths: (f64, f64),
    half_planes: [Plane; 2],
}

impl BoundedPlane {
    /// Bound `vertices`. Fails for an empty slice or a non-finite vertex.
    pub fn new(vertices: &[Point3]) -> Result<Self> {
        let vertices = vertices.to_vec();
        let frame = Frame::compute(&vertices)?;
        Ok(Self::from_frame(vertices, frame))
    }

    /// Add `vertices` and recompute the bounds. On error `self` is left
    /// unchanged.
    pub fn expand(&mut self, vertices: &[Point3]) -> Result<()> {
        let mut all = Vec::with_capacity(self.vertices.len() + vertices.len());
        all.extend_from_slice(&self.vertices);
        all.extend_from_slice(vertices);
        let frame = Frame::compute(&all)?;
        *self = Self::from_frame(all, frame);
        Ok(())
    }

    fn from_frame(vertices: Vec<Point3>, frame: Frame) -> Self {
        Self {
            vertices,
            center: frame.center,
            axes: frame.axes,
            axis_lengths: frame.lengths,
            half_planes: frame.half_planes,
        }
    }

    /// All vertices added so far.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Unit directions of the rectangle's sides, major first.
    pub fn axes(&self) -> [Vec3; 2] {
        self.axes
    }

    /// Side lengths along the two axes.
    pub fn axis_lengths(&self) -> (f64, f64) {
        self.axis_lengths
    }

    /// Planes through the center perpendicular to each axis.
    pub fn half_planes(&self) -> [Plane; 2] {
        self.half_planes
    }

    /// Normal of the rectangle's plane.
    pub fn normal(&self) -> Vec3 {
        self.axes[0].cross(&self.axes[1])
    }

    /// The four corners, walking around the rectangle.
    pub fn corners(&self) -> [Point3; 4] {
        let hr = self.axes[0] * (self.axis_lengths.0 / 2.0);
        let hs = self.axes[1] * (self.axis_lengths.1 / 2.0);
        let c = self.center;
        [c - hr - hs, c + hr - hs, c + hr + hs, c - hr + hs]
    }

    /// Whether `p` projects into the rectangle.
    pub fn contains(&self, p: &Point3) -> bool {
        const SLACK: f64 = 1e-9;
        let d = p - self.center;
        d.dot(&self.axes[0]).abs() <= self.axis_lengths.0 / 2.0 + SLACK
            && d.dot(&self.axes[1]).abs() <= self.axis_lengths.1 / 2.0 + SLACK
    }
}

struct Frame {
    center: Point3,
    axes: [Vec3; 2],
    lengths: (f64, f64),
    half_planes: [Plane; 2],
}

impl Frame {
    fn compute(vertices: &[Point3]) -> Result<Frame> {
        if vertices.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(GeomError::invalid("bounded plane vertices must be finite"));
        }
        let mean = average(vertices)
            .ok_or_else(|| GeomError::invalid("bounded plane needs at least one vertex"))?;
        let [r, s, _] = principal_axes(vertices)
            .ok_or_else(|| GeomError::invalid("bounded plane needs at least one vertex"))?;

        let (mut min_r, mut max_r) = (f64::MAX, -f64::MAX);
        let (mut min_s, mut max_s) = (f64::MAX, -f64::MAX);
        for p in vertices {
            let d = p - mean;
            let pr = d.dot(&r);
            let ps = d.dot(&s);
            min_r = min_r.min(pr);
            max_r = max_r.max(pr);
            min_s = min_s.min(ps);
            max_s = max_s.max(ps);
        }

        let center = mean + r * ((min_r + max_r) / 2.0) + s * ((min_s + max_s) / 2.0);
        Ok(Frame {
            center,
            axes: [r, s],
            lengths: (max_r - min_r, max_s - min_s),
            half_planes: [
                Plane::from_normal_and_point(&r, &center)?,
                Plane::from_normal_and_point(&s, &center)?,
            ],
        })
    }
}
