//! Infinite lines and rays: origin plus direction.

use crate::error::{GeomError, Result};
use crate::frustum::Frustum;
use crate::intersection::Intersection;
use geokit_math::{Point3, Vec3};
use tracing::trace;

/// Extra clipping passes [`Line::clip_to_frustum`] makes when neither
/// endpoint started inside the frustum.
pub const CLIP_RETRY_LIMIT: usize = 1;

/// A line through `origin` along `direction`.
///
/// The direction is kept as given, so for a line built by
/// [`Line::from_segment`] the parameter `t` runs from 0 at the first
/// endpoint to 1 at the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    origin: Point3,
    direction: Vec3,
}

impl Line {
    /// Line from an origin and a non-zero direction.
    pub fn new(origin: Point3, direction: Vec3) -> Result<Self> {
        if direction.x == 0.0 && direction.y == 0.0 && direction.z == 0.0 {
            return Err(GeomError::invalid("line direction has zero length"));
        }
        Ok(Self { origin, direction })
    }

    /// Line through `pa` with direction `pb - pa`.
    pub fn from_segment(pa: &Point3, pb: &Point3) -> Result<Self> {
        Self::new(*pa, pb - pa)
    }

    /// Origin point.
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Direction vector.
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// `origin + direction * t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// `origin · direction`.
    pub fn self_dot(&self) -> f64 {
        self.origin.coords.dot(&self.direction)
    }

    /// Orthogonal projection of `p` onto the line.
    pub fn nearest_point_to(&self, p: &Point3) -> Point3 {
        let w = p - self.origin;
        let c1 = w.dot(&self.direction);
        let c2 = self.direction.dot(&self.direction);
        self.origin + self.direction * (c1 / c2)
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to(&self, p: &Point3) -> f64 {
        (p - self.nearest_point_to(p)).norm()
    }

    /// Point of the segment `p0`-`p1` closest to `p`.
    pub fn nearest_point_on_segment(p0: &Point3, p1: &Point3, p: &Point3) -> Point3 {
        let v = p1 - p0;
        let w = p - p0;
        let c1 = w.dot(&v);
        if c1 <= 0.0 {
            return *p0;
        }
        let c2 = v.dot(&v);
        if c2 <= c1 {
            return *p1;
        }
        p0 + v * (c1 / c2)
    }

    /// Distance from `p` to the segment `p0`-`p1`.
    pub fn distance_to_segment(p0: &Point3, p1: &Point3, p: &Point3) -> f64 {
        (p - Self::nearest_point_on_segment(p0, p1, p)).norm()
    }

    /// Whether `p` lies behind the origin, against the direction.
    pub fn is_point_behind_origin(&self, p: &Point3) -> bool {
        (p - self.origin).dot(&self.direction) < 0.0
    }

    /// The intersection closest to the origin, ignoring any behind it.
    pub fn nearest_intersection_point<'a>(
        &self,
        intersections: &'a [Intersection],
    ) -> Option<&'a Intersection> {
        intersections
            .iter()
            .filter(|i| !self.is_point_behind_origin(i.point()))
            .map(|i| ((i.point() - self.origin).norm(), i))
            .fold(None, |best: Option<(f64, &Intersection)>, (d, i)| match best {
                Some((bd, _)) if bd <= d => best,
                _ => Some((d, i)),
            })
            .map(|(_, i)| i)
    }

    /// Clip the segment `pa`-`pb` to `frustum`.
    ///
    /// Returns `None` when some plane has both endpoints strictly behind
    /// it. Clipping against each plane in turn can leave a segment that
    /// only passes near a frustum edge, so when neither endpoint started
    /// inside, the clipped segment is run through the planes again up to
    /// [`CLIP_RETRY_LIMIT`] times. The result is then returned as is; this
    /// is an approximation and may keep a sliver outside the frustum.
    pub fn clip_to_frustum(pa: &Point3, pb: &Point3, frustum: &Frustum) -> Option<(Point3, Point3)> {
        Self::clip_to_frustum_with_retries(pa, pb, frustum, CLIP_RETRY_LIMIT)
    }

    /// [`Line::clip_to_frustum`] with an explicit retry bound.
    pub fn clip_to_frustum_with_retries(
        pa: &Point3,
        pb: &Point3,
        frustum: &Frustum,
        retries: usize,
    ) -> Option<(Point3, Point3)> {
        let (mut a, mut b) = (*pa, *pb);
        let mut retries_left = retries;

        loop {
            let a_inside = frustum.contains_point(&a);
            let b_inside = frustum.contains_point(&b);
            if a_inside && b_inside {
                return Some((a, b));
            }

            let mut segment = (a, b);
            for plane in frustum.planes() {
                if plane.on_same_side(&segment.0, &segment.1) < 0 {
                    return None;
                }
                if let Some(clipped) = plane.clip(&segment.0, &segment.1) {
                    segment = clipped;
                }
            }

            if a_inside || b_inside || retries_left == 0 {
                return Some(segment);
            }
            retries_left -= 1;
            trace!(retries_left, "re-clipping segment with no endpoint inside frustum");
            (a, b) = segment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x_axis() -> Line {
        Line::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_zero_direction_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!(matches!(
            Line::new(p, Vec3::zeros()),
            Err(GeomError::InvalidArgument(_))
        ));
        assert!(Line::from_segment(&p, &p).is_err());
    }

    #[test]
    fn test_point_at_and_self_dot() {
        let l = Line::from_segment(&Point3::new(1.0, 0.0, 0.0), &Point3::new(3.0, 2.0, 0.0)).unwrap();
        assert_eq!(l.point_at(0.5), Point3::new(2.0, 1.0, 0.0));
        assert_eq!(l.point_at(1.0), Point3::new(3.0, 2.0, 0.0));
        assert_eq!(l.self_dot(), 2.0);
    }

    #[test]
    fn test_nearest_point_and_distance() {
        let l = x_axis();
        let p = Point3::new(4.0, 3.0, 0.0);
        assert_eq!(l.nearest_point_to(&p), Point3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(l.distance_to(&p), 3.0);

        // Scaled direction projects identically.
        let scaled = Line::new(Point3::origin(), Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert_eq!(scaled.nearest_point_to(&p), Point3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearest_point_on_segment_clamps() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(10.0, 0.0, 0.0);
        assert_eq!(Line::nearest_point_on_segment(&p0, &p1, &Point3::new(-3.0, 1.0, 0.0)), p0);
        assert_eq!(Line::nearest_point_on_segment(&p0, &p1, &Point3::new(13.0, 1.0, 0.0)), p1);
        assert_eq!(
            Line::nearest_point_on_segment(&p0, &p1, &Point3::new(4.0, 1.0, 0.0)),
            Point3::new(4.0, 0.0, 0.0)
        );
        assert_relative_eq!(Line::distance_to_segment(&p0, &p1, &Point3::new(13.0, 4.0, 0.0)), 5.0);
    }

    #[test]
    fn test_nearest_intersection_skips_points_behind() {
        let l = x_axis();
        let hits = vec![
            Intersection::new(Point3::new(-1.0, 0.0, 0.0), false),
            Intersection::new(Point3::new(7.0, 0.0, 0.0), false),
            Intersection::new(Point3::new(2.0, 0.0, 0.0), false),
            Intersection::new(Point3::new(2.0, 0.0, 0.0), true),
        ];
        let nearest = l.nearest_intersection_point(&hits).unwrap();
        assert_eq!(*nearest.point(), Point3::new(2.0, 0.0, 0.0));
        assert!(!nearest.is_tangent());

        let behind = vec![Intersection::new(Point3::new(-1.0, 0.0, 0.0), false)];
        assert!(l.nearest_intersection_point(&behind).is_none());
        assert!(l.nearest_intersection_point(&[]).is_none());
    }

    #[test]
    fn test_clip_to_unit_frustum() {
        let f = Frustum::default();

        let inside = (Point3::new(-0.5, 0.0, 0.0), Point3::new(0.5, 0.0, 0.0));
        assert_eq!(Line::clip_to_frustum(&inside.0, &inside.1, &f), Some(inside));

        let (a, b) =
            Line::clip_to_frustum(&Point3::new(-5.0, 0.0, 0.0), &Point3::new(5.0, 0.0, 0.0), &f).unwrap();
        assert_relative_eq!(a, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);

        let (a, b) =
            Line::clip_to_frustum(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 4.0, 0.0), &f).unwrap();
        assert_eq!(a, Point3::origin());
        assert_relative_eq!(b, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_clip_rejects_outside_segment() {
        let f = Frustum::default();
        let clipped =
            Line::clip_to_frustum(&Point3::new(2.0, -1.0, 0.0), &Point3::new(2.0, 1.0, 0.0), &f);
        assert!(clipped.is_none());
    }

    #[test]
    fn test_clip_with_zero_retries_still_clips() {
        let f = Frustum::default();
        let pa = Point3::new(-3.0, 0.5, 0.0);
        let pb = Point3::new(3.0, 0.5, 0.0);
        let (a, b) = Line::clip_to_frustum_with_retries(&pa, &pb, &f, 0).unwrap();
        assert_relative_eq!(a, Point3::new(-1.0, 0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(b, Point3::new(1.0, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_clip_retries_over_corner_cut() {
        // Both ends start outside, so every allowed retry runs. The segment
        // cuts across the (-1, -1) corner and each pass leaves the same piece.
        let f = Frustum::default();
        let pa = Point3::new(-3.0, 1.5, 0.0);
        let pb = Point3::new(1.5, -3.0, 0.0);
        assert!(!f.contains_point(&pa) && !f.contains_point(&pb));

        let once = Line::clip_to_frustum_with_retries(&pa, &pb, &f, 0).unwrap();
        assert_relative_eq!(once.0, Point3::new(-1.0, -0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(once.1, Point3::new(-0.5, -1.0, 0.0), epsilon = 1e-12);

        for retries in [CLIP_RETRY_LIMIT, 8] {
            let (a, b) = Line::clip_to_frustum_with_retries(&pa, &pb, &f, retries).unwrap();
            assert_relative_eq!(a, once.0, epsilon = 1e-12);
            assert_relative_eq!(b, once.1, epsilon = 1e-12);
        }
        assert_eq!(
            Line::clip_to_frustum(&pa, &pb, &f),
            Line::clip_to_frustum_with_retries(&pa, &pb, &f, CLIP_RETRY_LIMIT)
        );
    }

    #[test]
    fn test_clip_misses_corner_with_any_retries() {
        let f = Frustum::default();
        let pa = Point3::new(-3.0, 0.5, 0.0);
        let pb = Point3::new(0.5, -3.0, 0.0);
        for retries in [0, CLIP_RETRY_LIMIT, 8] {
            assert!(Line::clip_to_frustum_with_retries(&pa, &pb, &f, retries).is_none());
        }
    }
}
