//! Pick frustums: a 3-D frustum paired with the screen rectangle it was
//! built from.

use crate::error::Result;
use crate::extent::Extent;
use crate::frustum::Frustum;
use geokit_math::{Matrix4, Point3};

/// An integer screen rectangle with its origin at `(x, y)`.
///
/// Containment is half-open: the left and top edges are inside, the right
/// and bottom edges are not. A rectangle with a non-positive width or
/// height contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl ScreenRect {
    /// Rectangle from origin and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the screen point `(x, y)` is inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let (rx, ry) = (self.x as f64, self.y as f64);
        x >= rx && y >= ry && x < rx + self.width as f64 && y < ry + self.height as f64
    }

    /// Whether the two rectangles share some area.
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (ax, ay) = (self.x as i64, self.y as i64);
        let (bx, by) = (other.x as i64, other.y as i64);
        bx + (other.width as i64) > ax
            && by + (other.height as i64) > ay
            && bx < ax + self.width as i64
            && by < ay + self.height as i64
    }
}

/// A frustum with the screen rectangle that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickPointFrustum {
    frustum: Frustum,
    screen_rect: ScreenRect,
}

impl PickPointFrustum {
    /// Pair a frustum with its screen rectangle.
    pub fn new(frustum: Frustum, screen_rect: ScreenRect) -> Self {
        Self {
            frustum,
            screen_rect,
        }
    }

    /// The 3-D frustum.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// The screen rectangle.
    pub fn screen_rect(&self) -> &ScreenRect {
        &self.screen_rect
    }

    /// Whether the screen point `(x, y)` is inside the rectangle.
    pub fn contains_in_screen(&self, x: f64, y: f64) -> bool {
        self.screen_rect.contains(x, y)
    }

    /// Whether `rect` overlaps the screen rectangle.
    pub fn intersects_in_screen(&self, rect: &ScreenRect) -> bool {
        self.screen_rect.intersects(rect)
    }

    /// Whether `p` is inside the 3-D frustum.
    pub fn contains_point(&self, p: &Point3) -> bool {
        self.frustum.contains_point(p)
    }

    /// Whether `extent` may intersect the 3-D frustum.
    pub fn intersects(&self, extent: &dyn Extent) -> bool {
        self.frustum.intersects(extent)
    }

    /// Whether the segment reaches into the 3-D frustum.
    pub fn intersects_segment(&self, pa: &Point3, pb: &Point3) -> bool {
        self.frustum.intersects_segment(pa, pb)
    }

    /// Transform the planes, keeping the screen rectangle.
    pub fn transform_by(&self, m: &Matrix4) -> Result<PickPointFrustum> {
        Ok(Self::new(self.frustum.transform_by(m)?, self.screen_rect))
    }
}

/// A set of pick frustums queried together.
#[derive(Debug, Clone, Default)]
pub struct PickPointFrustumList {
    frustums: Vec<PickPointFrustum>,
}

impl PickPointFrustumList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frustum.
    pub fn push(&mut self, frustum: PickPointFrustum) {
        self.frustums.push(frustum);
    }

    /// Number of frustums.
    pub fn len(&self) -> usize {
        self.frustums.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.frustums.is_empty()
    }

    /// Iterate the frustums.
    pub fn iter(&self) -> std::slice::Iter<'_, PickPointFrustum> {
        self.frustums.iter()
    }

    /// Whether every frustum contains `p`. True for an empty list.
    pub fn contains_in_all(&self, p: &Point3) -> bool {
        self.frustums.iter().all(|f| f.contains_point(p))
    }

    /// Whether some frustum contains `p`.
    pub fn contains_in_any(&self, p: &Point3) -> bool {
        self.frustums.iter().any(|f| f.contains_point(p))
    }

    /// Whether every screen rectangle contains `(x, y)`. True for an empty
    /// list.
    pub fn contains_in_all_screen(&self, x: f64, y: f64) -> bool {
        self.frustums.iter().all(|f| f.contains_in_screen(x, y))
    }

    /// Whether some screen rectangle contains `(x, y)`.
    pub fn contains_in_any_screen(&self, x: f64, y: f64) -> bool {
        self.frustums.iter().any(|f| f.contains_in_screen(x, y))
    }

    /// Whether some frustum may intersect `extent`.
    pub fn intersects_any(&self, extent: &dyn Extent) -> bool {
        self.frustums.iter().any(|f| f.intersects(extent))
    }

    /// Whether the segment reaches into some frustum.
    pub fn intersects_any_segment(&self, pa: &Point3, pb: &Point3) -> bool {
        self.frustums.iter().any(|f| f.intersects_segment(pa, pb))
    }

    /// Whether `rect` overlaps some screen rectangle.
    pub fn intersects_any_screen(&self, rect: &ScreenRect) -> bool {
        self.frustums.iter().any(|f| f.intersects_in_screen(rect))
    }
}

impl FromIterator<PickPointFrustum> for PickPointFrustumList {
    fn from_iter<I: IntoIterator<Item = PickPointFrustum>>(iter: I) -> Self {
        Self {
            frustums: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PickPointFrustumList {
    type Item = &'a PickPointFrustum;
    type IntoIter = std::slice::Iter<'a, PickPointFrustum>;

    fn into_iter(self) -> Self::IntoIter {
        self.frustums.iter()
    }
}
