//! Ray/shape crossing records.

use geokit_angle::Position;
use geokit_math::Point3;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// One place where a line meets a shape.
///
/// The geometric fields are fixed when the intersection is computed.
/// Callers may then attach a geographic position or an owning object with
/// the `with_*` builders, which consume and return the value.
#[derive(Clone)]
pub struct Intersection {
    point: Point3,
    length: Option<f64>,
    position: Option<Position>,
    is_tangent: bool,
    object: Option<Arc<dyn Any + Send + Sync>>,
}

impl Intersection {
    /// Intersection at `point`.
    pub fn new(point: Point3, is_tangent: bool) -> Self {
        Self {
            point,
            length: None,
            position: None,
            is_tangent,
            object: None,
        }
    }

    /// Intersection at `point` with its parameter along the line.
    pub fn with_length(point: Point3, length: f64, is_tangent: bool) -> Self {
        Self {
            length: Some(length),
            ..Self::new(point, is_tangent)
        }
    }

    /// Attach a geographic position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the object that was hit.
    pub fn with_object(mut self, object: Arc<dyn Any + Send + Sync>) -> Self {
        self.object = Some(object);
        self
    }

    /// Crossing point.
    pub fn point(&self) -> &Point3 {
        &self.point
    }

    /// Line parameter of the crossing, when known.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Attached geographic position.
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Whether the line only touches the shape here.
    pub fn is_tangent(&self) -> bool {
        self.is_tangent
    }

    /// Attached object.
    pub fn object(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.object.as_ref()
    }

    /// Merge `a` then `b` into one list ordered by distance from
    /// `reference`.
    ///
    /// The merge is stable: ties keep their input order, and an entry whose
    /// distance is NaN compares equal to everything so it is never moved
    /// past its neighbours.
    pub fn sort(reference: &Point3, a: &[Intersection], b: &[Intersection]) -> Vec<Intersection> {
        let mut keyed: Vec<(f64, &Intersection)> = Vec::with_capacity(a.len() + b.len());
        for item in a.iter().chain(b) {
            let d = (item.point - reference).norm();
            let mut at = keyed.len();
            while at > 0 && keyed[at - 1].0.partial_cmp(&d) == Some(Ordering::Greater) {
                at -= 1;
            }
            keyed.insert(at, (d, item));
        }
        keyed.into_iter().map(|(_, i)| i.clone()).collect()
    }
}

impl fmt::Debug for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("point", &self.point)
            .field("length", &self.length)
            .field("position", &self.position)
            .field("is_tangent", &self.is_tangent)
            .field("object", &self.object.as_ref().map(|_| ".."))
            .finish()
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Intersection point: ({}, {}, {})",
            self.point.x, self.point.y, self.point.z
        )?;
        if self.is_tangent {
            write!(f, " is a tangent")?;
        }
        Ok(())
    }
}
