#![warn(missing_docs)]

//! Geometric primitives for culling and picking.
//!
//! Planes, lines and frustums are small `Copy` values. Every query returns
//! a fresh value; only [`BoundedPlane::expand`] and the
//! [`Intersection`] annotation builders change a value after it is made.
//!
//! # Architecture
//!
//! - [`Plane`] - homogeneous plane with side tests, clipping and three-plane intersection
//! - [`Line`] - origin plus direction; projection and frustum clipping
//! - [`Frustum`] - six inward-facing planes; [`PickPointFrustum`] adds a screen rectangle
//! - [`Extent`] / [`View`] - the bounding-volume query surface and camera it projects through
//! - [`Intersection`] - ray/shape crossing records and distance sorting
//! - [`Triangle`], [`BarycentricTriangle`], [`BarycentricQuadrilateral`] - surface coordinates
//! - [`BoundedPlane`] - oriented rectangle around a point set
//!
//! # Example
//!
//! ```ignore
//! use geokit_geom::{Frustum, Line};
//! use geokit_math::Point3;
//!
//! let frustum = Frustum::default();
//! let clipped = Line::clip_to_frustum(
//!     &Point3::new(-5.0, 0.0, 0.0),
//!     &Point3::new(5.0, 0.0, 0.0),
//!     &frustum,
//! );
//! ```

pub mod barycentric;
mod bounded_plane;
pub mod error;
mod extent;
mod frustum;
mod intersection;
mod line;
mod pick;
mod plane;
mod triangle;

pub use barycentric::{invert_bilinear, BarycentricQuadrilateral, BarycentricTriangle};
pub use bounded_plane::BoundedPlane;
pub use error::{GeomError, Result};
pub use extent::{sphere_projected_area, Extent, PerspectiveView, View};
pub use frustum::{Frustum, FrustumCorners};
pub use intersection::Intersection;
pub use line::{Line, CLIP_RETRY_LIMIT};
pub use pick::{PickPointFrustum, PickPointFrustumList, ScreenRect};
pub use plane::{Plane, PlaneCrossing};
pub use triangle::Triangle;
