#![warn(missing_docs)]

//! Bounding volumes for visibility culling and ray picking.
//!
//! [`Sphere`] and [`Cylinder`] implement [`geokit_geom::Extent`]. Both are
//! immutable once built; rebuild them when the bounded geometry changes.
//!
//! # Architecture
//!
//! - [`Sphere`] - loose, cheap bounds from point extrema or other extents
//! - [`Cylinder`] - principal-axis bounds with a progressive frustum test
//! - [`Terrain`] - the elevation model that sector bounds are built over
//!
//! # Example
//!
//! ```ignore
//! use geokit_bounds::Cylinder;
//! use geokit_geom::{Extent, Frustum};
//!
//! let bounds = Cylinder::bounding_cylinder(&mesh_points)?;
//! if bounds.intersects_frustum(&frustum) {
//!     draw(&mesh);
//! }
//! ```

mod cylinder;
mod sphere;
mod terrain;

pub use cylinder::Cylinder;
pub use sphere::Sphere;
pub use terrain::Terrain;
