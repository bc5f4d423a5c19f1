#![warn(missing_docs)]

//! Geometric primitives and bounding volumes for culling and picking in a
//! 3D geospatial viewer.
//!
//! This crate re-exports the geokit family and adds [`GeoSettings`], a
//! small TOML-configurable bundle of the knobs callers usually tune, plus
//! helpers that apply it.
//!
//! # Architecture
//!
//! - `geokit-math` - nalgebra aliases, transforms and point-set statistics
//! - `geokit-angle` - [`Angle`], DMS text, [`LatLon`], [`Position`], [`Sector`]
//! - `geokit-geom` - [`Plane`], [`Line`], [`Frustum`], [`Intersection`], the [`Extent`] trait
//! - `geokit-bounds` - [`Sphere`], [`Cylinder`], the [`Terrain`] trait
//!
//! # Example
//!
//! ```ignore
//! use geokit::{vertical_bounding_cylinder, Extent, GeoSettings};
//!
//! let settings = GeoSettings::from_toml_str(&std::fs::read_to_string("geo.toml")?)?;
//! let bounds = vertical_bounding_cylinder(&globe, &tile.sector, &settings)?;
//! if bounds.intersects_frustum(view.frustum_in_model_coordinates()) {
//!     visible.push(tile);
//! }
//! ```

pub mod error;
pub mod settings;

pub use error::{GeokitError, Result};
pub use settings::{GeoSettings, MAX_CLIP_RETRIES};

pub use geokit_angle::{Angle, AngleError, AngleFormat, LatLon, Position, Sector};
pub use geokit_bounds::{Cylinder, Sphere, Terrain};
pub use geokit_geom::{
    invert_bilinear, sphere_projected_area, BarycentricQuadrilateral, BarycentricTriangle,
    BoundedPlane, Extent, Frustum, FrustumCorners, GeomError, Intersection, Line,
    PerspectiveView, PickPointFrustum, PickPointFrustumList, Plane, PlaneCrossing, ScreenRect,
    Triangle, View, CLIP_RETRY_LIMIT,
};
pub use geokit_math::{Matrix4, Point3, Transform, Vec3, Vec4};

/// Vertical bounding cylinder over `sector`, with elevations scaled by the
/// configured exaggeration.
pub fn vertical_bounding_cylinder(
    terrain: &dyn Terrain,
    sector: &Sector,
    settings: &GeoSettings,
) -> Result<Cylinder> {
    settings.validate()?;
    Ok(Cylinder::vertical_bounding_cylinder(
        terrain,
        settings.vertical_exaggeration,
        sector,
    )?)
}

/// Bounding sphere over `sector`, with elevations scaled by the configured
/// exaggeration.
pub fn bounding_sector_sphere(
    terrain: &dyn Terrain,
    sector: &Sector,
    settings: &GeoSettings,
) -> Result<Sphere> {
    settings.validate()?;
    Ok(Sphere::bounding_sector_sphere(
        terrain,
        settings.vertical_exaggeration,
        sector,
    )?)
}

/// Clip the segment `pa`-`pb` to `frustum`, re-clipping up to the
/// configured number of times. `Ok(None)` when nothing of it is inside.
pub fn clip_segment(
    pa: &Point3,
    pb: &Point3,
    frustum: &Frustum,
    settings: &GeoSettings,
) -> Result<Option<(Point3, Point3)>> {
    settings.validate()?;
    Ok(Line::clip_to_frustum_with_retries(
        pa,
        pb,
        frustum,
        settings.clip_retries,
    ))
}
