#![warn(missing_docs)]

//! Angles and geographic coordinates for the geokit geometry crates.
//!
//! [`Angle`] stores degrees and radians side by side and produces a new
//! value from every operation. On top of it sit [`LatLon`], [`Position`]
//! and [`Sector`], the geographic vocabulary used by the bounding-volume
//! constructors.
//!
//! # Example
//!
//! ```ignore
//! use geokit_angle::{Angle, AngleFormat};
//!
//! let lat: Angle = "37 48 30 N".parse()?;
//! assert_eq!(lat.to_dms_string(), "37° 48’ 30”");
//! let text = lat.format(AngleFormat::DecimalDegrees, 3)?;
//! ```

mod angle;
pub mod dms;
pub mod error;
mod latlon;
mod sector;

pub use angle::Angle;
pub use dms::AngleFormat;
pub use error::{AngleError, Result};
pub use latlon::{LatLon, Position};
pub use sector::Sector;
