//! Errors surfaced by the facade.

use geokit_angle::AngleError;
use geokit_geom::GeomError;
use thiserror::Error;

/// Any failure from the geokit crates, plus configuration problems.
#[derive(Error, Debug)]
pub enum GeokitError {
    /// An angle could not be built, parsed or formatted.
    #[error(transparent)]
    Angle(#[from] AngleError),

    /// A geometric value could not be built from its inputs.
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// Settings parsed but hold an unusable value.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings text is not valid TOML for [`crate::GeoSettings`].
    #[error("cannot read settings: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, GeokitError>;
