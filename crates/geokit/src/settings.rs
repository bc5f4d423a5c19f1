//! Caller-tunable settings.

use crate::error::{GeokitError, Result};
use geokit_angle::{Angle, AngleFormat};
use geokit_geom::CLIP_RETRY_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest accepted `clip_retries`.
pub const MAX_CLIP_RETRIES: usize = 8;

/// Settings for the settings-driven helpers.
///
/// Missing TOML keys take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoSettings {
    /// Factor applied to terrain elevations when bounding sectors.
    pub vertical_exaggeration: f64,
    /// Text form used by [`GeoSettings::format_angle`].
    pub angle_format: AngleFormat,
    /// Fraction digits for decimal-degree output (0 to 15).
    pub decimal_digits: usize,
    /// Extra passes [`crate::clip_segment`] may make over a segment that
    /// started entirely outside the frustum.
    pub clip_retries: usize,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            vertical_exaggeration: 1.0,
            angle_format: AngleFormat::DegreesMinutesSeconds,
            decimal_digits: 4,
            clip_retries: CLIP_RETRY_LIMIT,
        }
    }
}

impl GeoSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.vertical_exaggeration.is_finite() || self.vertical_exaggeration <= 0.0 {
            return Err(GeokitError::InvalidSettings(format!(
                "vertical_exaggeration must be finite and positive, got {}",
                self.vertical_exaggeration
            )));
        }
        if self.decimal_digits > 15 {
            return Err(GeokitError::InvalidSettings(format!(
                "decimal_digits must be at most 15, got {}",
                self.decimal_digits
            )));
        }
        if self.clip_retries > MAX_CLIP_RETRIES {
            return Err(GeokitError::InvalidSettings(format!(
                "clip_retries must be at most {MAX_CLIP_RETRIES}, got {}",
                self.clip_retries
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: GeoSettings = toml::from_str(text)?;
        settings.validate()?;
        debug!(
            vertical_exaggeration = settings.vertical_exaggeration,
            angle_format = ?settings.angle_format,
            decimal_digits = settings.decimal_digits,
            clip_retries = settings.clip_retries,
            "loaded geo settings"
        );
        Ok(settings)
    }

    /// Render `angle` in the configured format.
    pub fn format_angle(&self, angle: Angle) -> Result<String> {
        Ok(angle.format(self.angle_format, self.decimal_digits)?)
    }
}
