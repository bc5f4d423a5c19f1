//! The [`Angle`] value type: construction, arithmetic and normalization.

use crate::error::{AngleError, Result};
use geokit_math::{quaternion, Vec3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;
const RADIANS_TO_DEGREES: f64 = 180.0 / std::f64::consts::PI;
const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;
const PI: f64 = std::f64::consts::PI;

/// A geographic or trigonometric angle.
///
/// Both degree and radian forms are stored so either is available without
/// conversion. Every operation returns a new value computed from degrees.
/// Equality and ordering compare degrees only.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle {
    degrees: f64,
    radians: f64,
}

impl Angle {
    /// 0°.
    pub const ZERO: Angle = Angle::const_degrees(0.0);
    /// 90°.
    pub const POS90: Angle = Angle::const_degrees(90.0);
    /// −90°.
    pub const NEG90: Angle = Angle::const_degrees(-90.0);
    /// 180°.
    pub const POS180: Angle = Angle::const_degrees(180.0);
    /// −180°.
    pub const NEG180: Angle = Angle::const_degrees(-180.0);
    /// 360°.
    pub const POS360: Angle = Angle::const_degrees(360.0);
    /// −360°.
    pub const NEG360: Angle = Angle::const_degrees(-360.0);
    /// One minute of arc.
    pub const MINUTE: Angle = Angle::const_degrees(1.0 / 60.0);
    /// One second of arc.
    pub const SECOND: Angle = Angle::const_degrees(1.0 / 3600.0);

    const fn const_degrees(degrees: f64) -> Self {
        Self {
            degrees,
            radians: degrees * DEGREES_TO_RADIANS,
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Angle from a value in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            degrees,
            radians: DEGREES_TO_RADIANS * degrees,
        }
    }

    /// Angle from a value in radians.
    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: RADIANS_TO_DEGREES * radians,
            radians,
        }
    }

    /// Latitude from degrees, clamped to [−90, 90].
    pub fn from_degrees_latitude(degrees: f64) -> Self {
        let degrees = degrees.clamp(-90.0, 90.0);
        let radians = (DEGREES_TO_RADIANS * degrees).clamp(-HALF_PI, HALF_PI);
        Self { degrees, radians }
    }

    /// Latitude from radians, clamped to [−π/2, π/2].
    pub fn from_radians_latitude(radians: f64) -> Self {
        let radians = radians.clamp(-HALF_PI, HALF_PI);
        let degrees = (RADIANS_TO_DEGREES * radians).clamp(-90.0, 90.0);
        Self { degrees, radians }
    }

    /// Longitude from degrees, clamped to [−180, 180].
    pub fn from_degrees_longitude(degrees: f64) -> Self {
        let degrees = degrees.clamp(-180.0, 180.0);
        let radians = (DEGREES_TO_RADIANS * degrees).clamp(-PI, PI);
        Self { degrees, radians }
    }

    /// Longitude from radians, clamped to [−π, π].
    pub fn from_radians_longitude(radians: f64) -> Self {
        let radians = radians.clamp(-PI, PI);
        let degrees = (RADIANS_TO_DEGREES * radians).clamp(-180.0, 180.0);
        Self { degrees, radians }
    }

    /// Angle of the vector `(x, y)` from the +X axis.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self::from_radians(y.atan2(x))
    }

    /// Angle from whole degrees, minutes and seconds.
    ///
    /// Fails with [`AngleError::OutOfRange`] if `degrees` is negative or
    /// `minutes`/`seconds` fall outside `[0, 60)`.
    pub fn from_dms(degrees: i32, minutes: i32, seconds: i32) -> Result<Self> {
        if degrees < 0 {
            return Err(AngleError::out_of_range("degrees", degrees));
        }
        if !(0..60).contains(&minutes) {
            return Err(AngleError::out_of_range("minutes", minutes));
        }
        if !(0..60).contains(&seconds) {
            return Err(AngleError::out_of_range("seconds", seconds));
        }
        Ok(Self::from_degrees(
            degrees as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0,
        ))
    }

    /// Angle from whole degrees and decimal minutes.
    pub fn from_dm(degrees: i32, minutes: f64) -> Result<Self> {
        if degrees < 0 {
            return Err(AngleError::out_of_range("degrees", degrees));
        }
        if !(0.0..60.0).contains(&minutes) {
            return Err(AngleError::out_of_range("minutes", minutes));
        }
        Ok(Self::from_degrees(degrees as f64 + minutes / 60.0))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Value in degrees.
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Value in radians.
    #[inline]
    pub fn radians(&self) -> f64 {
        self.radians
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Sum of two angles.
    pub fn add(&self, other: Angle) -> Angle {
        Angle::from_degrees(self.degrees + other.degrees)
    }

    /// Difference of two angles.
    pub fn subtract(&self, other: Angle) -> Angle {
        Angle::from_degrees(self.degrees - other.degrees)
    }

    /// Scale by `multiplier`.
    pub fn multiply(&self, multiplier: f64) -> Angle {
        Angle::from_degrees(self.degrees * multiplier)
    }

    /// Divide by a plain number.
    pub fn divide(&self, divisor: f64) -> Angle {
        Angle::from_degrees(self.degrees / divisor)
    }

    /// Ratio of this angle to `other`.
    ///
    /// Fails with [`AngleError::DivideByZero`] when `other` is 0°.
    pub fn divide_by(&self, other: Angle) -> Result<f64> {
        if other.degrees == 0.0 {
            return Err(AngleError::DivideByZero);
        }
        Ok(self.degrees / other.degrees)
    }

    /// Add a value in degrees.
    pub fn add_degrees(&self, degrees: f64) -> Angle {
        Angle::from_degrees(self.degrees + degrees)
    }

    /// Subtract a value in degrees.
    pub fn subtract_degrees(&self, degrees: f64) -> Angle {
        Angle::from_degrees(self.degrees - degrees)
    }

    /// Add a value in radians.
    pub fn add_radians(&self, radians: f64) -> Angle {
        Angle::from_radians(self.radians + radians)
    }

    /// Subtract a value in radians.
    pub fn subtract_radians(&self, radians: f64) -> Angle {
        Angle::from_radians(self.radians - radians)
    }

    /// Smallest non-negative angle between `self` and `other`, in [0°, 180°].
    pub fn angular_distance_to(&self, other: Angle) -> Angle {
        let mut difference = other.degrees - self.degrees;
        if difference < -180.0 {
            difference += 360.0;
        } else if difference > 180.0 {
            difference -= 360.0;
        }
        Angle::from_degrees(difference.abs())
    }

    // =========================================================================
    // Trigonometry
    // =========================================================================

    /// Sine.
    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    /// Cosine.
    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    /// Sine of half this angle.
    pub fn sin_half_angle(&self) -> f64 {
        (0.5 * self.radians).sin()
    }

    /// Cosine of half this angle.
    pub fn cos_half_angle(&self) -> f64 {
        (0.5 * self.radians).cos()
    }

    /// Tangent of half this angle.
    pub fn tan_half_angle(&self) -> f64 {
        (0.5 * self.radians).tan()
    }

    /// Arcsine.
    pub fn asin(sine: f64) -> Angle {
        Angle::from_radians(sine.asin())
    }

    /// Arccosine.
    pub fn acos(cosine: f64) -> Angle {
        Angle::from_radians(cosine.acos())
    }

    /// Arctangent.
    pub fn atan(tan: f64) -> Angle {
        Angle::from_radians(tan.atan())
    }

    /// Inverse hyperbolic tangent via `0.5 * ln((1 + x) / (1 - x))`.
    pub fn arctanh(x: f64) -> f64 {
        0.5 * ((1.0 + x) / (1.0 - x)).ln()
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Angle halfway between `a` and `b`, by plain averaging of degrees.
    pub fn mid_angle(a: Angle, b: Angle) -> Angle {
        Angle::from_degrees(0.5 * (a.degrees + b.degrees))
    }

    /// Mean of two angles.
    pub fn average(a: Angle, b: Angle) -> Angle {
        Angle::from_degrees(0.5 * (a.degrees + b.degrees))
    }

    /// Mean of three angles.
    pub fn average3(a: Angle, b: Angle, c: Angle) -> Angle {
        Angle::from_degrees((a.degrees + b.degrees + c.degrees) / 3.0)
    }

    /// `value` limited to `[min, max]`.
    pub fn clamp(value: Angle, min: Angle, max: Angle) -> Angle {
        if value.degrees < min.degrees {
            min
        } else if value.degrees > max.degrees {
            max
        } else {
            value
        }
    }

    /// The larger of two angles (`a` on ties).
    pub fn max(a: Angle, b: Angle) -> Angle {
        if a.degrees >= b.degrees {
            a
        } else {
            b
        }
    }

    /// The smaller of two angles (`a` on ties).
    pub fn min(a: Angle, b: Angle) -> Angle {
        if a.degrees <= b.degrees {
            a
        } else {
            b
        }
    }

    /// Spherical interpolation between `a` and `b`.
    ///
    /// `amount < 0` yields `a` and `amount > 1` yields `b`. Otherwise both
    /// angles become rotations about the X axis, are slerped, and the
    /// resulting rotation is read back. Returns `None` if that read-back
    /// is not a number.
    pub fn mix(amount: f64, a: Angle, b: Angle) -> Option<Angle> {
        if amount < 0.0 {
            return Some(a);
        } else if amount > 1.0 {
            return Some(b);
        }
        let qa = quaternion::from_axis_angle(&Vec3::x(), a.radians);
        let qb = quaternion::from_axis_angle(&Vec3::x(), b.radians);
        let q = quaternion::slerp(amount, &qa, &qb);
        quaternion::rotation_x(&q).map(Angle::from_radians)
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    /// Map any degree value into [−180, 180].
    pub fn normalized_degrees(degrees: f64) -> f64 {
        let a = degrees % 360.0;
        if a > 180.0 {
            a - 360.0
        } else if a < -180.0 {
            360.0 + a
        } else {
            a
        }
    }

    /// Fold a degree value into [−90, 90], reflecting across the poles.
    pub fn normalized_degrees_latitude(degrees: f64) -> f64 {
        let lat = degrees % 180.0;
        if lat > 90.0 {
            180.0 - lat
        } else if lat < -90.0 {
            -180.0 - lat
        } else {
            lat
        }
    }

    /// Wrap a degree value into [−180, 180].
    pub fn normalized_degrees_longitude(degrees: f64) -> f64 {
        let lon = degrees % 360.0;
        if lon > 180.0 {
            lon - 360.0
        } else if lon < -180.0 {
            360.0 + lon
        } else {
            lon
        }
    }

    /// This angle normalized into [−180, 180].
    pub fn normalize(&self) -> Angle {
        let d = Self::normalized_degrees(self.degrees);
        if d == self.degrees {
            *self
        } else {
            Angle::from_degrees(d)
        }
    }

    /// This angle folded as a latitude.
    pub fn normalized_latitude(&self) -> Angle {
        let d = Self::normalized_degrees_latitude(self.degrees);
        if d == self.degrees {
            *self
        } else {
            Angle::from_degrees(d)
        }
    }

    /// This angle wrapped as a longitude.
    pub fn normalized_longitude(&self) -> Angle {
        let d = Self::normalized_degrees_longitude(self.degrees);
        if d == self.degrees {
            *self
        } else {
            Angle::from_degrees(d)
        }
    }

    /// Whether a segment between longitudes `self` and `other` crosses the
    /// ±180° meridian: the signs differ and the values are more than 180° apart.
    pub fn crosses_longitude_boundary(&self, other: Angle) -> bool {
        signum(self.degrees) != signum(other.degrees)
            && (self.degrees - other.degrees).abs() > 180.0
    }

    /// Whether `degrees` lies in [−90, 90].
    pub fn is_valid_latitude(degrees: f64) -> bool {
        (-90.0..=90.0).contains(&degrees)
    }

    /// Whether `degrees` lies in [−180, 180].
    pub fn is_valid_longitude(degrees: f64) -> bool {
        (-180.0..=180.0).contains(&degrees)
    }
}

/// Sign with zero mapping to zero, unlike [`f64::signum`].
fn signum(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.degrees == other.degrees
    }
}

impl PartialOrd for Angle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.degrees.partial_cmp(&other.degrees)
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({}°)", self.degrees)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00B0}", self.degrees)
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Angle::from_degrees(degrees)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.degrees
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::add(&self, rhs)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        self.subtract(rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::from_degrees(-self.degrees)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        self.multiply(rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        self.divide(rhs)
    }
}
