//! Degrees-minutes-seconds text: parsing and the string formats of [`Angle`].

use crate::angle::Angle;
use crate::error::{AngleError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Largest number of fractional digits accepted by decimal formatting.
pub const MAX_DECIMAL_DIGITS: usize = 15;

/// Text representation used when rendering an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleFormat {
    /// Decimal degrees, e.g. `45.5000°`.
    DecimalDegrees,
    /// Degrees and decimal minutes, e.g. `45° 30.00’`.
    DegreesMinutes,
    /// Degrees, minutes and whole seconds, e.g. `45° 30’ 0”`.
    #[default]
    DegreesMinutesSeconds,
}

// Digits and whitespace are ASCII only; `[[:space:]]` is `[\t\n\v\f\r ]`.
fn dms_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r#"^[-+]?[0-9]{1,3}[dD°[:space:]]([[:space:]]*[0-9]{1,2}['’[:space:]])?"#,
            r#"([[:space:]]*[0-9]{1,2}["”[:space:]])?[[:space:]]*([NnSsEeWw])?[[:space:]]?$"#,
        ))
        .expect("DMS pattern is valid")
    })
}

fn mark_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"[dD°'’"”]"#).expect("mark pattern is valid"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[[:space:]]+").expect("whitespace pattern is valid"))
}

impl Angle {
    /// Parse a degrees-minutes-seconds string such as `-123° 34’ 42”`,
    /// `45 30 0 N` or `12d 5' 7" W`.
    ///
    /// A trailing compass letter sets the sign (S and W are negative) and
    /// overrides a numeric sign prefix. Minutes and seconds are optional.
    pub fn parse_dms(text: &str) -> Result<Angle> {
        let padded = format!("{text} ");
        if !dms_pattern().is_match(&padded) {
            return Err(AngleError::Parse(text.to_string()));
        }

        let cleaned = mark_pattern().replace_all(&padded, " ");
        let cleaned = whitespace_pattern().replace_all(&cleaned, " ");
        let mut body: &str = cleaned.trim();

        let mut sign = 1;
        let last = body.chars().last();
        if let Some(suffix) = last.filter(|c| !c.is_ascii_digit()) {
            if matches!(suffix, 'S' | 's' | 'W' | 'w') {
                sign = -1;
            }
            body = body[..body.len() - suffix.len_utf8()].trim();
            if body.starts_with(['-', '+']) {
                body = body[1..].trim_start();
            }
        } else if let Some(rest) = body.strip_prefix('-') {
            sign = -1;
            body = rest;
        } else if let Some(rest) = body.strip_prefix('+') {
            body = rest;
        }

        let mut parts = [0i32; 3];
        for (slot, field) in parts.iter_mut().zip(body.split(' ')) {
            *slot = field
                .parse()
                .map_err(|_| AngleError::Parse(text.to_string()))?;
        }

        Ok(Angle::from_dms(parts[0], parts[1], parts[2])?.multiply(sign as f64))
    }

    /// Decimal-degree string with `digits` fractional digits (0..=15).
    pub fn to_decimal_degrees_string(&self, digits: usize) -> Result<String> {
        if digits > MAX_DECIMAL_DIGITS {
            return Err(AngleError::out_of_range("digits", digits));
        }
        Ok(format!("{:.*}\u{00B0}", digits, self.degrees()))
    }

    /// `d° m’ s”` with whole seconds, carrying a rounded 60 upward.
    pub fn to_dms_string(&self) -> String {
        let parts = DmsParts::new(self.degrees(), |s| s.round());
        format!(
            "{}{}\u{00B0} {}\u{2019} {}\u{201d}",
            parts.sign_prefix(),
            parts.degrees,
            parts.minutes,
            parts.seconds as i64
        )
    }

    /// `d° mm.mm’` with decimal minutes.
    pub fn to_dm_string(&self) -> String {
        let parts = DmsParts::new(self.degrees(), |s| s.round());
        let minutes = if parts.seconds == 0.0 {
            parts.minutes as f64
        } else {
            parts.minutes as f64 + parts.seconds / 60.0
        };
        format!(
            "{}{}\u{00B0} {:5.2}\u{2019}",
            parts.sign_prefix(),
            parts.degrees,
            minutes
        )
    }

    /// Fixed-width `%4d° %2d’ %5.2f”` with seconds kept to two decimals.
    pub fn to_formatted_dms_string(&self) -> String {
        let parts = DmsParts::new(self.degrees(), round_centi);
        format!(
            "{:4}\u{00B0} {:2}\u{2019} {:5.2}\u{201d}",
            parts.sign * parts.degrees,
            parts.minutes,
            parts.seconds
        )
    }

    /// `[±degrees, minutes, seconds]` with seconds kept to two decimals.
    pub fn to_dms(&self) -> [f64; 3] {
        let parts = DmsParts::new(self.degrees(), round_centi);
        [
            (parts.sign * parts.degrees) as f64,
            parts.minutes as f64,
            parts.seconds,
        ]
    }

    /// Render in the given format. `digits` only applies to decimal degrees.
    pub fn format(&self, format: AngleFormat, digits: usize) -> Result<String> {
        match format {
            AngleFormat::DecimalDegrees => self.to_decimal_degrees_string(digits),
            AngleFormat::DegreesMinutes => Ok(self.to_dm_string()),
            AngleFormat::DegreesMinutesSeconds => Ok(self.to_dms_string()),
        }
    }
}

impl FromStr for Angle {
    type Err = AngleError;

    fn from_str(s: &str) -> Result<Self> {
        Angle::parse_dms(s)
    }
}

fn round_centi(s: f64) -> f64 {
    (s * 100.0).round_ties_even() / 100.0
}

/// Sexagesimal breakdown of an absolute degree value.
struct DmsParts {
    sign: i64,
    degrees: i64,
    minutes: i64,
    seconds: f64,
}

impl DmsParts {
    fn new(value: f64, round_seconds: impl Fn(f64) -> f64) -> Self {
        let sign = if value < 0.0 { -1 } else { 1 };
        let mut temp = value.abs();
        let mut degrees = temp.floor() as i64;
        temp = (temp - degrees as f64) * 60.0;
        let mut minutes = temp.floor() as i64;
        temp = (temp - minutes as f64) * 60.0;
        let mut seconds = round_seconds(temp);

        if seconds == 60.0 {
            minutes += 1;
            seconds = 0.0;
        }
        if minutes == 60 {
            degrees += 1;
            minutes = 0;
        }
        Self {
            sign,
            degrees,
            minutes,
            seconds,
        }
    }

    fn sign_prefix(&self) -> &'static str {
        if self.sign < 0 {
            "-"
        } else {
            ""
        }
    }
}
