//! Pace and duration conversions.
//!
//! Paces are expressed as `m:ss` per kilometer and durations as `m:ss`
//! clock strings. Both share the same arithmetic but keep separate entry
//! points so call sites say which quantity they are handling.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Threshold pace used when nothing else is configured.
pub const DEFAULT_THRESHOLD_PACE: &str = "5:00";

/// Threshold pace in seconds per kilometer used as the permissive fallback.
pub const DEFAULT_THRESHOLD_SECONDS: u32 = 300;

/// Rejected pace string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pace '{0}', expected m:ss")]
pub struct PaceFormatError(pub String);

/// Convert a `m:ss` pace into seconds per kilometer.
///
/// Missing seconds default to zero (`"5"` is 300). Returns `None` on
/// malformed input; callers decide whether to fall back.
pub fn pace_to_seconds(pace: &str) -> Option<u32> {
    let mut fields = pace.trim().split(':');
    let minutes: u32 = fields.next()?.trim().parse().ok()?;
    let seconds: u32 = match fields.next() {
        Some(raw) if raw.trim().is_empty() => 0,
        Some(raw) => raw.trim().parse().ok()?,
        None => 0,
    };
    if fields.next().is_some() {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Same as [`pace_to_seconds`] but falls back to the default threshold.
pub fn pace_to_seconds_or_default(pace: &str) -> u32 {
    pace_to_seconds(pace).unwrap_or(DEFAULT_THRESHOLD_SECONDS)
}

/// Parse a `m:ss` duration field into whole seconds.
pub fn parse_duration(duration: &str) -> Option<u32> {
    pace_to_seconds(duration)
}

/// Format seconds per kilometer as `m:ss`.
///
/// Seconds are rounded before splitting so `299.6` becomes `5:00` rather
/// than `4:60`. Negative and non-finite input formats as `0:00`.
pub fn seconds_to_pace(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a pace with its unit, e.g. `5:30 min/km`.
pub fn format_pace_min_km(seconds: f64) -> String {
    format!("{} min/km", seconds_to_pace(seconds))
}

/// Format a duration in seconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Check the strict `m:ss` shape expected for the threshold pace input.
pub fn validate_pace_format(value: &str) -> bool {
    match value.split_once(':') {
        Some((minutes, seconds)) => {
            !minutes.is_empty()
                && minutes.bytes().all(|b| b.is_ascii_digit())
                && seconds.len() == 2
                && seconds.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Reference pace all Zone and RPE intensities are scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThresholdPace(u32);

impl ThresholdPace {
    /// Build from seconds per kilometer. Zero is not a usable pace.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        (seconds > 0).then_some(Self(seconds))
    }

    /// Seconds per kilometer.
    pub fn seconds(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Default for ThresholdPace {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD_SECONDS)
    }
}

impl FromStr for ThresholdPace {
    type Err = PaceFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !validate_pace_format(trimmed) {
            return Err(PaceFormatError(s.to_string()));
        }
        pace_to_seconds(trimmed)
            .and_then(Self::from_seconds)
            .ok_or_else(|| PaceFormatError(s.to_string()))
    }
}

impl fmt::Display for ThresholdPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_duration(self.0))
    }
}
