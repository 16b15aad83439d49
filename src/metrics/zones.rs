//! Intensity scales and pace zones.
//!
//! An intensity is either an RPE score (0-10, harder is higher) or a Zone
//! value expressed as a percentage of threshold pace (70 is the fastest,
//! 150 the slowest). Both resolve to a pace by scaling the threshold pace.

use serde::{Deserialize, Serialize};

use super::pace::ThresholdPace;

/// Fastest Zone value accepted on input.
pub const ZONE_MIN: f64 = 70.0;
/// Slowest Zone value accepted on input.
pub const ZONE_MAX: f64 = 150.0;

/// Zone value an RPE of 10 maps to.
pub const RPE_ZONE_MIN: f64 = 70.0;
/// Zone value an RPE of 0 maps to.
pub const RPE_ZONE_MAX: f64 = 150.0;

pub const RPE_MIN: f64 = 0.0;
pub const RPE_MAX: f64 = 10.0;

/// Zone value drawn as a full-height bar.
pub const BAR_ZONE_FAST: f64 = 70.0;
/// Zone value drawn as an empty bar (before the minimum height applies).
pub const BAR_ZONE_SLOW: f64 = 130.0;
/// Minimum Zone bar height so slow efforts remain visible.
pub const BAR_MIN_HEIGHT: f64 = 3.0;

/// Scale an intensity value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityScale {
    Rpe,
    Zone,
}

impl IntensityScale {
    pub fn from_is_rpe(is_rpe: bool) -> Self {
        if is_rpe {
            IntensityScale::Rpe
        } else {
            IntensityScale::Zone
        }
    }

    /// Inclusive range accepted when a phase is created or edited.
    pub fn valid_range(self) -> (f64, f64) {
        match self {
            IntensityScale::Rpe => (RPE_MIN, RPE_MAX),
            IntensityScale::Zone => (ZONE_MIN, ZONE_MAX),
        }
    }
}

impl std::fmt::Display for IntensityScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntensityScale::Rpe => write!(f, "RPE"),
            IntensityScale::Zone => write!(f, "Zone"),
        }
    }
}

/// Intensity as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intensity {
    /// Rate of perceived exertion, 0-10.
    Rpe(f64),
    /// Single Zone value.
    Zone(f64),
    /// Zone range picked with a two-handle slider; stored as its midpoint.
    ZoneRange { fast: f64, slow: f64 },
}

impl Intensity {
    /// Resolve into the stored `(value, is_rpe)` pair.
    pub fn resolve(self) -> (f64, bool) {
        match self {
            Intensity::Rpe(value) => (value, true),
            Intensity::Zone(value) => (value, false),
            Intensity::ZoneRange { fast, slow } => (zone_range_midpoint(fast, slow), false),
        }
    }
}

/// Midpoint of a Zone range.
pub fn zone_range_midpoint(fast: f64, slow: f64) -> f64 {
    (fast + slow) / 2.0
}

/// Zone value equivalent to an intensity.
///
/// RPE is inverted linearly over `[RPE_ZONE_MIN, RPE_ZONE_MAX]`; Zone values
/// pass through unchanged.
pub fn zone_equivalent(intensity: f64, is_rpe: bool) -> f64 {
    if is_rpe {
        RPE_ZONE_MAX - (intensity / 10.0) * (RPE_ZONE_MAX - RPE_ZONE_MIN)
    } else {
        intensity
    }
}

/// Fraction of threshold pace an intensity runs at.
pub fn pace_factor(intensity: f64, is_rpe: bool) -> f64 {
    zone_equivalent(intensity, is_rpe) / 100.0
}

/// Pace in seconds per kilometer for an intensity.
pub fn pace_seconds(threshold: ThresholdPace, intensity: f64, is_rpe: bool) -> f64 {
    threshold.as_f64() * pace_factor(intensity, is_rpe)
}

/// Bar height on a 0-100 scale.
///
/// RPE is directly proportional. Zone is inverted and clamped over
/// `[BAR_ZONE_FAST, BAR_ZONE_SLOW]` with a floor of `BAR_MIN_HEIGHT`; these
/// bounds deliberately differ from the RPE equivalence range.
pub fn bar_height(intensity: f64, is_rpe: bool) -> f64 {
    if is_rpe {
        intensity * 10.0
    } else {
        let percent = ((BAR_ZONE_SLOW - intensity) / (BAR_ZONE_SLOW - BAR_ZONE_FAST)) * 100.0;
        percent.clamp(0.0, 100.0).max(BAR_MIN_HEIGHT)
    }
}

/// Named training zone for a Zone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceZone {
    /// 135 and slower
    Recovery,
    /// 120-134
    ExtensiveEndurance,
    /// 110-119
    MediumEndurance,
    /// 100-109
    Threshold,
    /// 90-99
    Vo2max,
    /// 82-89
    AnaerobicCapacity,
    /// Faster than 82
    AnaerobicPower,
}

impl PaceZone {
    pub fn from_value(value: f64) -> Self {
        match value {
            v if v >= 135.0 => PaceZone::Recovery,
            v if v >= 120.0 => PaceZone::ExtensiveEndurance,
            v if v >= 110.0 => PaceZone::MediumEndurance,
            v if v >= 100.0 => PaceZone::Threshold,
            v if v >= 90.0 => PaceZone::Vo2max,
            v if v >= 82.0 => PaceZone::AnaerobicCapacity,
            _ => PaceZone::AnaerobicPower,
        }
    }

    /// Zone for any intensity, converting RPE first.
    pub fn from_intensity(intensity: f64, is_rpe: bool) -> Self {
        Self::from_value(zone_equivalent(intensity, is_rpe))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaceZone::Recovery => "Zone 1 (Recovery)",
            PaceZone::ExtensiveEndurance => "Zone 2 (Extensive Endurance)",
            PaceZone::MediumEndurance => "Zone 3 (Medium Endurance)",
            PaceZone::Threshold => "Zone 4 (Threshold)",
            PaceZone::Vo2max => "Zone 5a (VO2max)",
            PaceZone::AnaerobicCapacity => "Zone 5b (Anaerobic Capacity)",
            PaceZone::AnaerobicPower => "Zone 5c (Anaerobic Power)",
        }
    }
}

impl std::fmt::Display for PaceZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
