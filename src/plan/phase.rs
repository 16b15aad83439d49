//! Phase: the atomic effort descriptor.
//!
//! A phase is an intensity plus a duration or a distance. Which of the two
//! the user entered is recorded in [`DesignMode`]; the other quantity is
//! derived from the current threshold pace every time it is read.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::metrics::pace::{parse_duration, ThresholdPace};
use crate::metrics::zones::{self, Intensity, IntensityScale, PaceZone};

use super::types::{DesignMode, ValidationError};

/// Round a duration to whole seconds, saturating negative and non-finite input to 0.
pub fn round_seconds(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

pub(super) fn whole_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(D::Error::custom("duration must be a finite number"));
    }
    Ok(round_seconds(raw))
}

/// One effort segment.
///
/// `duration_seconds` is authoritative only for [`DesignMode::Time`]. For
/// distance-designed phases it caches the duration at the last known
/// threshold pace; read [`Phase::effective_duration`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// RPE (0-10) or Zone (70-150) depending on `is_rpe`
    #[serde(rename = "indice", alias = "intensity")]
    pub intensity: f64,
    #[serde(rename = "isRPE", default)]
    pub is_rpe: bool,
    /// Whole seconds
    #[serde(
        rename = "duracion",
        alias = "durationSeconds",
        deserialize_with = "whole_seconds",
        default
    )]
    pub duration_seconds: u32,
    /// Kilometers when designed by distance, seconds when designed by time
    #[serde(default)]
    pub original_value: Option<f64>,
    #[serde(default)]
    pub designed_in: DesignMode,
}

impl Phase {
    /// Build a phase, rounding the duration to the nearest second.
    pub fn new(
        intensity: f64,
        duration_seconds: f64,
        is_rpe: bool,
        original_value: Option<f64>,
        designed_in: DesignMode,
    ) -> Self {
        Self {
            intensity,
            is_rpe,
            duration_seconds: round_seconds(duration_seconds),
            original_value,
            designed_in,
        }
    }

    /// Time-designed phase. The entered seconds are kept as the original value.
    pub fn by_time(intensity: Intensity, seconds: u32) -> Self {
        let (value, is_rpe) = intensity.resolve();
        Self {
            intensity: value,
            is_rpe,
            duration_seconds: seconds,
            original_value: Some(seconds as f64),
            designed_in: DesignMode::Time,
        }
    }

    /// Distance-designed phase. The duration is cached at `threshold`.
    pub fn by_distance(intensity: Intensity, km: f64, threshold: ThresholdPace) -> Self {
        let (value, is_rpe) = intensity.resolve();
        let pace = zones::pace_seconds(threshold, value, is_rpe);
        Self {
            intensity: value,
            is_rpe,
            duration_seconds: round_seconds(km * pace),
            original_value: Some(km),
            designed_in: DesignMode::Distance,
        }
    }

    pub fn scale(&self) -> IntensityScale {
        IntensityScale::from_is_rpe(self.is_rpe)
    }

    /// Pace in seconds per kilometer at `threshold`.
    pub fn pace_seconds(&self, threshold: ThresholdPace) -> f64 {
        zones::pace_seconds(threshold, self.intensity, self.is_rpe)
    }

    pub fn pace_zone(&self) -> PaceZone {
        PaceZone::from_intensity(self.intensity, self.is_rpe)
    }

    /// Duration in seconds at `threshold`.
    ///
    /// Distance-designed phases re-derive it from their kilometers; a
    /// distance phase without an original value keeps its stored duration.
    pub fn effective_duration(&self, threshold: ThresholdPace) -> u32 {
        match (self.designed_in, self.original_value) {
            (DesignMode::Distance, Some(km)) => round_seconds(km * self.pace_seconds(threshold)),
            _ => self.duration_seconds,
        }
    }

    /// Approximate distance in kilometers at `threshold`.
    pub fn approx_distance(&self, threshold: ThresholdPace) -> f64 {
        if let (DesignMode::Distance, Some(km)) = (self.designed_in, self.original_value) {
            return km;
        }

        let pace = self.pace_seconds(threshold);
        if pace <= 0.0 {
            return 0.0;
        }
        self.effective_duration(threshold) as f64 * (1000.0 / pace) / 1000.0
    }

    /// Store the duration derived at `threshold` in the cached field.
    pub fn refresh_cached_duration(&mut self, threshold: ThresholdPace) {
        self.duration_seconds = self.effective_duration(threshold);
    }

    /// Check intensity range and a positive duration or distance.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_intensity(self.intensity, self.scale())?;

        match self.designed_in {
            DesignMode::Distance => match self.original_value {
                Some(km) if km.is_finite() && km > 0.0 => Ok(()),
                _ => Err(ValidationError::NonPositiveDistance),
            },
            DesignMode::Time => {
                if self.duration_seconds == 0 {
                    Err(ValidationError::NonPositiveDuration)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn validate_intensity(value: f64, scale: IntensityScale) -> Result<(), ValidationError> {
    let (min, max) = scale.valid_range();
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::IntensityOutOfRange { value, min, max })
    }
}

/// How much of a phase the user entered.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseAmount {
    Seconds(u32),
    /// `m:ss` as typed into a duration field
    Clock(String),
    Kilometers(f64),
}

/// Raw form input for a phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseInput {
    pub intensity: Intensity,
    pub amount: PhaseAmount,
}

impl PhaseInput {
    pub fn new(intensity: Intensity, amount: PhaseAmount) -> Self {
        Self { intensity, amount }
    }

    pub fn time(intensity: Intensity, seconds: u32) -> Self {
        Self::new(intensity, PhaseAmount::Seconds(seconds))
    }

    pub fn distance(intensity: Intensity, km: f64) -> Self {
        Self::new(intensity, PhaseAmount::Kilometers(km))
    }

    /// Validate and convert against the current threshold pace.
    pub fn into_phase(self, threshold: ThresholdPace) -> Result<Phase, ValidationError> {
        if let Intensity::ZoneRange { fast, slow } = self.intensity {
            validate_intensity(fast, IntensityScale::Zone)?;
            validate_intensity(slow, IntensityScale::Zone)?;
        }

        let phase = match self.amount {
            PhaseAmount::Seconds(seconds) => Phase::by_time(self.intensity, seconds),
            PhaseAmount::Clock(raw) => {
                let seconds =
                    parse_duration(&raw).ok_or_else(|| ValidationError::InvalidDuration(raw.clone()))?;
                Phase::by_time(self.intensity, seconds)
            }
            PhaseAmount::Kilometers(km) => {
                if !km.is_finite() || km <= 0.0 {
                    return Err(ValidationError::NonPositiveDistance);
                }
                Phase::by_distance(self.intensity, km, threshold)
            }
        };

        phase.validate()?;
        Ok(phase)
    }
}
