//! Metrics module for pace conversions and intensity zones.

pub mod pace;
pub mod zones;

pub use pace::{format_duration, pace_to_seconds, seconds_to_pace, ThresholdPace};
pub use zones::{Intensity, IntensityScale, PaceZone};
