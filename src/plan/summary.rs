//! Plan totals: duration, distance and duration-weighted average pace.

use serde::Serialize;

use crate::metrics::pace::{format_duration, format_pace_min_km, ThresholdPace};

use super::item::{Collection, PlanItem};

/// Aggregate metrics for a whole plan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlanSummary {
    /// Total effective duration in seconds
    pub total_duration_seconds: u64,
    /// Approximate total distance in kilometers
    pub total_distance_km: f64,
    /// Duration-weighted average pace in seconds per kilometer (0 when empty)
    pub weighted_pace_seconds: f64,
}

impl PlanSummary {
    pub fn formatted_duration(&self) -> String {
        format_duration(self.total_duration_seconds.min(u32::MAX as u64) as u32)
    }

    pub fn formatted_distance(&self) -> String {
        format!("{:.2} km", self.total_distance_km)
    }

    pub fn formatted_pace(&self) -> String {
        format_pace_min_km(self.weighted_pace_seconds)
    }
}

#[derive(Default)]
struct Totals {
    duration: u64,
    distance: f64,
    weighted_pace: f64,
}

impl Totals {
    fn add(&mut self, item: &PlanItem, threshold: ThresholdPace) {
        match item {
            PlanItem::Part(part) => {
                let duration = part.phase.effective_duration(threshold);
                self.duration += duration as u64;
                self.distance += part.phase.approx_distance(threshold);
                self.weighted_pace += duration as f64 * part.phase.pace_seconds(threshold);
            }
            PlanItem::Series(series) => {
                let reps = series.repetitions as f64;
                self.duration += series.total_duration(threshold);
                self.distance += series.approx_distance(threshold);
                // Work and rest run at different paces; weight each separately.
                for phase in [&series.work, &series.rest] {
                    self.weighted_pace +=
                        phase.effective_duration(threshold) as f64 * reps * phase.pace_seconds(threshold);
                }
            }
        }
    }
}

/// Fold every item (loose and grouped) into totals at `threshold`.
pub fn compute_summary(collection: &Collection, threshold: ThresholdPace) -> PlanSummary {
    let mut totals = Totals::default();
    for item in collection.items() {
        totals.add(item, threshold);
    }

    PlanSummary {
        total_duration_seconds: totals.duration,
        total_distance_km: totals.distance,
        weighted_pace_seconds: if totals.duration > 0 {
            totals.weighted_pace / totals.duration as f64
        } else {
            0.0
        },
    }
}
