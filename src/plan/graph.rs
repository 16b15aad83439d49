//! Bar-chart model of a plan.
//!
//! One bar per part and one per expanded series phase, in display order.
//! Height encodes intensity, width the share of total duration.

use serde::Serialize;
use uuid::Uuid;

use crate::metrics::pace::{format_pace_min_km, ThresholdPace};
use crate::metrics::zones::{bar_height, PaceZone};

use super::item::{Collection, PlanItem};
use super::ordering::display_sequence;
use super::phase::Phase;
use super::types::PhaseKind;

/// Position of a bar inside its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesSlot {
    pub parent_id: Uuid,
    pub kind: PhaseKind,
    pub repetition: u32,
    pub repetitions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphBar {
    /// Part id, or the parent series id for expanded phases
    pub item_id: Uuid,
    pub label: String,
    pub intensity: f64,
    pub is_rpe: bool,
    pub duration_seconds: u32,
    /// 0-100
    pub height: f64,
    /// Percentage of the plan's total duration
    pub width_pct: f64,
    /// `RPE n` or `m:ss min/km`
    pub pace_label: String,
    pub zone: PaceZone,
    pub series: Option<SeriesSlot>,
}

fn pace_label(phase: &Phase, threshold: ThresholdPace) -> String {
    if phase.is_rpe {
        format!("RPE {}", phase.intensity)
    } else {
        format_pace_min_km(phase.pace_seconds(threshold))
    }
}

fn bar(item_id: Uuid, label: String, phase: &Phase, threshold: ThresholdPace, series: Option<SeriesSlot>) -> GraphBar {
    GraphBar {
        item_id,
        label,
        intensity: phase.intensity,
        is_rpe: phase.is_rpe,
        duration_seconds: phase.effective_duration(threshold),
        height: bar_height(phase.intensity, phase.is_rpe),
        width_pct: 0.0,
        pace_label: pace_label(phase, threshold),
        zone: phase.pace_zone(),
        series,
    }
}

/// Build the bars for `collection` at `threshold`.
pub fn graph_bars(collection: &Collection, threshold: ThresholdPace) -> Vec<GraphBar> {
    let mut bars = Vec::new();

    for item in display_sequence(collection) {
        match item {
            PlanItem::Part(part) => bars.push(bar(part.id, part.name.clone(), &part.phase, threshold, None)),
            PlanItem::Series(series) => {
                for expanded in series.expand() {
                    let slot = SeriesSlot {
                        parent_id: expanded.parent_id,
                        kind: expanded.kind,
                        repetition: expanded.repetition,
                        repetitions: series.repetitions,
                    };
                    let label = format!(
                        "{} - {} {}/{}",
                        series.name, expanded.kind, expanded.repetition, series.repetitions
                    );
                    bars.push(bar(series.id, label, &expanded.phase, threshold, Some(slot)));
                }
            }
        }
    }

    let total: u64 = bars.iter().map(|b| b.duration_seconds as u64).sum();
    if total > 0 {
        for bar in &mut bars {
            bar.width_pct = bar.duration_seconds as f64 / total as f64 * 100.0;
        }
    }
    bars
}
