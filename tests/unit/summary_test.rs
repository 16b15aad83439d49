//! Unit tests for plan totals, including the reference scenarios.

use runplan::metrics::pace::ThresholdPace;
use runplan::metrics::zones::Intensity;
use runplan::plan::{library, DesignMode, Phase, PlanStore};

use super::assert_close;

#[test]
fn test_zone_part_by_time() {
    let mut store = PlanStore::default();
    let part = store
        .create_part("steady", Phase::new(100.0, 600.0, false, Some(600.0), DesignMode::Time))
        .unwrap();

    let threshold = store.threshold();
    assert_eq!(part.phase.effective_duration(threshold), 600);
    assert_close(part.phase.approx_distance(threshold), 2.0, 1e-9);

    let summary = store.compute_summary();
    assert_eq!(summary.formatted_pace(), "5:00 min/km");
    assert_eq!(summary.total_duration_seconds, 600);
}

#[test]
fn test_rpe_part_by_time() {
    let mut store = PlanStore::default();
    let part = store
        .create_part("easy", Phase::new(5.0, 600.0, true, Some(600.0), DesignMode::Time))
        .unwrap();

    assert_close(part.phase.pace_seconds(store.threshold()), 330.0, 1e-9);
    assert_close(part.phase.approx_distance(store.threshold()), 600.0 / 330.0, 1e-9);
    assert_close(store.compute_summary().total_distance_km, 1.818, 1e-3);
}

#[test]
fn test_distance_part_follows_threshold_change() {
    let mut store = PlanStore::default();
    let id = store
        .create_part("tempo", Phase::new(100.0, 600.0, false, Some(2.0), DesignMode::Distance))
        .unwrap()
        .id;
    assert_eq!(store.compute_summary().total_duration_seconds, 600);

    store.set_threshold_pace("4:30").unwrap();

    let part = store.part(id).unwrap();
    assert_eq!(part.phase.effective_duration(store.threshold()), 540);
    assert_eq!(part.phase.approx_distance(store.threshold()), 2.0);
    let summary = store.compute_summary();
    assert_eq!(summary.total_duration_seconds, 540);
    assert_close(summary.total_distance_km, 2.0, 1e-9);
}

#[test]
fn test_series_duration_counts_every_repetition() {
    let mut store = PlanStore::default();
    let series = store
        .create_series(
            "250s",
            Phase::new(100.0, 75.0, false, Some(0.25), DesignMode::Distance),
            Phase::new(1.0, 30.0, true, Some(30.0), DesignMode::Time),
            6,
        )
        .unwrap();

    assert_eq!(series.total_duration(store.threshold()), 630);
    assert_eq!(store.compute_summary().total_duration_seconds, 630);
    assert_eq!(series.expand().len(), 12);
}

#[test]
fn test_series_pace_weighted_per_phase() {
    let mut store = PlanStore::default();
    store
        .create_series(
            "reps",
            Phase::by_time(Intensity::Zone(90.0), 120),
            Phase::by_time(Intensity::Zone(150.0), 60),
            4,
        )
        .unwrap();

    let summary = store.compute_summary();
    // 480 s at 270 s/km and 240 s at 450 s/km
    assert_close(summary.weighted_pace_seconds, (480.0 * 270.0 + 240.0 * 450.0) / 720.0, 1e-9);
}

#[test]
fn test_default_training_totals() {
    let store = PlanStore::with_collection(library::default_training(), Default::default());
    let threshold = ThresholdPace::default();
    let summary = store.compute_summary();

    // central 720 + 6 x (75 + 30) + all-out 6 km at 210 s/km + 2 x (150 + 60)
    assert_eq!(summary.total_duration_seconds, 720 + 630 + 1260 + 420);
    assert!(summary.total_distance_km > 6.0);
    assert!(summary.weighted_pace_seconds > 0.0);
    assert_eq!(store.graph().len(), 1 + 12 + 1 + 4);
    assert_eq!(threshold, store.threshold());
}
