//! Snapshot file export and import

use runplan::plan::snapshot::{load_snapshot_file, save_snapshot_file, ImportPayload};
use runplan::plan::{library, AlwaysConfirm, NeverConfirm, PlanError, PlanStore, SnapshotError};
use runplan::storage::PlanSettings;
use runplan::ThresholdPace;
use tempfile::TempDir;

#[test]
fn test_export_then_import_restores_plan() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plans").join("session.json");

    let mut source = PlanStore::with_collection(library::default_training(), PlanSettings::default());
    source.set_threshold_pace("4:30").unwrap();
    save_snapshot_file(&source, &path, true).unwrap();

    let payload = load_snapshot_file(&path).unwrap();
    let mut target = PlanStore::default();
    target.import_payload(payload, None, &mut AlwaysConfirm).unwrap();

    assert_eq!(target.collection(), source.collection());
    assert_eq!(target.threshold().seconds(), 270);
    assert_eq!(target.compute_summary(), source.compute_summary());
}

#[test]
fn test_declined_replace_keeps_current_plan() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let source = PlanStore::with_collection(library::default_training(), PlanSettings::default());
    save_snapshot_file(&source, &path, false).unwrap();

    let mut target = PlanStore::with_collection(library::long_run_training(ThresholdPace::default()), PlanSettings::default());
    let before = target.collection().clone();
    let result = target.import_payload(load_snapshot_file(&path).unwrap(), None, &mut NeverConfirm);

    assert!(matches!(result, Err(PlanError::Cancelled)));
    assert_eq!(target.collection(), &before);
}

#[test]
fn test_example_set_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("examples.json");
    let json = library::example_set(ThresholdPace::default()).to_json(true).unwrap();
    std::fs::write(&path, json).unwrap();

    let ImportPayload::Examples(set) = load_snapshot_file(&path).unwrap() else {
        panic!("expected an example set");
    };
    assert_eq!(set.len(), 3);

    let mut store = PlanStore::default();
    store
        .import_payload(ImportPayload::Examples(set), Some("pyramid"), &mut AlwaysConfirm)
        .unwrap();
    assert_eq!(store.collection().groups[0].name, "pyramid");
    assert_eq!(store.collection().groups[0].members.len(), 5);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_snapshot_file(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(SnapshotError::Io(_))));
}
