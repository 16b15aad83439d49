//! Drag-and-drop preview and commit

use runplan::metrics::zones::Intensity;
use runplan::plan::{DropAction, EntityKind, FixedName, Phase, PlanError, PlanStore};
use uuid::Uuid;

fn store_with(count: usize) -> (PlanStore, Vec<Uuid>) {
    let mut store = PlanStore::default();
    let ids = (0..count)
        .map(|i| {
            store
                .create_part(&format!("p{}", i), Phase::by_time(Intensity::Zone(110.0), 60))
                .unwrap()
                .id
        })
        .collect();
    (store, ids)
}

fn names(store: &PlanStore) -> Vec<String> {
    store.display_sequence().iter().map(|i| i.name().to_string()).collect()
}

#[test]
fn test_preview_never_mutates() {
    let (store, ids) = store_with(3);
    let before = store.collection().clone();

    let actions = [
        DropAction::Reorder {
            ordered_ids: vec![ids[2], ids[0], ids[1]],
        },
        DropAction::MergeIntoNewGroup {
            dragged: ids[1],
            target: ids[0],
        },
    ];
    for action in &actions {
        store.preview_drop(action).unwrap();
    }
    assert_eq!(store.collection(), &before);
}

#[test]
fn test_reorder_commit() {
    let (mut store, ids) = store_with(3);
    store
        .commit_drop(
            DropAction::Reorder {
                ordered_ids: vec![ids[2], ids[0], ids[1]],
            },
            &mut FixedName("unused".into()),
        )
        .unwrap();
    assert_eq!(names(&store), ["p2", "p0", "p1"]);
    assert_eq!(store.item(ids[2]).unwrap().general_order(), Some(1));
}

#[test]
fn test_partial_reorder_keeps_unlisted_entries_after() {
    let (mut store, ids) = store_with(4);
    store
        .commit_drop(
            DropAction::Reorder {
                ordered_ids: vec![ids[3], ids[1]],
            },
            &mut FixedName("unused".into()),
        )
        .unwrap();
    assert_eq!(names(&store), ["p3", "p1", "p0", "p2"]);
}

#[test]
fn test_add_move_out_and_reorder_within_group() {
    let (mut store, ids) = store_with(4);
    let mut namer = FixedName("pair".into());
    store
        .commit_drop(
            DropAction::MergeIntoNewGroup {
                dragged: ids[1],
                target: ids[0],
            },
            &mut namer,
        )
        .unwrap();
    let group = store.collection().groups[0].id;

    store
        .commit_drop(DropAction::AddToGroup { item: ids[3], group }, &mut namer)
        .unwrap();
    assert_eq!(names(&store), ["p0", "p1", "p3", "p2"]);

    store
        .commit_drop(
            DropAction::ReorderWithinGroup {
                group,
                ordered_ids: vec![ids[3], ids[0], ids[1]],
            },
            &mut namer,
        )
        .unwrap();
    assert_eq!(names(&store), ["p3", "p0", "p1", "p2"]);
    assert_eq!(store.item(ids[3]).unwrap().inner_order(), Some(1));

    store
        .commit_drop(DropAction::MoveOutOfGroup { item: ids[0], group }, &mut namer)
        .unwrap();
    assert_eq!(names(&store), ["p3", "p1", "p2", "p0"]);
    assert_eq!(store.item(ids[0]).unwrap().general_order(), Some(3));
}

#[test]
fn test_move_out_of_wrong_group_is_rejected() {
    let (mut store, ids) = store_with(4);
    let g1 = store.create_group_from_items("g1", &ids[..2]).unwrap().id;
    store.create_group_from_items("g2", &ids[2..]).unwrap();

    let action = DropAction::MoveOutOfGroup { item: ids[2], group: g1 };
    assert!(matches!(
        store.preview_drop(&action),
        Err(PlanError::NotFound {
            kind: EntityKind::Member,
            ..
        })
    ));
}

#[test]
fn test_unknown_ids_are_not_found() {
    let (store, _) = store_with(1);
    let action = DropAction::AddToGroup {
        item: Uuid::new_v4(),
        group: Uuid::new_v4(),
    };
    assert!(matches!(store.preview_drop(&action), Err(PlanError::NotFound { .. })));
}
