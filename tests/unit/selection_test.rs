//! Unit tests for selection and clipboard operations on the store.

use runplan::metrics::zones::Intensity;
use runplan::plan::{AlwaysConfirm, FixedName, NeverConfirm, Phase, PlanError, PlanStore, ValidationError};
use uuid::Uuid;

fn store_with(names: &[&str]) -> (PlanStore, Vec<Uuid>) {
    let mut store = PlanStore::default();
    let ids = names
        .iter()
        .map(|name| {
            store
                .create_part(name, Phase::by_time(Intensity::Rpe(4.0), 180))
                .unwrap()
                .id
        })
        .collect();
    (store, ids)
}

#[test]
fn test_select_unknown_id_is_not_found() {
    let (mut store, _) = store_with(&["a"]);
    assert!(matches!(store.select(Uuid::new_v4()), Err(PlanError::NotFound { .. })));
}

#[test]
fn test_select_all_picks_top_level_entries() {
    let (mut store, ids) = store_with(&["a", "b", "c"]);
    let group = store.create_group_from_items("g", &ids[1..]).unwrap();

    store.select_all();
    assert_eq!(store.selection().ids(), &[ids[0], group.id]);
}

#[test]
fn test_group_from_selection_needs_two_items() {
    let (mut store, ids) = store_with(&["a", "b"]);
    store.select(ids[0]).unwrap();

    let err = store.create_group_from_selection(&mut FixedName("g".into())).unwrap_err();
    assert!(matches!(
        err,
        PlanError::Validation(ValidationError::NotEnoughItems { found: 1, required: 2 })
    ));

    store.select(ids[1]).unwrap();
    let group = store.create_group_from_selection(&mut FixedName("g".into())).unwrap();
    assert_eq!(group.members.len(), 2);
    assert!(store.selection().is_empty());
}

#[test]
fn test_group_from_selection_offers_default_name() {
    let (mut store, ids) = store_with(&["a", "b"]);
    store.select(ids[0]).unwrap();
    store.select(ids[1]).unwrap();

    let mut offered = String::new();
    let group = store
        .create_group_from_selection(&mut |suggested: &str| -> Option<String> {
            offered = suggested.to_string();
            Some(suggested.to_string())
        })
        .unwrap();
    assert_eq!(offered, "Nuevo Grupo");
    assert_eq!(group.name, "Nuevo Grupo");
}

#[test]
fn test_delete_selected_removes_groups_with_members() {
    let (mut store, ids) = store_with(&["a", "b", "c", "d"]);
    let group = store.create_group_from_items("g", &ids[..2]).unwrap();
    store.select(group.id).unwrap();
    store.select(ids[3]).unwrap();

    assert!(matches!(store.delete_selected(&mut NeverConfirm), Err(PlanError::Cancelled)));
    assert_eq!(store.collection().item_count(), 4);

    let removed = store.delete_selected(&mut AlwaysConfirm).unwrap();
    assert_eq!(removed, 4);
    assert_eq!(store.collection().item_count(), 1);
    assert_eq!(store.collection().loose_items[0].id(), ids[2]);
    assert_eq!(store.collection().loose_items[0].general_order(), Some(1));
    assert!(store.selection().is_empty());
}

#[test]
fn test_delete_selected_member_leaves_group() {
    let (mut store, ids) = store_with(&["a", "b", "c"]);
    let group = store.create_group_from_items("g", &ids).unwrap();
    store.select(ids[1]).unwrap();

    store.delete_selected(&mut AlwaysConfirm).unwrap();

    let group = store.group(group.id).unwrap();
    assert_eq!(group.members.len(), 2);
    assert_eq!(group.members[1].inner_order(), Some(2));
}

#[test]
fn test_paste_mints_fresh_ids_each_time() {
    let (mut store, ids) = store_with(&["a", "b"]);
    assert_eq!(store.copy_items(&[ids[0]]), 1);

    let first = store.paste();
    let second = store.paste();
    assert_eq!(first.len(), 1);
    assert_ne!(first[0], second[0]);
    assert_ne!(first[0], ids[0]);
    assert_eq!(store.collection().loose_items.len(), 4);
    assert_eq!(store.item(second[0]).unwrap().general_order(), Some(4));

    store.clear_clipboard();
    assert!(store.paste().is_empty());
}

#[test]
fn test_copying_a_group_copies_its_members() {
    let (mut store, ids) = store_with(&["a", "b", "c"]);
    let group = store.create_group_from_items("g", &ids[..2]).unwrap();
    assert_eq!(store.copy_items(&[group.id, Uuid::new_v4()]), 2);
    assert_eq!(store.clipboard().len(), 2);
}

#[test]
fn test_deleting_an_item_deselects_it() {
    let (mut store, ids) = store_with(&["a", "b"]);
    store.select(ids[0]).unwrap();
    store.delete_part(ids[0], &mut AlwaysConfirm).unwrap();
    assert!(!store.selection().contains(ids[0]));
}
