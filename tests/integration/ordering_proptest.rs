//! Property-based tests for the ordering invariants and snapshot round-trip.
//!
//! Random sequences of structural edits are applied to a store. After every
//! step:
//!
//! 1. **Density**: top-level general orders are exactly 1..N.
//! 2. **Contiguity**: each group's inner orders are exactly 1..M in
//!    member order.
//! 3. **Exclusivity**: every part and series carries exactly one of
//!    general order and inner order.
//! 4. **Display**: display positions cover 1..T over all items.
//!
//! Finally `parse(export(c)) == c` for the resulting collection.

use proptest::prelude::*;
use runplan::metrics::zones::Intensity;
use runplan::plan::snapshot::{parse_snapshot, ImportPayload};
use runplan::plan::{AlwaysConfirm, Collection, FixedName, Phase, PhaseInput, PlanStore};
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Op {
    CreatePart { zone: u32, seconds: u32 },
    CreateDistancePart { rpe: u32, quarters: u32 },
    CreateSeries { zone: u32, reps: u32 },
    Group { first: usize, second: usize },
    AddToGroup { item: usize, group: usize },
    MoveOut { group: usize, member: usize },
    DeleteItem { item: usize },
    DeleteGroup { group: usize },
    Duplicate { item: usize },
    DuplicateGroup { group: usize },
    Reorder { rotate: usize },
    ReorderMembers { group: usize, rotate: usize },
    CopyPaste { item: usize },
    SetThreshold { seconds: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (70u32..=150, 1u32..=900).prop_map(|(zone, seconds)| Op::CreatePart { zone, seconds }),
        2 => (0u32..=10, 1u32..=40).prop_map(|(rpe, quarters)| Op::CreateDistancePart { rpe, quarters }),
        2 => (70u32..=150, 1u32..=10).prop_map(|(zone, reps)| Op::CreateSeries { zone, reps }),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(first, second)| Op::Group { first, second }),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(item, group)| Op::AddToGroup { item, group }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(group, member)| Op::MoveOut { group, member }),
        1 => any::<usize>().prop_map(|item| Op::DeleteItem { item }),
        1 => any::<usize>().prop_map(|group| Op::DeleteGroup { group }),
        1 => any::<usize>().prop_map(|item| Op::Duplicate { item }),
        1 => any::<usize>().prop_map(|group| Op::DuplicateGroup { group }),
        1 => any::<usize>().prop_map(|rotate| Op::Reorder { rotate }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(group, rotate)| Op::ReorderMembers { group, rotate }),
        1 => any::<usize>().prop_map(|item| Op::CopyPaste { item }),
        1 => (180u32..=480).prop_map(|seconds| Op::SetThreshold { seconds }),
    ]
}

fn pick(ids: &[Uuid], index: usize) -> Option<Uuid> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn item_ids(store: &PlanStore) -> Vec<Uuid> {
    store.collection().items().map(|i| i.id()).collect()
}

fn group_ids(store: &PlanStore) -> Vec<Uuid> {
    store.collection().groups.iter().map(|g| g.id).collect()
}

/// Apply one edit. Rejected edits are part of the exercise and ignored.
fn apply(store: &mut PlanStore, op: &Op) {
    match *op {
        Op::CreatePart { zone, seconds } => {
            let _ = store.create_part("part", Phase::by_time(Intensity::Zone(zone as f64), seconds));
        }
        Op::CreateDistancePart { rpe, quarters } => {
            let input = PhaseInput::distance(Intensity::Rpe(rpe as f64), quarters as f64 * 0.25);
            if let Ok(phase) = store.build_phase(input) {
                let _ = store.create_part("distance", phase);
            }
        }
        Op::CreateSeries { zone, reps } => {
            let work = Phase::by_time(Intensity::Zone(zone as f64), 60);
            let rest = Phase::by_time(Intensity::Rpe(1.0), 30);
            let _ = store.create_series("series", work, rest, reps);
        }
        Op::Group { first, second } => {
            let ids = item_ids(store);
            if let (Some(a), Some(b)) = (pick(&ids, first), pick(&ids, second)) {
                let _ = store.create_group_from_items("group", &[a, b]);
            }
        }
        Op::AddToGroup { item, group } => {
            if let (Some(item), Some(group)) = (pick(&item_ids(store), item), pick(&group_ids(store), group)) {
                let _ = store.add_to_group(item, group);
            }
        }
        Op::MoveOut { group, member } => {
            if let Some(group) = pick(&group_ids(store), group) {
                let members: Vec<Uuid> = store
                    .group(group)
                    .map(|g| g.members.iter().map(|m| m.id()).collect())
                    .unwrap_or_default();
                if let Some(member) = pick(&members, member) {
                    let _ = store.move_member_out_of_group(member, group);
                }
            }
        }
        Op::DeleteItem { item } => {
            if let Some(id) = pick(&item_ids(store), item) {
                let _ = store.delete_part(id, &mut AlwaysConfirm);
            }
        }
        Op::DeleteGroup { group } => {
            if let Some(id) = pick(&group_ids(store), group) {
                let _ = store.delete_group(id, &mut AlwaysConfirm);
            }
        }
        Op::Duplicate { item } => {
            if let Some(id) = pick(&item_ids(store), item) {
                let _ = store.duplicate(id);
            }
        }
        Op::DuplicateGroup { group } => {
            if let Some(id) = pick(&group_ids(store), group) {
                let _ = store.duplicate(id);
            }
        }
        Op::Reorder { rotate } => {
            let mut ids = runplan::plan::ordering::top_level_ids(store.collection());
            if !ids.is_empty() {
                let len = ids.len();
                ids.rotate_left(rotate % len);
                store.ingest_external_order(&ids);
            }
        }
        Op::ReorderMembers { group, rotate } => {
            if let Some(group) = pick(&group_ids(store), group) {
                let mut members: Vec<Uuid> = store
                    .group(group)
                    .map(|g| g.members.iter().map(|m| m.id()).collect())
                    .unwrap_or_default();
                if !members.is_empty() {
                    let len = members.len();
                    members.rotate_left(rotate % len);
                    let _ = store.reorder_group_members(group, &members);
                }
            }
        }
        Op::CopyPaste { item } => {
            if let Some(id) = pick(&item_ids(store), item) {
                store.copy_items(&[id]);
                store.paste();
                store.clear_clipboard();
            }
        }
        Op::SetThreshold { seconds } => {
            let pace = format!("{}:{:02}", seconds / 60, seconds % 60);
            let _ = store.set_threshold_pace(&pace);
        }
    }
}

fn check_invariants(collection: &Collection) -> Result<(), TestCaseError> {
    let mut top: Vec<u32> = Vec::new();
    for item in &collection.loose_items {
        prop_assert!(item.inner_order().is_none(), "loose item with inner order");
        match item.general_order() {
            Some(order) => top.push(order),
            None => return Err(TestCaseError::fail("loose item without general order")),
        }
    }
    for group in &collection.groups {
        match group.general_order {
            Some(order) => top.push(order),
            None => return Err(TestCaseError::fail("group without general order")),
        }
        for (i, member) in group.members.iter().enumerate() {
            prop_assert_eq!(member.inner_order(), Some(i as u32 + 1));
            prop_assert!(member.general_order().is_none(), "member with general order");
        }
    }
    top.sort_unstable();
    let expected: Vec<u32> = (1..=collection.top_level_count() as u32).collect();
    prop_assert_eq!(top, expected);

    let mut positions: Vec<u32> = collection.items().filter_map(|i| i.display_position()).collect();
    positions.sort_unstable();
    let expected: Vec<u32> = (1..=collection.item_count() as u32).collect();
    prop_assert_eq!(positions, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn ordering_invariants_hold_after_every_edit(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut store = PlanStore::default();
        for op in &ops {
            apply(&mut store, op);
            check_invariants(store.collection())?;
        }
    }

    #[test]
    fn group_deletion_preserves_members(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let mut store = PlanStore::default();
        for op in &ops {
            apply(&mut store, op);
        }
        let _ = store.create_group_from_items("extra", &item_ids(&store));

        for group in group_ids(&store) {
            let members: Vec<Uuid> = store.group(group).unwrap().members.iter().map(|m| m.id()).collect();
            let before = store.collection().item_count();
            let released = store.delete_group(group, &mut AlwaysConfirm).unwrap();

            prop_assert_eq!(&released, &members);
            prop_assert_eq!(store.collection().item_count(), before);
            for id in &members {
                prop_assert!(store.collection().loose_items.iter().any(|i| i.id() == *id));
            }
            check_invariants(store.collection())?;
        }
    }

    #[test]
    fn export_then_parse_reproduces_collection(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut store = PlanStore::default();
        for op in &ops {
            apply(&mut store, op);
        }
        let json = store.export_json(false).unwrap();

        match parse_snapshot(&json).unwrap() {
            ImportPayload::Plan(snapshot) => prop_assert_eq!(&snapshot.into_collection(), store.collection()),
            other => return Err(TestCaseError::fail(format!("expected plan, got {:?}", other))),
        }
    }

    #[test]
    fn selection_grouping_keeps_invariants(ops in prop::collection::vec(op_strategy(), 2..20)) {
        let mut store = PlanStore::default();
        for op in &ops {
            apply(&mut store, op);
        }
        for id in item_ids(&store).into_iter().step_by(2) {
            store.select(id).unwrap();
        }
        let selected = store.selection().len();
        match store.create_group_from_selection(&mut FixedName("sel".into())) {
            Ok(group) => prop_assert_eq!(group.members.len(), selected),
            Err(_) => prop_assert!(selected < 2),
        }
        check_invariants(store.collection())?;
    }
}
