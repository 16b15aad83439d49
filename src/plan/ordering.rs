//! Two-level ordering over the collection.
//!
//! Top-level entries (loose items and groups) carry a dense `generalOrder`
//! 1..N. Group members carry a contiguous `innerOrder` 1..M matching their
//! position. On top of both, every part and series gets a display position
//! 1..T in canonical render order.

use tracing::debug;
use uuid::Uuid;

use super::item::{Collection, PlanItem, TopLevel};

/// Backfill missing top-level orders from each entry's position.
///
/// A loose item at index `i` gets `i + 1`; a group at index `j` gets
/// `loose_items.len() + j + 1`. Collisions with existing orders are settled
/// by encounter order when ranking. Returns how many entries were migrated.
pub fn migrate_legacy_order(collection: &mut Collection) -> usize {
    let loose_len = collection.loose_items.len();
    let mut migrated = 0;

    for (index, item) in collection.loose_items.iter_mut().enumerate() {
        if item.general_order().is_none() {
            item.set_general_order(Some(index as u32 + 1));
            migrated += 1;
        }
    }
    for (index, group) in collection.groups.iter_mut().enumerate() {
        if group.general_order.is_none() {
            group.general_order = Some((loose_len + index) as u32 + 1);
            migrated += 1;
        }
    }

    if migrated > 0 {
        debug!("Backfilled general order for {} legacy entries", migrated);
    }
    migrated
}

/// Top-level entries sorted by `generalOrder`, loose items winning ties.
fn ranked_top_level(collection: &Collection) -> Vec<TopLevel> {
    let mut ranked: Vec<(u32, usize, TopLevel)> = collection
        .loose_items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.general_order().unwrap_or(u32::MAX), i, TopLevel::Item(i)))
        .chain(collection.groups.iter().enumerate().map(|(i, group)| {
            (
                group.general_order.unwrap_or(u32::MAX),
                collection.loose_items.len() + i,
                TopLevel::Group(i),
            )
        }))
        .collect();
    ranked.sort_by_key(|&(order, encounter, _)| (order, encounter));
    ranked.into_iter().map(|(_, _, entry)| entry).collect()
}

fn set_top_level_order(collection: &mut Collection, entry: TopLevel, order: u32) {
    match entry {
        TopLevel::Item(i) => collection.loose_items[i].set_general_order(Some(order)),
        TopLevel::Group(i) => collection.groups[i].general_order = Some(order),
    }
}

/// Re-establish every ordering invariant. Idempotent.
pub fn recompute_order(collection: &mut Collection) {
    migrate_legacy_order(collection);

    for group in &mut collection.groups {
        for (i, member) in group.members.iter_mut().enumerate() {
            member.set_inner_order(Some(i as u32 + 1));
            member.set_general_order(None);
        }
    }
    for item in &mut collection.loose_items {
        item.set_inner_order(None);
    }

    for (rank, entry) in ranked_top_level(collection).into_iter().enumerate() {
        set_top_level_order(collection, entry, rank as u32 + 1);
    }

    // Orders are now dense and unique, so plain key sorts are stable.
    collection.loose_items.sort_by_key(|item| item.general_order());
    collection.groups.sort_by_key(|group| group.general_order);

    let mut position = 0u32;
    for entry in ranked_top_level(collection) {
        match entry {
            TopLevel::Item(i) => {
                position += 1;
                collection.loose_items[i].set_display_position(Some(position));
            }
            TopLevel::Group(i) => {
                let group = &mut collection.groups[i];
                let first = position + 1;
                for member in &mut group.members {
                    position += 1;
                    member.set_display_position(Some(position));
                }
                group.display_position = if group.members.is_empty() {
                    group.general_order
                } else {
                    Some(first)
                };
            }
        }
    }

    debug!(
        "Recomputed order: {} top-level entries, {} items",
        collection.top_level_count(),
        position
    );
}

/// Apply a top-level order produced by a drag-and-drop reorder.
///
/// Resolved ids get `1..k` in the order given. Unknown ids, group members
/// and repeats are ignored; unlisted entries follow in their prior order.
pub fn ingest_external_order(collection: &mut Collection, ordered_ids: &[Uuid]) {
    recompute_order(collection);

    let mut sequence: Vec<TopLevel> = Vec::with_capacity(collection.top_level_count());
    for id in ordered_ids {
        if let Some(entry) = collection.top_level(*id) {
            if !sequence.contains(&entry) {
                sequence.push(entry);
            }
        }
    }
    let listed = sequence.len();
    for entry in ranked_top_level(collection) {
        if !sequence.contains(&entry) {
            sequence.push(entry);
        }
    }

    for (rank, entry) in sequence.into_iter().enumerate() {
        set_top_level_order(collection, entry, rank as u32 + 1);
    }
    debug!("Ingested external order for {} of {} entries", listed, collection.top_level_count());

    recompute_order(collection);
}

/// Reorder a group's members. Listed members move to the front in the
/// order given; the rest keep their relative order after them.
pub fn reorder_members(members: &mut Vec<PlanItem>, ordered_ids: &[Uuid]) {
    let mut remaining = std::mem::take(members);
    for id in ordered_ids {
        if let Some(index) = remaining.iter().position(|m| m.id() == *id) {
            members.push(remaining.remove(index));
        }
    }
    members.append(&mut remaining);
}

/// Every part and series in canonical display order.
pub fn display_sequence(collection: &Collection) -> Vec<&PlanItem> {
    let mut sequence = Vec::with_capacity(collection.item_count());
    for entry in ranked_top_level(collection) {
        match entry {
            TopLevel::Item(i) => sequence.push(&collection.loose_items[i]),
            TopLevel::Group(i) => sequence.extend(collection.groups[i].members.iter()),
        }
    }
    sequence
}

/// Ids of top-level entries in `generalOrder` order.
pub fn top_level_ids(collection: &Collection) -> Vec<Uuid> {
    ranked_top_level(collection)
        .into_iter()
        .map(|entry| match entry {
            TopLevel::Item(i) => collection.loose_items[i].id(),
            TopLevel::Group(i) => collection.groups[i].id,
        })
        .collect()
}
