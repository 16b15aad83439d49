//! Two-phase drag-and-drop protocol.
//!
//! While dragging, the UI asks [`PlanStore::preview_drop`] whether a drop
//! would be legal; nothing changes. On drop it calls
//! [`PlanStore::commit_drop`]. A cancelled drag simply never commits.

use tracing::debug;
use uuid::Uuid;

use super::confirm::Namer;
use super::item::Location;
use super::store::PlanStore;
use super::types::{EntityKind, PlanError, PlanResult, ValidationError};

/// Structural change a drop would make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// New top-level order of loose items and groups
    Reorder { ordered_ids: Vec<Uuid> },
    /// Drop one item onto another to group them
    MergeIntoNewGroup { dragged: Uuid, target: Uuid },
    /// Drop an item onto a group
    AddToGroup { item: Uuid, group: Uuid },
    /// Drag a member out of its group
    MoveOutOfGroup { item: Uuid, group: Uuid },
    /// New member order inside one group
    ReorderWithinGroup { group: Uuid, ordered_ids: Vec<Uuid> },
}

impl PlanStore {
    fn require_item(&self, id: Uuid) -> PlanResult<Location> {
        if self.collection().find_group(id).is_some() {
            return Err(ValidationError::NestedGroup.into());
        }
        self.location(id).ok_or(PlanError::not_found(EntityKind::Item, id))
    }

    /// Check that `action` would succeed, without changing anything.
    pub fn preview_drop(&self, action: &DropAction) -> PlanResult<()> {
        debug!("Previewing drop {:?}", action);
        match action {
            DropAction::Reorder { ordered_ids } => {
                for &id in ordered_ids {
                    if self.collection().top_level(id).is_some() {
                        continue;
                    }
                    if self.location(id).is_some() {
                        return Err(PlanError::IllegalMove(format!("{} is inside a group", id)));
                    }
                    return Err(PlanError::not_found(EntityKind::Item, id));
                }
                Ok(())
            }
            DropAction::MergeIntoNewGroup { dragged, target } => {
                if dragged == target {
                    return Err(PlanError::IllegalMove("cannot group an item with itself".to_string()));
                }
                self.require_item(*dragged)?;
                self.require_item(*target)?;
                Ok(())
            }
            DropAction::AddToGroup { item, group } => {
                self.group(*group)?;
                self.require_item(*item)?;
                Ok(())
            }
            DropAction::MoveOutOfGroup { item, group } => {
                if !self.group(*group)?.contains(*item) {
                    return Err(PlanError::not_found(EntityKind::Member, *item));
                }
                Ok(())
            }
            DropAction::ReorderWithinGroup { group, ordered_ids } => {
                let group = self.group(*group)?;
                match ordered_ids.iter().find(|id| !group.contains(**id)) {
                    Some(id) => Err(PlanError::IllegalMove(format!("{} is not a member of {}", id, group.name))),
                    None => Ok(()),
                }
            }
        }
    }

    /// Apply `action`. Merging asks `namer` for the new group's name.
    pub fn commit_drop(&mut self, action: DropAction, namer: &mut dyn Namer) -> PlanResult<()> {
        self.preview_drop(&action)?;

        match action {
            DropAction::Reorder { ordered_ids } => {
                self.ingest_external_order(&ordered_ids);
                Ok(())
            }
            DropAction::MergeIntoNewGroup { dragged, target } => {
                let name = namer
                    .name_group(&self.settings().default_group_name)
                    .ok_or(PlanError::Cancelled)?;
                self.create_group_from_items(&name, &[target, dragged]).map(|_| ())
            }
            DropAction::AddToGroup { item, group } => self.add_to_group(item, group),
            DropAction::MoveOutOfGroup { item, group } => self.move_member_out_of_group(item, group),
            DropAction::ReorderWithinGroup { group, ordered_ids } => self.reorder_group_members(group, &ordered_ids),
        }
    }
}
