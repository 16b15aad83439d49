//! The owned plan state and its mutation API.
//!
//! Every mutation validates before touching state and finishes with an
//! ordering pass, so callers can read the collection straight after.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::metrics::pace::{validate_pace_format, ThresholdPace};
use crate::storage::config::PlanSettings;

use super::confirm::{ConfirmRequest, Confirmer, Namer};
use super::graph::{graph_bars, GraphBar};
use super::item::{Collection, Group, Location, Part, PlanItem, Series};
use super::ordering;
use super::phase::{Phase, PhaseInput};
use super::selection::{Clipboard, Selection};
use super::summary::{compute_summary, PlanSummary};
use super::types::{EntityKind, PlanError, PlanResult, ValidationError};

/// Fewest items a new group needs.
pub const MIN_GROUP_ITEMS: usize = 2;

/// Replacement name and phase for a part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartUpdate {
    pub name: String,
    pub phase: Phase,
}

/// Replacement name, phases and repetitions for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesUpdate {
    pub name: String,
    pub work: Phase,
    pub rest: Phase,
    pub repetitions: u32,
}

/// Plan state: collection, threshold pace, selection and clipboard.
#[derive(Debug, Clone)]
pub struct PlanStore {
    collection: Collection,
    threshold: ThresholdPace,
    selection: Selection,
    clipboard: Clipboard,
    settings: PlanSettings,
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new(PlanSettings::default())
    }
}

impl PlanStore {
    /// Create an empty store. The threshold pace comes from `settings`.
    pub fn new(settings: PlanSettings) -> Self {
        Self {
            collection: Collection::new(),
            threshold: settings.threshold(),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            settings,
        }
    }

    /// Create a store around an existing collection.
    pub fn with_collection(collection: Collection, settings: PlanSettings) -> Self {
        let mut store = Self::new(settings);
        store.load_collection(collection);
        store
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn threshold(&self) -> ThresholdPace {
        self.threshold
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    // ---- Threshold pace ----

    /// Apply a new threshold pace from user input (`m:ss`).
    ///
    /// On rejection the previous pace stays in place.
    pub fn set_threshold_pace(&mut self, pace: &str) -> PlanResult<()> {
        let pace = pace.trim();
        if !validate_pace_format(pace) {
            warn!("Rejected threshold pace '{}'", pace);
            return Err(ValidationError::InvalidPace(pace.to_string()).into());
        }
        let threshold: ThresholdPace = pace.parse().map_err(ValidationError::from)?;
        self.set_threshold(threshold);
        Ok(())
    }

    /// Apply a new threshold pace and refresh cached durations.
    pub fn set_threshold(&mut self, threshold: ThresholdPace) {
        self.threshold = threshold;
        for phase in self.collection.phases_mut() {
            phase.refresh_cached_duration(threshold);
        }
        info!("Threshold pace set to {}/km", threshold);
    }

    /// Convert form input into a phase at the current threshold pace.
    pub fn build_phase(&self, input: PhaseInput) -> PlanResult<Phase> {
        Ok(input.into_phase(self.threshold)?)
    }

    // ---- Lookups ----

    pub fn item(&self, id: Uuid) -> PlanResult<&PlanItem> {
        self.collection
            .find_item(id)
            .ok_or(PlanError::not_found(EntityKind::Item, id))
    }

    pub fn part(&self, id: Uuid) -> PlanResult<&Part> {
        match self.item(id)? {
            PlanItem::Part(part) => Ok(part),
            PlanItem::Series(_) => Err(PlanError::not_found(EntityKind::Item, id)),
        }
    }

    pub fn series(&self, id: Uuid) -> PlanResult<&Series> {
        match self.item(id)? {
            PlanItem::Series(series) => Ok(series),
            PlanItem::Part(_) => Err(PlanError::not_found(EntityKind::Item, id)),
        }
    }

    pub fn group(&self, id: Uuid) -> PlanResult<&Group> {
        self.collection
            .find_group(id)
            .ok_or(PlanError::not_found(EntityKind::Group, id))
    }

    fn contains_id(&self, id: Uuid) -> bool {
        self.collection.find_item(id).is_some() || self.collection.find_group(id).is_some()
    }

    // ---- Creation and editing ----

    /// Append a new part at the end of the top level.
    pub fn create_part(&mut self, name: &str, phase: Phase) -> PlanResult<Part> {
        let name = validate_name(name)?;
        phase.validate()?;

        let mut part = Part::new(name, phase);
        part.general_order = Some(self.collection.next_general_order());
        let id = part.id;
        self.collection.loose_items.push(part.into());
        self.recompute_order();

        info!("Created part {}", id);
        Ok(self.part(id)?.clone())
    }

    /// Append a new series at the end of the top level.
    pub fn create_series(&mut self, name: &str, work: Phase, rest: Phase, repetitions: u32) -> PlanResult<Series> {
        let name = validate_name(name)?;
        work.validate()?;
        rest.validate()?;
        self.validate_repetitions(repetitions)?;

        let mut series = Series::new(name, work, rest, repetitions);
        series.general_order = Some(self.collection.next_general_order());
        let id = series.id;
        self.collection.loose_items.push(series.into());
        self.recompute_order();

        info!("Created series {} ({} reps)", id, repetitions);
        Ok(self.series(id)?.clone())
    }

    /// Replace a part's name and phase in place. A series becomes a part.
    pub fn update_part(&mut self, id: Uuid, update: PartUpdate) -> PlanResult<()> {
        let name = validate_name(&update.name)?;
        update.phase.validate()?;

        let item = self
            .collection
            .find_item_mut(id)
            .ok_or(PlanError::not_found(EntityKind::Item, id))?;
        let mut part = Part::new(name, update.phase);
        part.id = id;
        part.general_order = item.general_order();
        part.inner_order = item.inner_order();
        part.display_position = item.display_position();
        *item = part.into();

        info!("Updated part {}", id);
        Ok(())
    }

    /// Replace a series' name, phases and repetitions in place. A part becomes a series.
    pub fn update_series(&mut self, id: Uuid, update: SeriesUpdate) -> PlanResult<()> {
        let name = validate_name(&update.name)?;
        update.work.validate()?;
        update.rest.validate()?;
        self.validate_repetitions(update.repetitions)?;

        let item = self
            .collection
            .find_item_mut(id)
            .ok_or(PlanError::not_found(EntityKind::Item, id))?;
        let mut series = Series::new(name, update.work, update.rest, update.repetitions);
        series.id = id;
        series.general_order = item.general_order();
        series.inner_order = item.inner_order();
        series.display_position = item.display_position();
        *item = series.into();

        info!("Updated series {}", id);
        Ok(())
    }

    pub fn rename_group(&mut self, id: Uuid, name: &str) -> PlanResult<()> {
        let name = validate_name(name)?;
        let group = self
            .collection
            .find_group_mut(id)
            .ok_or(PlanError::not_found(EntityKind::Group, id))?;
        group.name = name;
        info!("Renamed group {}", id);
        Ok(())
    }

    /// Copy an item or group to the end of the top level with fresh ids.
    ///
    /// A duplicated group member lands among the loose items.
    pub fn duplicate(&mut self, id: Uuid) -> PlanResult<Uuid> {
        let order = Some(self.collection.next_general_order());
        let suffix = self.settings.copy_suffix.clone();

        let copy_id = if let Some(group) = self.collection.find_group(id) {
            let mut copy = group.detached_copy();
            copy.name.push_str(&suffix);
            copy.general_order = order;
            let copy_id = copy.id;
            self.collection.groups.push(copy);
            copy_id
        } else {
            let mut copy = self.item(id)?.detached_copy();
            copy.set_name(format!("{}{}", copy.name(), suffix));
            copy.set_general_order(order);
            let copy_id = copy.id();
            self.collection.loose_items.push(copy);
            copy_id
        };

        self.recompute_order();
        info!("Duplicated {} as {}", id, copy_id);
        Ok(copy_id)
    }

    // ---- Deletion ----

    /// Remove a part or series from wherever it lives.
    pub fn delete_part(&mut self, id: Uuid, confirmer: &mut dyn Confirmer) -> PlanResult<PlanItem> {
        let name = self.item(id)?.name().to_string();
        if !confirmer.confirm(&ConfirmRequest::DeletePart { name }) {
            return Err(PlanError::Cancelled);
        }

        let removed = self
            .collection
            .take_item(id)
            .ok_or(PlanError::not_found(EntityKind::Item, id))?;
        self.selection.deselect(id);
        self.recompute_order();

        info!("Deleted {}", id);
        Ok(removed)
    }

    /// Remove a group. Its members move to the end of the top level.
    ///
    /// Returns the ids of the released members.
    pub fn delete_group(&mut self, id: Uuid, confirmer: &mut dyn Confirmer) -> PlanResult<Vec<Uuid>> {
        let index = self
            .collection
            .group_index(id)
            .ok_or(PlanError::not_found(EntityKind::Group, id))?;
        let name = self.collection.groups[index].name.clone();
        if !confirmer.confirm(&ConfirmRequest::DeleteGroup { name }) {
            return Err(PlanError::Cancelled);
        }

        let group = self.collection.groups.remove(index);
        let released: Vec<Uuid> = group.members.iter().map(PlanItem::id).collect();
        for mut member in group.members {
            member.set_general_order(Some(self.collection.next_general_order()));
            self.collection.loose_items.push(member);
        }
        self.selection.deselect(id);
        self.recompute_order();

        info!("Deleted group {}, released {} members", id, released.len());
        Ok(released)
    }

    // ---- Grouping ----

    /// Items among `ids` that resolve to parts or series, deduplicated.
    fn resolve_items(&self, ids: &[Uuid]) -> Vec<Uuid> {
        let mut resolved = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.collection.find_item(id).is_some() && !resolved.contains(&id) {
                resolved.push(id);
            }
        }
        resolved
    }

    /// Group the given items under `name`, in the order given.
    ///
    /// The group takes the earliest top-level slot any of the items held.
    pub fn create_group_from_items(&mut self, name: &str, ids: &[Uuid]) -> PlanResult<Group> {
        let name = validate_name(name)?;
        let resolved = self.resolve_items(ids);
        if resolved.len() < MIN_GROUP_ITEMS {
            return Err(ValidationError::NotEnoughItems {
                found: resolved.len(),
                required: MIN_GROUP_ITEMS,
            }
            .into());
        }

        let slot = resolved
            .iter()
            .filter_map(|id| self.collection.container_general_order(*id))
            .min()
            .unwrap_or_else(|| self.collection.next_general_order());
        let members: Vec<PlanItem> = resolved.iter().filter_map(|id| self.collection.take_item(*id)).collect();

        let mut group = Group::new(name, members);
        group.general_order = Some(slot);
        let id = group.id;
        self.collection.groups.push(group);
        self.recompute_order();

        info!("Created group {} with {} items", id, resolved.len());
        Ok(self.group(id)?.clone())
    }

    /// Group the selected items, asking `namer` for the group name.
    pub fn create_group_from_selection(&mut self, namer: &mut dyn Namer) -> PlanResult<Group> {
        let ids = self.selection.ids().to_vec();
        let found = self.resolve_items(&ids).len();
        if found < MIN_GROUP_ITEMS {
            return Err(ValidationError::NotEnoughItems {
                found,
                required: MIN_GROUP_ITEMS,
            }
            .into());
        }

        let name = namer
            .name_group(&self.settings.default_group_name)
            .ok_or(PlanError::Cancelled)?;
        let group = self.create_group_from_items(&name, &ids)?;
        self.selection.clear();
        Ok(group)
    }

    /// Move an item into a group, appending it to the members.
    ///
    /// No-op when the item is already in that group.
    pub fn add_to_group(&mut self, item_id: Uuid, group_id: Uuid) -> PlanResult<()> {
        let target = self
            .collection
            .find_group(group_id)
            .ok_or(PlanError::not_found(EntityKind::Group, group_id))?;
        if target.contains(item_id) {
            debug!("{} already in group {}", item_id, group_id);
            return Ok(());
        }
        if self.collection.find_group(item_id).is_some() {
            return Err(ValidationError::NestedGroup.into());
        }

        let item = self
            .collection
            .take_item(item_id)
            .ok_or(PlanError::not_found(EntityKind::Item, item_id))?;
        let group = self
            .collection
            .find_group_mut(group_id)
            .ok_or(PlanError::not_found(EntityKind::Group, group_id))?;
        group.members.push(item);
        self.recompute_order();

        info!("Added {} to group {}", item_id, group_id);
        Ok(())
    }

    /// Take a member out of its group and place it at the end of the top level.
    pub fn move_member_out_of_group(&mut self, item_id: Uuid, group_id: Uuid) -> PlanResult<()> {
        let group = self
            .collection
            .group_index(group_id)
            .ok_or(PlanError::not_found(EntityKind::Group, group_id))?;
        let index = self.collection.groups[group]
            .member_index(item_id)
            .ok_or(PlanError::not_found(EntityKind::Member, item_id))?;

        let mut item = self.collection.groups[group].members.remove(index);
        item.set_general_order(Some(self.collection.next_general_order()));
        self.collection.loose_items.push(item);
        self.recompute_order();

        info!("Moved {} out of group {}", item_id, group_id);
        Ok(())
    }

    /// Reorder a group's members after a drag within the group.
    pub fn reorder_group_members(&mut self, group_id: Uuid, ordered_ids: &[Uuid]) -> PlanResult<()> {
        let group = self
            .collection
            .find_group_mut(group_id)
            .ok_or(PlanError::not_found(EntityKind::Group, group_id))?;
        ordering::reorder_members(&mut group.members, ordered_ids);
        self.recompute_order();
        Ok(())
    }

    // ---- Ordering and derived views ----

    /// Re-establish the ordering invariants. Idempotent.
    pub fn recompute_order(&mut self) {
        ordering::recompute_order(&mut self.collection);
    }

    /// Apply a flat top-level order produced by a drag-and-drop reorder.
    pub fn ingest_external_order(&mut self, ordered_ids: &[Uuid]) {
        ordering::ingest_external_order(&mut self.collection, ordered_ids);
    }

    /// Parts and series in canonical display order.
    pub fn display_sequence(&self) -> Vec<&PlanItem> {
        ordering::display_sequence(&self.collection)
    }

    pub fn compute_summary(&self) -> PlanSummary {
        compute_summary(&self.collection, self.threshold)
    }

    pub fn graph(&self) -> Vec<GraphBar> {
        graph_bars(&self.collection, self.threshold)
    }

    // ---- Selection ----

    /// Select an item or group. Returns `false` if it was already selected.
    pub fn select(&mut self, id: Uuid) -> PlanResult<bool> {
        if !self.contains_id(id) {
            return Err(PlanError::not_found(EntityKind::Item, id));
        }
        Ok(self.selection.select(id))
    }

    pub fn deselect(&mut self, id: Uuid) -> bool {
        self.selection.deselect(id)
    }

    /// Flip selection of an item or group and return the new state.
    pub fn toggle_selection(&mut self, id: Uuid) -> PlanResult<bool> {
        if !self.contains_id(id) {
            return Err(PlanError::not_found(EntityKind::Item, id));
        }
        Ok(self.selection.toggle(id))
    }

    /// Select every loose item and group.
    pub fn select_all(&mut self) {
        self.selection.clear();
        for id in ordering::top_level_ids(&self.collection) {
            self.selection.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete everything selected.
    ///
    /// Selected groups go with their members; selected members of other
    /// groups are removed from them. Returns how many parts, series and
    /// groups were removed.
    pub fn delete_selected(&mut self, confirmer: &mut dyn Confirmer) -> PlanResult<usize> {
        if self.selection.is_empty() {
            return Ok(0);
        }
        if !confirmer.confirm(&ConfirmRequest::DeleteSelected {
            count: self.selection.len(),
        }) {
            return Err(PlanError::Cancelled);
        }

        let selected = self.selection.ids().to_vec();
        let mut removed = 0;
        for id in &selected {
            if let Some(index) = self.collection.group_index(*id) {
                let group = self.collection.groups.remove(index);
                removed += 1 + group.members.len();
            }
        }
        for id in &selected {
            if self.collection.take_item(*id).is_some() {
                removed += 1;
            }
        }

        self.selection.clear();
        self.recompute_order();

        info!("Deleted {} selected entries", removed);
        Ok(removed)
    }

    // ---- Clipboard ----

    /// Copy items to the clipboard. A group id copies its members.
    ///
    /// Returns how many items were copied.
    pub fn copy_items(&mut self, ids: &[Uuid]) -> usize {
        let mut copied = 0;
        for &id in ids {
            if let Some(group) = self.collection.find_group(id) {
                for member in &group.members {
                    self.clipboard.push(member);
                    copied += 1;
                }
            } else if let Some(item) = self.collection.find_item(id) {
                self.clipboard.push(item);
                copied += 1;
            } else {
                warn!("Nothing to copy for {}", id);
            }
        }
        debug!("Copied {} items to clipboard", copied);
        copied
    }

    pub fn copy_selection(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        self.copy_items(&ids)
    }

    /// Append fresh copies of the clipboard to the end of the top level.
    pub fn paste(&mut self) -> Vec<Uuid> {
        let mut pasted = Vec::with_capacity(self.clipboard.len());
        for mut item in self.clipboard.paste() {
            item.set_general_order(Some(self.collection.next_general_order()));
            pasted.push(item.id());
            self.collection.loose_items.push(item);
        }
        if !pasted.is_empty() {
            self.recompute_order();
            info!("Pasted {} items", pasted.len());
        }
        pasted
    }

    pub fn clear_clipboard(&mut self) {
        self.clipboard.clear();
    }

    // ---- Loading ----

    /// Replace the whole plan. Clears the selection.
    pub fn load_collection(&mut self, collection: Collection) {
        self.collection = collection;
        self.selection.clear();
        self.recompute_order();
        info!(
            "Loaded plan with {} top-level entries ({} items)",
            self.collection.top_level_count(),
            self.collection.item_count()
        );
    }

    /// Replace the plan, asking first when the current one is not empty.
    pub fn replace_plan(&mut self, collection: Collection, confirmer: &mut dyn Confirmer) -> PlanResult<()> {
        if !self.collection.is_empty() && !confirmer.confirm(&ConfirmRequest::ReplacePlan) {
            return Err(PlanError::Cancelled);
        }
        self.load_collection(collection);
        Ok(())
    }

    /// Replace the plan with the built-in default session.
    pub fn load_default_training(&mut self, confirmer: &mut dyn Confirmer) -> PlanResult<()> {
        self.replace_plan(super::library::default_training(), confirmer)
    }

    fn validate_repetitions(&self, repetitions: u32) -> Result<(), ValidationError> {
        let range = self.settings.repetition_range();
        if range.contains(&repetitions) {
            Ok(())
        } else {
            Err(ValidationError::RepetitionsOutOfRange {
                value: repetitions,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }

    pub(super) fn location(&self, id: Uuid) -> Option<Location> {
        self.collection.locate(id)
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}
