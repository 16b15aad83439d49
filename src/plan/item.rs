//! Training items: parts, series and groups, plus the collection that owns them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::pace::ThresholdPace;

use super::phase::{whole_seconds, Phase};
use super::types::{DesignMode, PhaseKind};

/// A single effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartRecord", into = "PartRecord")]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub phase: Phase,
    /// Position among top-level items; `None` while nested in a group
    pub general_order: Option<u32>,
    /// Position inside the parent group; `None` at top level
    pub inner_order: Option<u32>,
    /// Canonical display slot over all items, written by the ordering pass
    pub display_position: Option<u32>,
}

impl Part {
    pub fn new(name: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phase,
            general_order: None,
            inner_order: None,
            display_position: None,
        }
    }
}

/// Flat wire shape of a part: the phase fields sit next to the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartRecord {
    id: Uuid,
    #[serde(rename = "nombre", alias = "name")]
    name: String,
    #[serde(rename = "indice", alias = "intensity")]
    intensity: f64,
    #[serde(rename = "isRPE", default)]
    is_rpe: bool,
    #[serde(
        rename = "duracion",
        alias = "durationSeconds",
        deserialize_with = "whole_seconds",
        default
    )]
    duration_seconds: u32,
    #[serde(default)]
    original_value: Option<f64>,
    #[serde(default)]
    designed_in: DesignMode,
    #[serde(default)]
    general_order: Option<u32>,
    #[serde(default)]
    inner_order: Option<u32>,
    #[serde(rename = "order", default, skip_serializing_if = "Option::is_none")]
    display_position: Option<u32>,
}

impl From<PartRecord> for Part {
    fn from(r: PartRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            phase: Phase {
                intensity: r.intensity,
                is_rpe: r.is_rpe,
                duration_seconds: r.duration_seconds,
                original_value: r.original_value,
                designed_in: r.designed_in,
            },
            general_order: r.general_order,
            inner_order: r.inner_order,
            display_position: r.display_position,
        }
    }
}

impl From<Part> for PartRecord {
    fn from(p: Part) -> Self {
        Self {
            id: p.id,
            name: p.name,
            intensity: p.phase.intensity,
            is_rpe: p.phase.is_rpe,
            duration_seconds: p.phase.duration_seconds,
            original_value: p.phase.original_value,
            designed_in: p.phase.designed_in,
            general_order: p.general_order,
            inner_order: p.inner_order,
            display_position: p.display_position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum SeriesTag {
    #[default]
    #[serde(rename = "series")]
    Series,
}

/// Repeated work/rest cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: Uuid,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "workConfig", alias = "workPhase")]
    pub work: Phase,
    #[serde(rename = "restConfig", alias = "restPhase")]
    pub rest: Phase,
    pub repetitions: u32,
    #[serde(rename = "type", default)]
    tag: SeriesTag,
    #[serde(default)]
    pub general_order: Option<u32>,
    #[serde(default)]
    pub inner_order: Option<u32>,
    #[serde(rename = "order", default, skip_serializing_if = "Option::is_none")]
    pub display_position: Option<u32>,
}

impl Series {
    pub fn new(name: impl Into<String>, work: Phase, rest: Phase, repetitions: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            work,
            rest,
            repetitions,
            tag: SeriesTag::Series,
            general_order: None,
            inner_order: None,
            display_position: None,
        }
    }

    pub fn phase(&self, kind: PhaseKind) -> &Phase {
        match kind {
            PhaseKind::Work => &self.work,
            PhaseKind::Rest => &self.rest,
        }
    }

    /// `repetitions * (work + rest)` at `threshold`.
    pub fn total_duration(&self, threshold: ThresholdPace) -> u64 {
        self.repetitions as u64
            * (self.work.effective_duration(threshold) as u64 + self.rest.effective_duration(threshold) as u64)
    }

    pub fn approx_distance(&self, threshold: ThresholdPace) -> f64 {
        (self.work.approx_distance(threshold) + self.rest.approx_distance(threshold)) * self.repetitions as f64
    }

    /// Alternating work/rest entries for the graph. Never stored.
    pub fn expand(&self) -> Vec<ExpandedPhase> {
        (1..=self.repetitions)
            .flat_map(|repetition| {
                [PhaseKind::Work, PhaseKind::Rest].into_iter().map(move |kind| ExpandedPhase {
                    parent_id: self.id,
                    kind,
                    repetition,
                    phase: *self.phase(kind),
                })
            })
            .collect()
    }
}

/// One phase of an expanded series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedPhase {
    pub parent_id: Uuid,
    pub kind: PhaseKind,
    /// 1-based
    pub repetition: u32,
    pub phase: Phase,
}

/// Anything that can sit at top level or inside a group.
///
/// Series is listed first so untagged decoding tries the richer shape
/// before falling back to a flat part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanItem {
    Series(Series),
    Part(Part),
}

impl PlanItem {
    pub fn id(&self) -> Uuid {
        match self {
            PlanItem::Part(p) => p.id,
            PlanItem::Series(s) => s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PlanItem::Part(p) => &p.name,
            PlanItem::Series(s) => &s.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            PlanItem::Part(p) => p.name = name,
            PlanItem::Series(s) => s.name = name,
        }
    }

    pub fn general_order(&self) -> Option<u32> {
        match self {
            PlanItem::Part(p) => p.general_order,
            PlanItem::Series(s) => s.general_order,
        }
    }

    pub fn set_general_order(&mut self, order: Option<u32>) {
        match self {
            PlanItem::Part(p) => p.general_order = order,
            PlanItem::Series(s) => s.general_order = order,
        }
    }

    pub fn inner_order(&self) -> Option<u32> {
        match self {
            PlanItem::Part(p) => p.inner_order,
            PlanItem::Series(s) => s.inner_order,
        }
    }

    pub fn set_inner_order(&mut self, order: Option<u32>) {
        match self {
            PlanItem::Part(p) => p.inner_order = order,
            PlanItem::Series(s) => s.inner_order = order,
        }
    }

    pub fn display_position(&self) -> Option<u32> {
        match self {
            PlanItem::Part(p) => p.display_position,
            PlanItem::Series(s) => s.display_position,
        }
    }

    pub fn set_display_position(&mut self, position: Option<u32>) {
        match self {
            PlanItem::Part(p) => p.display_position = position,
            PlanItem::Series(s) => s.display_position = position,
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self, PlanItem::Series(_))
    }

    pub fn total_duration(&self, threshold: ThresholdPace) -> u64 {
        match self {
            PlanItem::Part(p) => p.phase.effective_duration(threshold) as u64,
            PlanItem::Series(s) => s.total_duration(threshold),
        }
    }

    pub fn approx_distance(&self, threshold: ThresholdPace) -> f64 {
        match self {
            PlanItem::Part(p) => p.phase.approx_distance(threshold),
            PlanItem::Series(s) => s.approx_distance(threshold),
        }
    }

    /// Mutable access to every phase of the item.
    pub fn phases_mut(&mut self) -> Vec<&mut Phase> {
        match self {
            PlanItem::Part(p) => vec![&mut p.phase],
            PlanItem::Series(s) => vec![&mut s.work, &mut s.rest],
        }
    }

    /// Copy with a fresh id and cleared order fields.
    pub fn detached_copy(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            PlanItem::Part(p) => p.id = Uuid::new_v4(),
            PlanItem::Series(s) => s.id = Uuid::new_v4(),
        }
        copy.set_general_order(None);
        copy.set_inner_order(None);
        copy.set_display_position(None);
        copy
    }
}

impl From<Part> for PlanItem {
    fn from(part: Part) -> Self {
        PlanItem::Part(part)
    }
}

impl From<Series> for PlanItem {
    fn from(series: Series) -> Self {
        PlanItem::Series(series)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum GroupTag {
    #[default]
    #[serde(rename = "group")]
    Group,
}

/// Ordered collection of parts and series. Groups never nest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(rename = "parts", alias = "members", default)]
    pub members: Vec<PlanItem>,
    #[serde(rename = "type", default)]
    tag: GroupTag,
    #[serde(default)]
    pub general_order: Option<u32>,
    #[serde(rename = "order", default, skip_serializing_if = "Option::is_none")]
    pub display_position: Option<u32>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<PlanItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
            tag: GroupTag::Group,
            general_order: None,
            display_position: None,
        }
    }

    pub fn member_index(&self, id: Uuid) -> Option<usize> {
        self.members.iter().position(|m| m.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.member_index(id).is_some()
    }

    pub fn total_duration(&self, threshold: ThresholdPace) -> u64 {
        self.members.iter().map(|m| m.total_duration(threshold)).sum()
    }

    /// Deep copy: the group and every member get fresh ids.
    pub fn detached_copy(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            members: self.members.iter().map(PlanItem::detached_copy).collect(),
            tag: GroupTag::Group,
            general_order: None,
            display_position: None,
        }
    }
}

/// Where an item lives inside the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Loose(usize),
    Member { group: usize, index: usize },
}

/// Resolved top-level entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevel {
    Item(usize),
    Group(usize),
}

/// The whole plan: loose items plus groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "partesEntreno", alias = "looseItems", default)]
    pub loose_items: Vec<PlanItem>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.loose_items.is_empty() && self.groups.is_empty()
    }

    /// Loose items plus groups; nested members are not counted.
    pub fn top_level_count(&self) -> usize {
        self.loose_items.len() + self.groups.len()
    }

    /// `generalOrder` for something appended at the end of the top level.
    pub fn next_general_order(&self) -> u32 {
        self.top_level_count() as u32 + 1
    }

    /// Every part and series, loose first, then group members.
    pub fn items(&self) -> impl Iterator<Item = &PlanItem> {
        self.loose_items
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.members.iter()))
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    pub fn locate(&self, id: Uuid) -> Option<Location> {
        if let Some(index) = self.loose_items.iter().position(|i| i.id() == id) {
            return Some(Location::Loose(index));
        }
        self.groups.iter().enumerate().find_map(|(group, g)| {
            g.member_index(id).map(|index| Location::Member { group, index })
        })
    }

    pub fn top_level(&self, id: Uuid) -> Option<TopLevel> {
        if let Some(index) = self.loose_items.iter().position(|i| i.id() == id) {
            return Some(TopLevel::Item(index));
        }
        self.group_index(id).map(TopLevel::Group)
    }

    pub fn group_index(&self, id: Uuid) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    pub fn find_item(&self, id: Uuid) -> Option<&PlanItem> {
        match self.locate(id)? {
            Location::Loose(index) => self.loose_items.get(index),
            Location::Member { group, index } => self.groups.get(group)?.members.get(index),
        }
    }

    pub fn find_item_mut(&mut self, id: Uuid) -> Option<&mut PlanItem> {
        match self.locate(id)? {
            Location::Loose(index) => self.loose_items.get_mut(index),
            Location::Member { group, index } => self.groups.get_mut(group)?.members.get_mut(index),
        }
    }

    pub fn find_group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_group_mut(&mut self, id: Uuid) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Group containing the member `id`, if any.
    pub fn parent_group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(id))
    }

    /// Remove an item from wherever it lives.
    pub fn take_item(&mut self, id: Uuid) -> Option<PlanItem> {
        match self.locate(id)? {
            Location::Loose(index) => Some(self.loose_items.remove(index)),
            Location::Member { group, index } => Some(self.groups[group].members.remove(index)),
        }
    }

    /// `generalOrder` of the top-level slot an item occupies: its own for a
    /// loose item, its group's for a member.
    pub fn container_general_order(&self, id: Uuid) -> Option<u32> {
        match self.locate(id)? {
            Location::Loose(index) => self.loose_items[index].general_order(),
            Location::Member { group, .. } => self.groups[group].general_order,
        }
    }

    /// Every phase in the collection.
    pub fn phases_mut(&mut self) -> impl Iterator<Item = &mut Phase> {
        self.loose_items
            .iter_mut()
            .chain(self.groups.iter_mut().flat_map(|g| g.members.iter_mut()))
            .flat_map(|item| item.phases_mut())
    }
}
