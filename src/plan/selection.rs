//! Selection set and clipboard for bulk operations.

use uuid::Uuid;

use super::item::PlanItem;

/// Selected item and group ids, kept in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`. Returns `false` if it was already selected.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns `false` if it was not selected.
    pub fn deselect(&mut self, id: Uuid) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    /// Flip membership and return the new state.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Detached copies waiting to be pasted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    items: Vec<PlanItem>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a detached copy of `item`.
    pub fn push(&mut self, item: &PlanItem) {
        self.items.push(item.detached_copy());
    }

    /// Fresh copies of every entry; each call mints new ids.
    pub fn paste(&self) -> Vec<PlanItem> {
        self.items.iter().map(PlanItem::detached_copy).collect()
    }

    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
