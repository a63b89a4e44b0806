//! Locally mutated page cache
//!
//! The list views mutate their fetched page in place after a per-item
//! action instead of refetching: an update swaps the record, a delete
//! removes exactly that id. From the first local mutation until the next
//! full refresh the page is marked dirty, because it can diverge from
//! server state (another tab's writes, pagination totals). The next
//! navigation-triggered fetch reconciles it.

/// Records that carry a backend id
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for crate::remote::records::TodoRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for crate::remote::records::TripRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The most recently fetched page of records, mutable in place
#[derive(Debug, Clone, Default)]
pub struct PageCache<T> {
    items: Vec<T>,
    dirty: bool,
}

impl<T: HasId> PageCache<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            dirty: false,
        }
    }

    /// Records in display order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether the page has local mutations not yet reconciled with the
    /// server
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Swap an updated record in place; ids not on this page are ignored
    pub fn apply_update(&mut self, updated: T) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id() == updated.id()) {
            *existing = updated;
            self.dirty = true;
        }
    }

    /// Remove exactly the record with the given id
    pub fn apply_remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() != before {
            self.dirty = true;
        }
    }

    /// Replace the page with a fresh fetch, clearing the dirty flag
    pub fn refresh(&mut self, items: Vec<T>) {
        self.items = items;
        self.dirty = false;
    }
}
