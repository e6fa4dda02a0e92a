//! Identifiers currently checked for bulk actions.

use std::collections::BTreeSet;

use crate::FileId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: BTreeSet<FileId>,
    all_checked: bool,
}

impl Selection {
    /// Checks or unchecks `id`. `collection_len` is the size of the loaded
    /// collection and drives the "select all" indicator.
    pub fn toggle(&mut self, id: FileId, checked: bool, collection_len: usize) {
        if checked {
            self.checked.insert(id);
        } else {
            self.checked.remove(&id);
        }
        self.all_checked = collection_len > 0 && self.checked.len() >= collection_len;
    }

    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = FileId>,
    {
        self.checked = ids.into_iter().collect();
        self.all_checked = !self.checked.is_empty();
    }

    pub fn remove(&mut self, id: &FileId) {
        if self.checked.remove(id) {
            self.all_checked = false;
        }
    }

    pub fn clear(&mut self) {
        self.checked.clear();
        self.all_checked = false;
    }

    pub fn size(&self) -> usize {
        self.checked.len()
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.checked.contains(id)
    }

    pub fn is_all_checked(&self) -> bool {
        self.all_checked
    }

    /// The bulk-delete control is shown iff something is selected.
    pub fn bulk_delete_visible(&self) -> bool {
        self.size() > 0
    }

    pub fn ids(&self) -> Vec<FileId> {
        self.checked.iter().cloned().collect()
    }
}
