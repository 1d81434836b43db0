//! Row selection keyed by [`RowKey`].
//!
//! Selection is a set of keys, not of positions: rows keep their
//! selected state across filtering, sorting and paging, and every row
//! sharing a key toggles together.

use std::collections::HashSet;

use crate::state::cell::StateCell;
use crate::types::RowKey;

/// Aggregate state of the header select-all checkbox for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Every row on the page is selected
    All,
    /// Some but not all rows on the page are selected
    Indeterminate,
    /// No row on the page is selected (also: empty page)
    None,
}

/// The selection model. Holds its keys in a controlled-or-uncontrolled
/// [`StateCell`] so a host can own selection the same way it owns sort
/// or paging.
pub struct SelectionStore {
    cell: StateCell<Vec<RowKey>>,
}

impl SelectionStore {
    /// Internally owned selection, initially empty.
    pub fn internal() -> Self {
        Self {
            cell: StateCell::internal(Vec::new()),
        }
    }

    /// Externally owned selection mirroring the host's keys.
    pub fn controlled(keys: Vec<RowKey>) -> Self {
        Self {
            cell: StateCell::controlled(keys),
        }
    }

    /// Attach the selection-changed listener.
    pub fn with_listener(mut self, f: impl Fn(&Vec<RowKey>) + 'static) -> Self {
        self.cell = self.cell.with_listener(f);
        self
    }

    /// Currently selected keys, in selection order.
    pub fn selected(&self) -> &[RowKey] {
        self.cell.value()
    }

    /// Number of selected keys.
    pub fn count(&self) -> usize {
        self.cell.value().len()
    }

    /// True when the key is selected.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.cell.value().contains(key)
    }

    /// Toggle one key in or out of the selection.
    pub fn toggle(&mut self, key: &RowKey) {
        let mut next = self.cell.value().clone();
        if next.contains(key) {
            next.retain(|k| k != key);
        } else {
            next.push(key.clone());
        }
        self.cell.set(next);
    }

    /// Header checkbox click: when every page key is already selected,
    /// deselect the page; otherwise select the page's missing keys.
    /// Selection outside the page is never touched.
    pub fn toggle_all_on_page(&mut self, page_keys: &[RowKey]) {
        if page_keys.is_empty() {
            return;
        }
        let mut next = self.cell.value().clone();
        if self.header_state(page_keys) == SelectAllState::All {
            let page: HashSet<&RowKey> = page_keys.iter().collect();
            next.retain(|k| !page.contains(k));
        } else {
            for key in page_keys {
                if !next.contains(key) {
                    next.push(key.clone());
                }
            }
        }
        self.cell.set(next);
    }

    /// Replace the selection wholesale (duplicates collapse to one key).
    pub fn select_all(&mut self, keys: Vec<RowKey>) {
        let mut deduped: Vec<RowKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        self.cell.set(deduped);
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        if !self.cell.value().is_empty() {
            self.cell.set(Vec::new());
        }
    }

    /// Header checkbox state for the given page of keys.
    pub fn header_state(&self, page_keys: &[RowKey]) -> SelectAllState {
        if page_keys.is_empty() {
            return SelectAllState::None;
        }
        let selected: HashSet<&RowKey> = self.cell.value().iter().collect();
        let hits = page_keys.iter().filter(|k| selected.contains(k)).count();
        if hits == 0 {
            SelectAllState::None
        } else if hits == page_keys.len() {
            SelectAllState::All
        } else {
            SelectAllState::Indeterminate
        }
    }

    /// Positions within `row_keys` whose key is selected, in input
    /// order. Rows are re-matched against the key set each time, so
    /// selection follows rows across filtering and paging.
    pub fn matching_indices(&self, row_keys: &[RowKey]) -> Vec<usize> {
        let selected: HashSet<&RowKey> = self.cell.value().iter().collect();
        row_keys
            .iter()
            .enumerate()
            .filter(|(_, k)| selected.contains(k))
            .map(|(i, _)| i)
            .collect()
    }

    /// Host pushes the authoritative keys of a controlled selection.
    pub fn sync_external(&mut self, keys: Vec<RowKey>) {
        self.cell.sync_external(keys);
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::internal()
    }
}
