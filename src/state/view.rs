//! The view-state controller: one [`StateCell`] per concern.
//!
//! Sort, page, page size, filter model, column order and column
//! visibility each live in their own cell, so a host can control any
//! subset and leave the rest engine-owned.

use std::collections::HashMap;

use tracing::debug;

use crate::state::cell::StateCell;
use crate::types::{
    ColumnSet, FilterModel, FilterValue, SortDirection, SortState, DEFAULT_PAGE_SIZE_OPTIONS,
};

/// All per-view state. Cells are public so a host can replace one with
/// a controlled cell before the first frame; the ownership mode of each
/// cell is fixed from then on.
pub struct ViewState {
    /// Sort target and direction
    pub sort: StateCell<SortState>,
    /// 1-based current page
    pub page: StateCell<u32>,
    /// Rows per page
    pub page_size: StateCell<u32>,
    /// Active column filters
    pub filter: StateCell<FilterModel>,
    /// Column ids in display order (reconciled against the column set)
    pub order: StateCell<Vec<String>>,
    /// Column id -> shown (reconciled against the column set)
    pub visibility: StateCell<HashMap<String, bool>>,
    /// Page sizes the host offers; `set_page_size` rejects others
    pub page_size_options: Vec<u32>,
}

impl ViewState {
    /// Engine-owned state with the stock page-size options.
    pub fn new() -> Self {
        Self {
            sort: StateCell::internal(SortState::default()),
            page: StateCell::internal(1),
            page_size: StateCell::internal(DEFAULT_PAGE_SIZE_OPTIONS[0]),
            filter: StateCell::internal(FilterModel::new()),
            order: StateCell::internal(Vec::new()),
            visibility: StateCell::internal(HashMap::new()),
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    /// Header click on a column: cycle Asc -> Desc -> None on the
    /// current sort column, start a new column at Asc.
    pub fn sort_click(&mut self, column_id: &str) {
        let current = self.sort.value();
        let next = if current.column_id == column_id {
            match current.direction.next() {
                SortDirection::None => SortState::default(),
                dir => SortState::new(column_id, dir),
            }
        } else {
            SortState::new(column_id, SortDirection::Asc)
        };
        self.sort.set(next);
    }

    /// Navigate to a page (floored at 1; the pipeline clamps the top end
    /// against the current total).
    pub fn set_page(&mut self, page: u32) {
        self.page.set(page.max(1));
    }

    /// Change the page size. Sizes outside `page_size_options` are
    /// rejected; an accepted change snaps back to page 1.
    pub fn set_page_size(&mut self, size: u32) {
        if !self.page_size_options.contains(&size) {
            return;
        }
        self.page_size.set(size);
        self.page.set(1);
    }

    /// Set or clear one column's filter.
    pub fn set_filter(&mut self, column_id: &str, value: Option<FilterValue>) {
        let mut model = self.filter.value().clone();
        model.set(column_id, value);
        self.filter.set(model);
    }

    /// Remove every active filter.
    pub fn clear_filters(&mut self) {
        if !self.filter.value().is_empty() {
            self.filter.set(FilterModel::new());
        }
    }

    /// Flip one column's visibility. Ids the column set does not know
    /// are ignored (reconciliation keeps the map aligned).
    pub fn toggle_visibility(&mut self, column_id: &str) {
        let mut map = self.visibility.value().clone();
        if let Some(shown) = map.get_mut(column_id) {
            *shown = !*shown;
            self.visibility.set(map);
        }
    }

    /// Drag-and-drop reorder: remove the dragged id, then re-insert it
    /// at the drop target's position. Unknown ids are ignored.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) {
        if dragged_id == target_id {
            return;
        }
        let mut order = self.order.value().clone();
        if !order.iter().any(|id| id == dragged_id) {
            return;
        }
        order.retain(|id| id != dragged_id);
        let Some(pos) = order.iter().position(|id| id == target_id) else {
            return;
        };
        order.insert(pos, dragged_id.to_string());
        self.order.set(order);
    }

    /// Align order and visibility with the current column set: drop ids
    /// that no longer exist, append new columns (in definition order)
    /// and seed their visibility from the definition. Silent: listeners
    /// never fire and controlled cells keep their host mirror.
    pub fn reconcile<T>(&mut self, columns: &ColumnSet<T>) {
        let mut order: Vec<String> = self
            .order
            .value()
            .iter()
            .filter(|id| columns.contains(id))
            .cloned()
            .collect();
        let dropped = self.order.value().len() - order.len();
        if dropped > 0 {
            debug!(dropped, "column order dropped ids no longer defined");
        }
        for id in columns.ids() {
            if !order.iter().any(|o| o == id) {
                order.push(id.to_string());
            }
        }
        if &order != self.order.value() {
            self.order.replace_internal(order);
        }

        let current = self.visibility.value();
        let mut visibility = HashMap::with_capacity(columns.len());
        for col in columns.iter() {
            let shown = current.get(&col.id).copied().unwrap_or(!col.hide);
            visibility.insert(col.id.clone(), shown);
        }
        if &visibility != self.visibility.value() {
            self.visibility.replace_internal(visibility);
        }
    }

    /// True when the named column is currently shown.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.visibility.value().get(column_id).copied().unwrap_or(true)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::ColumnDef;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns(ids: &[&str]) -> ColumnSet<Value> {
        ColumnSet::new(
            ids.iter()
                .map(|id| ColumnDef::new(*id, id.to_uppercase()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn sort_click_cycles_and_switches() {
        let mut view = ViewState::new();
        view.sort_click("a");
        assert_eq!(*view.sort.value(), SortState::new("a", SortDirection::Asc));
        view.sort_click("a");
        assert_eq!(*view.sort.value(), SortState::new("a", SortDirection::Desc));
        view.sort_click("a");
        assert!(view.sort.value().is_unsorted());

        view.sort_click("a");
        view.sort_click("b");
        // Switching columns restarts at ascending.
        assert_eq!(*view.sort.value(), SortState::new("b", SortDirection::Asc));
    }

    #[test]
    fn page_size_membership_and_reset() {
        let mut view = ViewState::new();
        view.set_page(5);
        view.set_page_size(7);
        // 7 is not offered: nothing moves.
        assert_eq!(*view.page_size.value(), 10);
        assert_eq!(*view.page.value(), 5);

        view.set_page_size(25);
        assert_eq!(*view.page_size.value(), 25);
        assert_eq!(*view.page.value(), 1);
    }

    #[test]
    fn reorder_splices_before_target() {
        let mut view = ViewState::new();
        view.reconcile(&columns(&["a", "b", "c", "d"]));
        view.reorder("d", "b");
        assert_eq!(*view.order.value(), vec!["a", "d", "b", "c"]);
        view.reorder("a", "c");
        assert_eq!(*view.order.value(), vec!["d", "b", "a", "c"]);
        view.reorder("ghost", "a");
        assert_eq!(*view.order.value(), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn reconcile_drops_and_appends() {
        let mut view = ViewState::new();
        view.order = StateCell::internal(vec!["a".into(), "b".into(), "c".into()]);
        view.reconcile(&columns(&["a", "c", "d"]));
        assert_eq!(*view.order.value(), vec!["a", "c", "d"]);
        assert!(view.is_visible("d"));
        assert!(!view.visibility.value().contains_key("b"));
    }

    #[test]
    fn reconcile_is_silent() {
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);
        let mut view = ViewState::new();
        view.order =
            StateCell::internal(Vec::new()).with_listener(move |_| *sink.borrow_mut() += 1);
        view.reconcile(&columns(&["a", "b"]));
        view.reconcile(&columns(&["a", "b"]));
        assert_eq!(*view.order.value(), vec!["a", "b"]);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn reconcile_keeps_controlled_order() {
        let mut view = ViewState::new();
        view.order = StateCell::controlled(vec!["b".into(), "a".into()]);
        view.reconcile(&columns(&["a", "b"]));
        // The host owns order; reconciliation must not rewrite it.
        assert_eq!(*view.order.value(), vec!["b", "a"]);
    }

    #[test]
    fn visibility_toggle() {
        let mut view = ViewState::new();
        view.reconcile(&columns(&["a", "b"]));
        view.toggle_visibility("a");
        assert!(!view.is_visible("a"));
        view.toggle_visibility("a");
        assert!(view.is_visible("a"));
        // Unknown id is a no-op.
        view.toggle_visibility("ghost");
    }

    #[test]
    fn hidden_columns_seed_invisible() {
        let cols: ColumnSet<Value> =
            ColumnSet::new(vec![ColumnDef::new("a", "A"), ColumnDef::new("b", "B").hidden()])
                .unwrap();
        let mut view = ViewState::new();
        view.reconcile(&cols);
        assert!(view.is_visible("a"));
        assert!(!view.is_visible("b"));
    }
}
