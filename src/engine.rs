//! The table engine facade.
//!
//! Owns the column set, the view state, the selection model and the
//! measurement inputs a host reports (container width, viewport height,
//! scroll position). `frame` turns the current rows into everything a
//! renderer needs: display columns with pixel geometry, the visible row
//! slice, and the derived flags around it.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::layout::{pinned_offsets, resolve_widths, PinnedOffsets, ResizeSession};
use crate::pipeline::{self, PageRequest, PageSummary};
use crate::state::{SelectAllState, SelectionStore, ViewState};
use crate::types::{CellValue, ColumnDef, ColumnSet, FilterValue, PinSide, RowAccess, RowKey};
use crate::window::{compute_window, VirtualWindow, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};

/// Width reserved for the selection-checkbox column when enabled.
pub const SELECTION_COLUMN_WIDTH: f32 = 44.0;

/// Default width reserved for the trailing actions column.
pub const DEFAULT_ACTIONS_WIDTH: f32 = 80.0;

/// Cell formatter collaborator. The engine carries it opaquely; hosts
/// that localize or decorate cell text plug one in, everything else
/// falls back to [`CellValue::to_display`].
pub type CellFormatter<T> = Box<dyn Fn(&T, &ColumnDef<T>, &CellValue) -> String>;

/// Behavior switches fixed per table instance.
pub struct TableOptions {
    /// Reserve the 44px selection column and track a selection
    pub selectable: bool,
    /// Reserved width of the trailing actions column, absent when the
    /// table has no actions column
    pub actions_width: Option<f32>,
    /// Paginate the sorted result
    pub paginate: bool,
    /// Block-driven paging: slice locally, signal when a page lacks data
    pub block_mode: bool,
    /// Virtualize the displayed rows
    pub virtualize: bool,
    /// Fixed row height used by virtualization
    pub row_height: f32,
    /// Rows rendered beyond each viewport edge
    pub overscan: usize,
    /// Column whose cell value keys each row (fallback after the key
    /// extractor, before the positional index)
    pub key_column: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            selectable: false,
            actions_width: None,
            paginate: false,
            block_mode: false,
            virtualize: false,
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            key_column: None,
        }
    }
}

impl TableOptions {
    /// Enable selection.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Reserve the default-width actions column.
    pub fn with_actions(mut self) -> Self {
        self.actions_width = Some(DEFAULT_ACTIONS_WIDTH);
        self
    }

    /// Enable pagination.
    pub fn paginated(mut self) -> Self {
        self.paginate = true;
        self
    }

    /// Enable block-driven paging (implies pagination).
    pub fn block_driven(mut self) -> Self {
        self.paginate = true;
        self.block_mode = true;
        self
    }

    /// Enable row virtualization.
    pub fn virtualized(mut self) -> Self {
        self.virtualize = true;
        self
    }

    /// Key rows by the named column's cell value.
    pub fn key_column(mut self, id: impl Into<String>) -> Self {
        self.key_column = Some(id.into());
        self
    }
}

/// Everything a renderer needs for one paint, derived from the current
/// rows and state. Columns are referenced by id in display order; the
/// geometry vectors align with `column_ids`.
pub struct TableFrame {
    /// Column ids in display order
    pub column_ids: Vec<String>,
    /// Resolved pixel width per display column
    pub widths: Vec<f32>,
    /// Sticky offsets per display column
    pub offsets: PinnedOffsets,
    /// Input-row indices of the displayed page, in display order
    pub displayed: Vec<usize>,
    /// Row key per displayed row
    pub row_keys: Vec<RowKey>,
    /// Render window into `displayed`
    pub window: VirtualWindow,
    /// Pagination summary
    pub page: PageSummary,
    /// Header select-all checkbox state for this page
    pub header_selection: SelectAllState,
    /// Number of active filters
    pub active_filter_count: usize,
}

/// Headless table engine over rows of `T`.
pub struct TableEngine<T> {
    columns: ColumnSet<T>,
    /// View state; replace individual cells with controlled ones before
    /// the first frame
    pub view: ViewState,
    /// Selection model
    pub selection: SelectionStore,
    options: TableOptions,
    key_extractor: Option<Box<dyn Fn(&T) -> RowKey>>,
    formatter: Option<CellFormatter<T>>,
    override_widths: HashMap<String, f32>,
    container_width: f32,
    viewport_height: f32,
    scroll_top: f32,
    external_total: Option<usize>,
    on_block_needed: Option<Box<dyn Fn(u32)>>,
    last_block_page: Option<u32>,
}

impl<T: RowAccess> TableEngine<T> {
    /// Build an engine over the given columns.
    ///
    /// # Errors
    /// [`crate::TableError::DuplicateColumnId`] when two columns share
    /// an id.
    pub fn new(columns: Vec<ColumnDef<T>>, options: TableOptions) -> Result<Self> {
        let columns = ColumnSet::new(columns)?;
        let mut view = ViewState::new();
        view.reconcile(&columns);
        Ok(Self {
            columns,
            view,
            selection: SelectionStore::internal(),
            options,
            key_extractor: None,
            formatter: None,
            override_widths: HashMap::new(),
            container_width: 0.0,
            viewport_height: 0.0,
            scroll_top: 0.0,
            external_total: None,
            on_block_needed: None,
            last_block_page: None,
        })
    }

    /// Derive row keys with a custom extractor.
    pub fn with_key_extractor(mut self, f: impl Fn(&T) -> RowKey + 'static) -> Self {
        self.key_extractor = Some(Box::new(f));
        self
    }

    /// Plug in the cell formatter collaborator.
    pub fn with_formatter(
        mut self,
        f: impl Fn(&T, &ColumnDef<T>, &CellValue) -> String + 'static,
    ) -> Self {
        self.formatter = Some(Box::new(f));
        self
    }

    /// Register the "page N needs data" signal for block-driven paging.
    pub fn on_block_needed(mut self, f: impl Fn(u32) + 'static) -> Self {
        self.on_block_needed = Some(Box::new(f));
        self
    }

    /// Current column set.
    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    /// Replace the column set; order and visibility reconcile silently.
    ///
    /// # Errors
    /// [`crate::TableError::DuplicateColumnId`] when two columns share
    /// an id.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) -> Result<()> {
        self.columns = ColumnSet::new(columns)?;
        self.view.reconcile(&self.columns);
        self.override_widths
            .retain(|id, _| self.columns.contains(id));
        Ok(())
    }

    /// Host reports the container width in pixels.
    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }

    /// Host reports the scroll viewport height in pixels.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Host reports the vertical scroll position in pixels.
    pub fn set_scroll_top(&mut self, top: f32) {
        self.scroll_top = top;
    }

    /// Authoritative total row count for server/block-driven paging.
    pub fn set_external_total(&mut self, total: Option<usize>) {
        self.external_total = total;
    }

    /// Key for one row: extractor, else key column, else position.
    pub fn row_key(&self, row: &T, index: usize) -> RowKey {
        if let Some(extract) = &self.key_extractor {
            return extract(row);
        }
        if let Some(col) = self
            .options
            .key_column
            .as_deref()
            .and_then(|id| self.columns.get(id))
        {
            let value = col.value_of(row);
            if !value.is_null() {
                return RowKey::from(&value);
            }
        }
        RowKey::positional(index)
    }

    /// Display string for one cell, through the formatter when present.
    pub fn format_cell(&self, row: &T, column_id: &str) -> String {
        let Some(col) = self.columns.get(column_id) else {
            return String::new();
        };
        let value = col.value_of(row);
        match &self.formatter {
            Some(f) => f(row, col, &value),
            None => value.to_display(),
        }
    }

    /// Columns in display order: the order cell filtered to existing
    /// ids, visibility applied, visible columns the order does not
    /// mention appended in definition order, then regrouped
    /// left-pinned | unpinned | right-pinned (stable within each
    /// group). The append step matters when a host owns the order cell
    /// and supplies a partial order; reconciliation never rewrites a
    /// controlled cell.
    pub fn display_columns(&self) -> Vec<&ColumnDef<T>> {
        let order = self.view.order.value();
        let mut visible: Vec<&ColumnDef<T>> = order
            .iter()
            .filter(|id| self.view.is_visible(id))
            .filter_map(|id| self.columns.get(id))
            .collect();
        for col in self.columns.iter() {
            if self.view.is_visible(&col.id) && !order.iter().any(|id| id == &col.id) {
                visible.push(col);
            }
        }

        let mut grouped = Vec::with_capacity(visible.len());
        for side in [PinSide::Left, PinSide::None, PinSide::Right] {
            grouped.extend(visible.iter().copied().filter(|c| c.pinned == side));
        }
        grouped
    }

    /// Compute one frame from the current rows.
    ///
    /// In block mode a deficient page fires the block-needed signal, at
    /// most once per transition; the latch clears when the delivered
    /// rows catch up with the requested page.
    pub fn frame(&mut self, rows: &[T]) -> TableFrame {
        self.view.reconcile(&self.columns);

        let display = self.display_columns();
        let reserved_leading = if self.options.selectable {
            SELECTION_COLUMN_WIDTH
        } else {
            0.0
        };
        let reserved_trailing = self.options.actions_width.unwrap_or(0.0);
        let widths = resolve_widths(
            &display,
            self.container_width,
            &self.override_widths,
            reserved_leading,
            reserved_trailing,
        );
        let offsets = pinned_offsets(&display, &widths, reserved_leading, reserved_trailing);
        let column_ids = display.iter().map(|c| c.id.clone()).collect();

        let requested_page = *self.view.page.value();
        let request = PageRequest {
            enabled: self.options.paginate,
            page: requested_page,
            page_size: *self.view.page_size.value(),
            external_total: self.external_total,
            block_mode: self.options.block_mode,
        };
        let out = pipeline::compute(
            rows,
            &self.columns,
            self.view.filter.value(),
            self.view.sort.value(),
            &request,
        );

        if self.options.block_mode {
            if out.deficient {
                if self.last_block_page != Some(requested_page) {
                    debug!(page = requested_page, "block page needs data");
                    if let Some(signal) = &self.on_block_needed {
                        signal(requested_page);
                    }
                    self.last_block_page = Some(requested_page);
                }
            } else {
                self.last_block_page = None;
            }
        }

        let row_keys: Vec<RowKey> = out
            .displayed
            .iter()
            .filter_map(|&i| rows.get(i).map(|row| self.row_key(row, i)))
            .collect();
        let window = compute_window(
            self.options.virtualize,
            self.scroll_top,
            self.viewport_height,
            self.options.row_height,
            self.options.overscan,
            out.displayed.len(),
        );
        let header_selection = if self.options.selectable {
            self.selection.header_state(&row_keys)
        } else {
            SelectAllState::None
        };

        TableFrame {
            column_ids,
            widths,
            offsets,
            displayed: out.displayed,
            row_keys,
            window,
            page: out.page,
            header_selection,
            active_filter_count: self.view.filter.value().active_count(),
        }
    }

    /// Header click: cycle the sort on a column. Ignored for unknown,
    /// unsortable or sort-suppressed columns.
    pub fn sort_click(&mut self, column_id: &str) {
        let Some(col) = self.columns.get(column_id) else {
            return;
        };
        if !col.sortable || col.suppress_sort {
            return;
        }
        self.view.sort_click(column_id);
    }

    /// Navigate to a page.
    pub fn set_page(&mut self, page: u32) {
        self.view.set_page(page);
    }

    /// Change the page size (resets to page 1 when accepted).
    pub fn set_page_size(&mut self, size: u32) {
        self.view.set_page_size(size);
    }

    /// Set or clear one column's filter.
    pub fn set_filter(&mut self, column_id: &str, value: Option<FilterValue>) {
        self.view.set_filter(column_id, value);
    }

    /// Remove every active filter.
    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
    }

    /// Flip one column's visibility.
    pub fn toggle_visibility(&mut self, column_id: &str) {
        self.view.toggle_visibility(column_id);
    }

    /// Drag-and-drop column reorder.
    pub fn reorder_column(&mut self, dragged_id: &str, target_id: &str) {
        self.view.reorder(dragged_id, target_id);
    }

    /// Toggle one row's selection.
    pub fn toggle_row(&mut self, key: &RowKey) {
        self.selection.toggle(key);
    }

    /// Header checkbox click over the given page of row keys.
    pub fn toggle_page(&mut self, page_keys: &[RowKey]) {
        self.selection.toggle_all_on_page(page_keys);
    }

    /// Start a resize drag on a column. `None` for unknown or
    /// non-resizable columns.
    pub fn begin_resize(&self, column_id: &str) -> Option<ResizeSession> {
        let display = self.display_columns();
        let widths = resolve_widths(
            &display,
            self.container_width,
            &self.override_widths,
            if self.options.selectable {
                SELECTION_COLUMN_WIDTH
            } else {
                0.0
            },
            self.options.actions_width.unwrap_or(0.0),
        );
        let (pos, col) = display
            .iter()
            .enumerate()
            .find(|(_, c)| c.id == column_id)?;
        if !col.resizable {
            return None;
        }
        let start = widths.get(pos).copied()?;
        Some(ResizeSession::begin(col, start))
    }

    /// Commit a resize drag at the given pointer delta.
    pub fn apply_resize(&mut self, session: &ResizeSession, delta_px: f32) {
        self.override_widths
            .insert(session.column_id().to_string(), session.width_at(delta_px));
    }

    /// Drop every manual width override.
    pub fn reset_widths(&mut self) {
        self.override_widths.clear();
    }
}
