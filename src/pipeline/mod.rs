//! The filter -> sort -> paginate pipeline.
//!
//! Stage order is fixed: filtering before sorting (sorting excluded rows
//! is wasted work), pagination strictly last (paginating before
//! filtering would be wrong, not just slow). All stages work over index
//! vectors copied per stage; the input row slice is never reordered or
//! mutated.

pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::apply_filter;
pub use paginate::{apply_pagination, PageRequest, PageSlice};
pub use sort::apply_sort;

use crate::types::{ColumnSet, FilterModel, RowAccess, SortState};

/// Result of one pipeline run. Index vectors point into the input row
/// slice; `displayed` is the page actually shown (before any virtual
/// windowing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Rows surviving the filter stage, input order
    pub filtered: Vec<usize>,
    /// Filtered rows in sort order
    pub sorted: Vec<usize>,
    /// The displayed page of `sorted`
    pub displayed: Vec<usize>,
    /// Pagination summary for the pager UI
    pub page: PageSummary,
    /// Block mode: the requested page lacks data
    pub deficient: bool,
}

/// Derived pagination numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Total rows driving the pager
    pub total_count: usize,
    /// Total pages, at least 1
    pub total_pages: u32,
    /// Effective (clamped) page
    pub page: u32,
    /// 1-based first displayed row ordinal (0 when empty)
    pub start_row: usize,
    /// 1-based last displayed row ordinal (0 when empty)
    pub end_row: usize,
}

/// Run filter -> sort -> paginate over the rows.
pub fn compute<T: RowAccess>(
    rows: &[T],
    columns: &ColumnSet<T>,
    filter_model: &FilterModel,
    sort_state: &SortState,
    request: &PageRequest,
) -> PipelineOutput {
    let filtered = apply_filter(rows, columns, filter_model);
    let sorted = apply_sort(rows, filtered.clone(), columns, sort_state);
    let slice = apply_pagination(sorted.clone(), request, rows.len());
    PipelineOutput {
        filtered,
        sorted,
        displayed: slice.indices,
        page: PageSummary {
            total_count: slice.total_count,
            total_pages: slice.total_pages,
            page: slice.page,
            start_row: slice.start_row,
            end_row: slice.end_row,
        },
        deficient: slice.deficient,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ColumnDef, FilterKind, SortDirection, SortState};
    use serde_json::{json, Value};

    fn columns() -> ColumnSet<Value> {
        ColumnSet::new(vec![
            ColumnDef::new("name", "Name").filter(FilterKind::Text),
            ColumnDef::new("score", "Score").filter(FilterKind::Number),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Value> {
        (0..20)
            .map(|i| json!({ "name": format!("row-{i:02}"), "score": 19 - i }))
            .collect()
    }

    #[test]
    fn stages_compose_in_order() {
        let rows = rows();
        let request = PageRequest {
            enabled: true,
            page: 1,
            page_size: 5,
            external_total: None,
            block_mode: false,
        };
        let mut filter_model = FilterModel::new();
        filter_model.set("name", Some("row-1".into()));

        let out = compute(
            &rows,
            &columns(),
            &filter_model,
            &SortState::new("score", SortDirection::Asc),
            &request,
        );
        // Names row-10..row-19 survive, sorted by ascending score
        // (reverse of input), first page of 5.
        assert_eq!(out.filtered, (10..20).collect::<Vec<_>>());
        assert_eq!(out.sorted, (10..20).rev().collect::<Vec<_>>());
        assert_eq!(out.displayed, vec![19, 18, 17, 16, 15]);
        assert_eq!(out.page.total_count, 10);
        assert_eq!(out.page.total_pages, 2);
    }

    #[test]
    fn deterministic_and_input_untouched() {
        let rows = rows();
        let snapshot: Vec<String> = rows.iter().map(ToString::to_string).collect();
        let request = PageRequest {
            enabled: false,
            page: 1,
            page_size: 10,
            external_total: None,
            block_mode: false,
        };
        let sort = SortState::new("score", SortDirection::Desc);
        let a = compute(&rows, &columns(), &FilterModel::new(), &sort, &request);
        let b = compute(&rows, &columns(), &FilterModel::new(), &sort, &request);
        assert_eq!(a, b);
        let after: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(snapshot, after);
    }
}
