//! Paginate stage: page clamping and slicing modes.
//!
//! Three modes share one entry point:
//! - fully client-side (no external total): slice the sorted result;
//! - server-driven (external total): the caller already delivered exactly
//!   one page of rows, so nothing is sliced;
//! - block-driven: slice locally and report when the requested page
//!   extends past the rows actually supplied, so the engine can signal
//!   "page N needs data".

use tracing::debug;

/// Pagination inputs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Pagination on/off; off means the whole sorted set is displayed
    pub enabled: bool,
    /// Requested 1-based page
    pub page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Authoritative total from the caller (server-driven mode)
    pub external_total: Option<usize>,
    /// Block-driven client-side paging
    pub block_mode: bool,
}

/// One page of row indices plus the derived pagination summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Row indices for the current page, in display order
    pub indices: Vec<usize>,
    /// Total row count driving the pager
    pub total_count: usize,
    /// Total pages, at least 1
    pub total_pages: u32,
    /// Effective page after clamping to the valid range
    pub page: u32,
    /// 1-based ordinal of the first displayed row (0 when empty)
    pub start_row: usize,
    /// 1-based ordinal of the last displayed row (0 when empty)
    pub end_row: usize,
    /// Block mode only: the requested page extends past available rows
    pub deficient: bool,
}

/// Slice one page out of the sorted index vector.
///
/// `available_rows` is the raw input row count, which is what block mode
/// compares against (a filtered-out row was still delivered).
pub fn apply_pagination(
    sorted: Vec<usize>,
    req: &PageRequest,
    available_rows: usize,
) -> PageSlice {
    if !req.enabled {
        let total_count = req.external_total.unwrap_or(sorted.len());
        let end_row = sorted.len();
        return PageSlice {
            start_row: usize::from(end_row > 0),
            end_row,
            indices: sorted,
            total_count,
            total_pages: 1,
            page: 1,
            deficient: false,
        };
    }

    let size = usize::try_from(req.page_size.max(1)).unwrap_or(usize::MAX);
    let total_count = req.external_total.unwrap_or(sorted.len());
    let total_pages_count = total_count.div_ceil(size).max(1);
    let total_pages = u32::try_from(total_pages_count).unwrap_or(u32::MAX);
    let page = req.page.clamp(1, total_pages);
    if page != req.page {
        debug!(requested = req.page, clamped = page, "page out of range");
    }

    // Deficiency is judged against the page the user asked for, before
    // clamping: a block host may not have delivered those rows yet.
    let needed = usize::try_from(req.page.max(1)).unwrap_or(usize::MAX).saturating_mul(size);
    let deficient = req.block_mode && available_rows < needed;

    let slice_locally = req.external_total.is_none() || req.block_mode;
    let indices = if slice_locally {
        let start = usize::try_from(page - 1).unwrap_or(usize::MAX).saturating_mul(size);
        sorted.into_iter().skip(start).take(size).collect()
    } else {
        sorted
    };

    let (start_row, end_row) = if total_count == 0 {
        (0, 0)
    } else {
        let page_idx = usize::try_from(page - 1).unwrap_or(usize::MAX);
        let start = page_idx.saturating_mul(size) + 1;
        (start, (start + size - 1).min(total_count))
    };

    PageSlice {
        indices,
        total_count,
        total_pages,
        page,
        start_row,
        end_row,
        deficient,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn client(page: u32, size: u32) -> PageRequest {
        PageRequest {
            enabled: true,
            page,
            page_size: size,
            external_total: None,
            block_mode: false,
        }
    }

    #[test]
    fn disabled_passes_everything_through() {
        let mut req = client(3, 10);
        req.enabled = false;
        let out = apply_pagination(vec![2, 0, 1], &req, 3);
        assert_eq!(out.indices, vec![2, 0, 1]);
        assert_eq!(out.total_pages, 1);
        assert_eq!((out.start_row, out.end_row), (1, 3));
    }

    #[test]
    fn pages_reconstruct_the_full_set() {
        let sorted: Vec<usize> = (0..10).collect();
        let mut rebuilt = Vec::new();
        for page in 1..=4 {
            rebuilt.extend(apply_pagination(sorted.clone(), &client(page, 3), 10).indices);
        }
        assert_eq!(rebuilt, sorted);
    }

    #[test_case(0, 1; "page zero clamps up")]
    #[test_case(99, 4; "overshoot clamps to last")]
    #[test_case(2, 2; "valid page kept")]
    fn page_clamping(requested: u32, effective: u32) {
        let out = apply_pagination((0..10).collect(), &client(requested, 3), 10);
        assert_eq!(out.page, effective);
        assert_eq!(out.total_pages, 4);
    }

    #[test]
    fn summary_rows() {
        let out = apply_pagination((0..10).collect(), &client(4, 3), 10);
        assert_eq!((out.start_row, out.end_row), (10, 10));
        let empty = apply_pagination(Vec::new(), &client(1, 10), 0);
        assert_eq!((empty.start_row, empty.end_row), (0, 0));
    }

    #[test]
    fn server_mode_never_slices() {
        let req = PageRequest {
            enabled: true,
            page: 2,
            page_size: 10,
            external_total: Some(100),
            block_mode: false,
        };
        let out = apply_pagination((0..10).collect(), &req, 10);
        assert_eq!(out.indices.len(), 10);
        assert_eq!(out.total_count, 100);
        assert_eq!(out.total_pages, 10);
        assert_eq!((out.start_row, out.end_row), (11, 20));
    }

    #[test]
    fn block_mode_reports_deficiency() {
        let req = PageRequest {
            enabled: true,
            page: 3,
            page_size: 10,
            external_total: Some(100),
            block_mode: true,
        };
        // Only 20 rows delivered so far; page 3 needs 30.
        let out = apply_pagination((0..20).collect(), &req, 20);
        assert!(out.deficient);
        assert!(out.indices.is_empty());

        let caught_up = apply_pagination((0..30).collect(), &req, 30);
        assert!(!caught_up.deficient);
        assert_eq!(caught_up.indices, (20..30).collect::<Vec<_>>());
    }
}
