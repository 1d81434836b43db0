//! Sort stage: comparator resolution and stable ordering.
//!
//! Applies only when a direction is set and the target column exists, is
//! sortable, and does not suppress sorting. Default comparison is
//! numeric when both extracted values are numbers, otherwise
//! case-insensitive string comparison with a case-sensitive tiebreak.

use std::cmp::Ordering;

use crate::types::{CellValue, ColumnDef, ColumnSet, RowAccess, SortDirection, SortState};

/// Reorder `indices` by the sort state. Stable: rows comparing equal
/// keep their relative input order. The input row slice is never
/// mutated.
///
/// Without a custom comparator, strings compare case-insensitively
/// with a case-sensitive tiebreak. This is not locale collation;
/// columns that need locale-aware ordering should supply a
/// comparator.
pub fn apply_sort<T: RowAccess>(
    rows: &[T],
    mut indices: Vec<usize>,
    columns: &ColumnSet<T>,
    sort: &SortState,
) -> Vec<usize> {
    if sort.is_unsorted() {
        return indices;
    }
    let Some(col) = columns.get(&sort.column_id) else {
        return indices;
    };
    if !col.sortable || col.suppress_sort {
        return indices;
    }

    indices.sort_by(|&a, &b| {
        let (Some(row_a), Some(row_b)) = (rows.get(a), rows.get(b)) else {
            return Ordering::Equal;
        };
        let cmp = compare(col, row_a, row_b);
        if sort.direction == SortDirection::Desc {
            cmp.reverse()
        } else {
            cmp
        }
    });
    indices
}

fn compare<T: RowAccess>(col: &ColumnDef<T>, row_a: &T, row_b: &T) -> Ordering {
    let va = col.value_of(row_a);
    let vb = col.value_of(row_b);
    if let Some(cmp) = &col.comparator {
        return cmp(&va, &vb, row_a, row_b);
    }
    if let (CellValue::Number(a), CellValue::Number(b)) = (&va, &vb) {
        return a.partial_cmp(b).unwrap_or(Ordering::Equal);
    }
    let sa = va.to_display();
    let sb = vb.to_display();
    sa.to_lowercase()
        .cmp(&sb.to_lowercase())
        .then_with(|| sa.cmp(&sb))
}
