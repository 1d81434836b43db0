//! Sticky offsets for pinned columns.
//!
//! Computes the cumulative `left`/`right` pixel offsets that keep pinned
//! columns in place during horizontal scroll. Expects columns already in
//! display order, grouped left-pinned | unpinned | right-pinned (the
//! display-order computation owns that grouping).

use crate::types::{ColumnDef, PinSide};

/// Sticky offsets aligned to display order; `None` for unpinned columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedOffsets {
    /// Offset from the left edge for left-pinned columns
    pub left: Vec<Option<f32>>,
    /// Offset from the right edge for right-pinned columns
    pub right: Vec<Option<f32>>,
}

/// Accumulate sticky offsets over resolved widths.
///
/// Left offsets grow left-to-right seeded with `reserved_leading` (the
/// selection column, when present); right offsets grow right-to-left
/// seeded with `reserved_trailing` (the actions column).
pub fn pinned_offsets<T>(
    columns: &[&ColumnDef<T>],
    widths: &[f32],
    reserved_leading: f32,
    reserved_trailing: f32,
) -> PinnedOffsets {
    let mut left = Vec::with_capacity(columns.len());
    let mut acc = reserved_leading;
    for (col, w) in columns.iter().zip(widths) {
        if col.pinned == PinSide::Left {
            left.push(Some(acc));
            acc += w;
        } else {
            left.push(None);
        }
    }

    let mut right = Vec::with_capacity(columns.len());
    let mut acc = reserved_trailing;
    for (col, w) in columns.iter().zip(widths).rev() {
        if col.pinned == PinSide::Right {
            right.push(Some(acc));
            acc += w;
        } else {
            right.push(None);
        }
    }
    right.reverse();

    PinnedOffsets { left, right }
}
