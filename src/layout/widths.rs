//! Column width resolution.
//!
//! Resolves one pixel width per column from fixed/flex/min/max
//! constraints and the available container width. Pure function of its
//! inputs: identical arguments always yield identical widths.

use std::collections::HashMap;
use tracing::trace;

use crate::types::{ColumnDef, WidthValue};

/// Fallback minimum width for fixed columns without a declared minimum.
pub const DEFAULT_MIN_WIDTH: f32 = 50.0;

/// Fallback minimum width for flex columns; also the intrinsic width a
/// flex column degrades to when no container width is known.
pub const DEFAULT_FLEX_MIN: f32 = 80.0;

/// Hard lower bound a column never shrinks below, resize or flex.
pub fn min_width_for<T>(col: &ColumnDef<T>) -> f32 {
    col.min_width
        .as_ref()
        .and_then(WidthValue::to_px)
        .unwrap_or(if col.flex > 0.0 {
            DEFAULT_FLEX_MIN
        } else {
            DEFAULT_MIN_WIDTH
        })
}

/// Declared upper bound, if any.
pub fn max_width_for<T>(col: &ColumnDef<T>) -> Option<f32> {
    col.max_width.as_ref().and_then(WidthValue::to_px)
}

fn clamp_width(w: f32, min: f32, max: Option<f32>) -> f32 {
    max.map_or(w, |m| w.min(m)).max(min)
}

enum Slot {
    Fixed(f32),
    Pending,
}

/// Resolve final pixel widths, one per column, in input order.
///
/// `overrides` holds manual-resize widths by column id; an overridden
/// flex column is treated as fixed and leaves the flex pool.
/// `reserved_leading`/`reserved_trailing` are pixels claimed by the
/// selection and actions columns.
///
/// When no column is flex, the container width is unknown, the flex pool
/// is empty, or nothing remains after fixed columns, every pending flex
/// column falls back to [`DEFAULT_FLEX_MIN`] (intrinsic sizing).
/// Leftover pixels from per-column clamping are not re-balanced into the
/// pool; the resulting drift is accepted.
pub fn resolve_widths<T>(
    columns: &[&ColumnDef<T>],
    container_width: f32,
    overrides: &HashMap<String, f32>,
    reserved_leading: f32,
    reserved_trailing: f32,
) -> Vec<f32> {
    let mut slots = Vec::with_capacity(columns.len());
    let mut fixed_sum = 0.0_f32;

    for col in columns {
        let min_px = min_width_for(col);
        let max_px = max_width_for(col);
        let override_w = overrides.get(&col.id).copied();

        if col.flex > 0.0 {
            if let Some(w) = override_w {
                let w = clamp_width(w, min_px, max_px);
                slots.push(Slot::Fixed(w));
                fixed_sum += w;
            } else {
                slots.push(Slot::Pending);
            }
        } else {
            let declared = col.width.as_ref().and_then(WidthValue::to_px);
            let w = clamp_width(override_w.or(declared).unwrap_or(min_px), min_px, max_px);
            slots.push(Slot::Fixed(w));
            fixed_sum += w;
        }
    }

    let flex_total: f32 = columns
        .iter()
        .zip(&slots)
        .filter(|(_, s)| matches!(s, Slot::Pending))
        .map(|(c, _)| c.flex)
        .sum();

    let remaining = container_width - fixed_sum - reserved_leading - reserved_trailing;

    if container_width <= 0.0 || flex_total <= 0.0 || remaining <= 0.0 {
        if flex_total > 0.0 {
            trace!(container_width, remaining, "flex layout degraded to intrinsic sizing");
        }
        return slots
            .iter()
            .map(|s| match s {
                Slot::Fixed(w) => *w,
                Slot::Pending => DEFAULT_FLEX_MIN,
            })
            .collect();
    }

    columns
        .iter()
        .zip(&slots)
        .map(|(col, slot)| match slot {
            Slot::Fixed(w) => *w,
            Slot::Pending => {
                let min_px = col
                    .min_width
                    .as_ref()
                    .and_then(WidthValue::to_px)
                    .unwrap_or(DEFAULT_FLEX_MIN);
                let raw = col.flex / flex_total * remaining;
                clamp_width(raw, min_px, max_width_for(col))
            }
        })
        .collect()
}

/// A manual column-resize in progress.
///
/// Owned by the host for the duration of the drag; it maps pointer
/// deltas to clamped widths and carries no global state, so dropping it
/// ends the interaction on every exit path.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    column_id: String,
    start_width: f32,
    min_width: f32,
    max_width: Option<f32>,
}

impl ResizeSession {
    /// Capture the column's bounds and its width at drag start.
    pub fn begin<T>(col: &ColumnDef<T>, start_width: f32) -> Self {
        Self {
            column_id: col.id.clone(),
            start_width,
            min_width: min_width_for(col),
            max_width: max_width_for(col),
        }
    }

    /// Column being resized.
    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    /// Width for the current pointer delta, clamped to the column bounds.
    pub fn width_at(&self, delta_px: f32) -> f32 {
        clamp_width(self.start_width + delta_px, self.min_width, self.max_width)
    }
}
