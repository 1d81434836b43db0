//! Pixel geometry: column width resolution and pinned-column offsets.

pub mod pinned;
pub mod widths;

pub use pinned::{pinned_offsets, PinnedOffsets};
pub use widths::{
    max_width_for, min_width_for, resolve_widths, ResizeSession, DEFAULT_FLEX_MIN,
    DEFAULT_MIN_WIDTH,
};
