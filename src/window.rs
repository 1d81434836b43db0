//! Virtual scrolling window over the displayed rows.
//!
//! Fixed row height only. The window is a half-open index range into
//! the displayed page plus the pixel heights of the spacers that stand
//! in for the rows outside it.

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// Default number of extra rows rendered on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 5;

/// The rendered slice of the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    /// First rendered row index (inclusive)
    pub start: usize,
    /// One past the last rendered row index
    pub end: usize,
    /// Pixel height standing in for rows before `start`
    pub leading_spacer: f32,
    /// Pixel height standing in for rows from `end` on
    pub trailing_spacer: f32,
}

impl VirtualWindow {
    /// Number of rendered rows.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Compute the render window.
///
/// Disabled virtualization, a non-positive viewport or a non-positive
/// row height all degrade to rendering every row with zero spacers.
pub fn compute_window(
    enabled: bool,
    scroll_top: f32,
    viewport_height: f32,
    row_height: f32,
    overscan: usize,
    total_rows: usize,
) -> VirtualWindow {
    if !enabled || viewport_height <= 0.0 || row_height <= 0.0 {
        return VirtualWindow {
            start: 0,
            end: total_rows,
            leading_spacer: 0.0,
            trailing_spacer: 0.0,
        };
    }

    let visible = ceil_to_count(viewport_height / row_height) + 2 * overscan;
    let first_in_view = floor_to_index(scroll_top.max(0.0) / row_height);
    let start = first_in_view.saturating_sub(overscan).min(total_rows);
    let end = start.saturating_add(visible).min(total_rows);

    #[allow(clippy::cast_precision_loss)]
    let spacer = |rows: usize| rows as f32 * row_height;
    VirtualWindow {
        start,
        end,
        leading_spacer: spacer(start),
        trailing_spacer: spacer(total_rows - end),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_to_index(x: f32) -> usize {
    if x.is_finite() && x > 0.0 {
        x.floor() as usize
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_to_count(x: f32) -> usize {
    if x.is_finite() && x > 0.0 {
        x.ceil() as usize
    } else {
        0
    }
}
