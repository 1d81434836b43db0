//! dyntable - headless data-grid state and layout engine
//!
//! Pure, render-independent table logic: give it rows, column
//! definitions and view state, get back the visible row slice, pixel
//! geometry and derived flags:
//! - Column width resolution (fixed, flex, min/max, manual resize)
//! - Sticky offsets for pinned columns
//! - Filter, sort and paginate over opaque rows
//! - Controlled or uncontrolled view state per concern
//! - Selection keyed by stable row keys
//! - Fixed-height row virtualization
//!
//! No markup, no styling, no I/O. The host renders; the engine decides
//! what and where.
//!
//! # Usage
//!
//! ```
//! use dyntable::{ColumnDef, TableEngine, TableOptions};
//! use serde_json::json;
//!
//! let mut engine = TableEngine::new(
//!     vec![
//!         ColumnDef::new("name", "Name").flex(1.0),
//!         ColumnDef::new("age", "Age").width(80.0),
//!     ],
//!     TableOptions::default(),
//! )?;
//! engine.set_container_width(600.0);
//!
//! let rows = vec![
//!     json!({ "name": "Ada", "age": 36 }),
//!     json!({ "name": "Grace", "age": 85 }),
//! ];
//! engine.sort_click("age");
//! let frame = engine.frame(&rows);
//! assert_eq!(frame.displayed, vec![0, 1]);
//! # Ok::<(), dyntable::TableError>(())
//! ```

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;
pub mod window;

pub use engine::{
    CellFormatter, TableEngine, TableFrame, TableOptions, DEFAULT_ACTIONS_WIDTH,
    SELECTION_COLUMN_WIDTH,
};
pub use error::{Result, TableError};
pub use layout::{
    pinned_offsets, resolve_widths, PinnedOffsets, ResizeSession, DEFAULT_FLEX_MIN,
    DEFAULT_MIN_WIDTH,
};
pub use pipeline::{PageRequest, PageSummary, PipelineOutput};
pub use state::{SelectAllState, SelectionStore, StateCell, ViewState};
pub use types::*;
pub use window::{compute_window, VirtualWindow, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
