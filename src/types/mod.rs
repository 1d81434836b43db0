//! Core data model: cell values, columns, view-state value types.

pub mod column;
pub mod value;
pub mod view_state;

pub use column::{
    Accessor, ColumnDef, ColumnSet, FilterKind, PinSide, RowComparator, WidthValue,
};
pub use value::{CellValue, RowAccess, RowKey};
pub use view_state::{
    FilterModel, FilterValue, SortDirection, SortState, DEFAULT_PAGE_SIZE_OPTIONS,
};
