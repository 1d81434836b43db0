//! Column definitions and the indexed column set.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, TableError};
use crate::types::value::{CellValue, RowAccess};

/// Which edge a column sticks to during horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinSide {
    /// Not pinned
    #[default]
    None,
    /// Sticky at the left edge
    Left,
    /// Sticky at the right edge
    Right,
}

/// Filter widget/semantics declared by a column. A filter value only
/// applies to a column whose declared kind matches its interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Case-insensitive substring containment
    Text,
    /// Numeric equality
    Number,
    /// Same calendar day (local time)
    Date,
    /// Exact string equality
    Select,
}

/// Width constraint: a pixel number or a numeric string such as `"120"`
/// or `"120px"`. Unparseable strings count as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidthValue {
    /// Pixel value
    Px(f32),
    /// Raw string, parsed leniently for a leading number
    Raw(String),
}

impl WidthValue {
    /// Resolve to pixels; `None` when the raw string has no leading number.
    pub fn to_px(&self) -> Option<f32> {
        match self {
            WidthValue::Px(n) => Some(*n),
            WidthValue::Raw(s) => parse_leading_f32(s),
        }
    }
}

impl From<f32> for WidthValue {
    fn from(n: f32) -> Self {
        WidthValue::Px(n)
    }
}

impl From<&str> for WidthValue {
    fn from(s: &str) -> Self {
        WidthValue::Raw(s.to_string())
    }
}

/// `parseFloat`-style parse: longest numeric prefix, e.g. `"120px"` -> 120.
fn parse_leading_f32(s: &str) -> Option<f32> {
    let t = s.trim();
    let mut end = 0;
    for (i, c) in t.char_indices() {
        if c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    t.get(..end).and_then(|p| p.parse::<f32>().ok())
}

/// Value accessor: a field path resolved through [`RowAccess`], or a
/// custom getter closure.
#[derive(Clone)]
pub enum Accessor<T> {
    /// Read the named field off the row
    Field(String),
    /// Compute the value from the row
    Getter(Arc<dyn Fn(&T) -> CellValue>),
}

/// Custom sort comparator: `(value_a, value_b, row_a, row_b) -> Ordering`.
pub type RowComparator<T> = Arc<dyn Fn(&CellValue, &CellValue, &T, &T) -> Ordering>;

/// Column definition. Built with the builder methods; every behavior
/// flag defaults to the permissive side (`sortable`, visible, unpinned).
pub struct ColumnDef<T> {
    /// Unique, stable column id
    pub id: String,
    /// Header label (rendering is the host's concern)
    pub header: String,
    /// Value accessor; absent means every cell reads as Null
    pub accessor: Option<Accessor<T>>,
    /// Participates in sorting (default true)
    pub sortable: bool,
    /// Per-column sort kill-switch, wins over `sortable`
    pub suppress_sort: bool,
    /// User may resize this column
    pub resizable: bool,
    /// Sticky edge
    pub pinned: PinSide,
    /// Initially hidden
    pub hide: bool,
    /// Share of leftover width; 0 = fixed-width column
    pub flex: f32,
    /// Declared width
    pub width: Option<WidthValue>,
    /// Lower width bound (default 50px, 80px for flex columns)
    pub min_width: Option<WidthValue>,
    /// Upper width bound (unconstrained when absent)
    pub max_width: Option<WidthValue>,
    /// Declared filter kind; absent = not filterable
    pub filter: Option<FilterKind>,
    /// Custom comparator used by the sort stage
    pub comparator: Option<RowComparator<T>>,
}

impl<T> ColumnDef<T> {
    /// Create a column reading the field named `id`.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Some(Accessor::Field(id.clone())),
            id,
            header: header.into(),
            sortable: true,
            suppress_sort: false,
            resizable: false,
            pinned: PinSide::None,
            hide: false,
            flex: 0.0,
            width: None,
            min_width: None,
            max_width: None,
            filter: None,
            comparator: None,
        }
    }

    /// Read a different field than the column id.
    pub fn field(mut self, path: impl Into<String>) -> Self {
        self.accessor = Some(Accessor::Field(path.into()));
        self
    }

    /// Compute the cell value with a getter closure.
    pub fn getter(mut self, f: impl Fn(&T) -> CellValue + 'static) -> Self {
        self.accessor = Some(Accessor::Getter(Arc::new(f)));
        self
    }

    /// Enable or disable sorting (default enabled).
    pub fn sortable(mut self, on: bool) -> Self {
        self.sortable = on;
        self
    }

    /// Disable sorting regardless of the `sortable` flag.
    pub fn suppress_sort(mut self) -> Self {
        self.suppress_sort = true;
        self
    }

    /// Allow manual resizing.
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Pin to an edge.
    pub fn pinned(mut self, side: PinSide) -> Self {
        self.pinned = side;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Take a share of leftover width proportional to `factor`.
    pub fn flex(mut self, factor: f32) -> Self {
        self.flex = factor.max(0.0);
        self
    }

    /// Declared width.
    pub fn width(mut self, w: impl Into<WidthValue>) -> Self {
        self.width = Some(w.into());
        self
    }

    /// Lower width bound.
    pub fn min_width(mut self, w: impl Into<WidthValue>) -> Self {
        self.min_width = Some(w.into());
        self
    }

    /// Upper width bound.
    pub fn max_width(mut self, w: impl Into<WidthValue>) -> Self {
        self.max_width = Some(w.into());
        self
    }

    /// Declare the filter kind.
    pub fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    /// Custom sort comparator.
    pub fn comparator(
        mut self,
        f: impl Fn(&CellValue, &CellValue, &T, &T) -> Ordering + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(f));
        self
    }
}

impl<T: RowAccess> ColumnDef<T> {
    /// Extract this column's value from a row.
    pub fn value_of(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(Accessor::Field(path)) => row.field(path),
            Some(Accessor::Getter(f)) => f(row),
            None => CellValue::Null,
        }
    }
}

/// Column definitions plus an id index for O(1)-amortized lookup.
pub struct ColumnSet<T> {
    columns: Vec<ColumnDef<T>>,
    by_id: HashMap<String, usize>,
}

impl<T> ColumnSet<T> {
    /// Build the set, validating id uniqueness.
    ///
    /// # Errors
    /// [`TableError::DuplicateColumnId`] when two definitions share an id.
    pub fn new(columns: Vec<ColumnDef<T>>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if by_id.insert(col.id.clone(), i).is_some() {
                return Err(TableError::DuplicateColumnId(col.id.clone()));
            }
        }
        Ok(Self { columns, by_id })
    }

    /// Column by id.
    pub fn get(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.by_id.get(id).and_then(|&i| self.columns.get(i))
    }

    /// Position of a column within the definition list.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Column by definition-list position.
    pub fn at(&self, index: usize) -> Option<&ColumnDef<T>> {
        self.columns.get(index)
    }

    /// All columns in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef<T>> {
        self.columns.iter()
    }

    /// Ids in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }

    /// True when a column with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no columns are defined.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
