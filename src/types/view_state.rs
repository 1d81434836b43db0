//! View-state value types: sort, filter model, page sizing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::value::CellValue;

/// Default page-size candidate set offered to the host.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Sort direction, tri-state and cyclic: Asc -> Desc -> None -> Asc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
    /// Unsorted
    #[default]
    None,
}

impl SortDirection {
    /// Next state in the click cycle.
    pub fn next(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
            SortDirection::None => SortDirection::Asc,
        }
    }
}

/// Current sort target and direction. An empty id or `None` direction
/// means the data keeps its input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    /// Target column id
    pub column_id: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortState {
    /// Sort by a column.
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    /// True when no sorting applies.
    pub fn is_unsorted(&self) -> bool {
        self.column_id.is_empty() || self.direction == SortDirection::None
    }
}

/// A filter value typed by the host: text entries and numeric entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Numeric filter input
    Number(f64),
    /// Text filter input (also used by date and select filters)
    Text(String),
}

impl FilterValue {
    /// Numeric interpretation, `None` when not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Calendar-date interpretation.
    pub fn as_date(&self) -> Option<chrono::NaiveDate> {
        match self {
            FilterValue::Number(n) => CellValue::Number(*n).as_date(),
            FilterValue::Text(s) => CellValue::Text(s.clone()).as_date(),
        }
    }

    /// Display string used for text/select matching.
    pub fn to_display(&self) -> String {
        match self {
            FilterValue::Number(n) => CellValue::Number(*n).to_display(),
            FilterValue::Text(s) => s.clone(),
        }
    }

    /// An empty text entry is an inactive filter, not a match-everything
    /// filter.
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

/// Column id -> filter value. Absent entries are inactive; empty text
/// entries are removed on insert so the model only ever holds active
/// filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterModel(HashMap<String, FilterValue>);

impl FilterModel {
    /// Empty model (no filtering).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one column's filter. `None` and empty text both clear.
    pub fn set(&mut self, column_id: impl Into<String>, value: Option<FilterValue>) {
        let id = column_id.into();
        match value {
            Some(v) if !v.is_empty() => {
                self.0.insert(id, v);
            }
            _ => {
                self.0.remove(&id);
            }
        }
    }

    /// Current filter for a column.
    pub fn get(&self, column_id: &str) -> Option<&FilterValue> {
        self.0.get(column_id)
    }

    /// Active entries (all stored entries are active by construction).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of active filters (drives the host's filter badge).
    pub fn active_count(&self) -> usize {
        self.0.len()
    }

    /// True when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(String, FilterValue)> for FilterModel {
    fn from_iter<I: IntoIterator<Item = (String, FilterValue)>>(iter: I) -> Self {
        let mut model = FilterModel::new();
        for (id, v) in iter {
            model.set(id, Some(v));
        }
        model
    }
}
