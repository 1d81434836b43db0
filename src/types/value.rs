//! Scalar cell values, row keys, and row field access.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A scalar value extracted from a row through a column accessor.
///
/// The engine never inspects row types directly; every comparison,
/// filter match and sort key goes through this enum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing/empty value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric value (integers included)
    Number(f64),
    /// Text value
    Text(String),
    /// Calendar date
    Date(NaiveDate),
}

impl CellValue {
    /// True if the value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric interpretation: numbers as-is, booleans as 0/1,
    /// text parsed leniently. `None` when no number can be derived.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null | CellValue::Date(_) => None,
        }
    }

    /// Calendar-date interpretation: dates as-is, numbers as epoch
    /// milliseconds in local time, text parsed as ISO date/datetime.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::Number(n) => date_from_epoch_ms(*n),
            CellValue::Text(s) => parse_date_text(s),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }

    /// Display string used for text/select filtering and as the default
    /// cell rendering. Null renders empty, integral numbers without a
    /// fractional part.
    pub fn to_display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Format a number the way a display layer expects: `1` not `1.0`.
#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract().abs() < f64::EPSILON && n.abs() < 1e15 {
        format!("{}", n.trunc() as i64)
    } else {
        n.to_string()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn date_from_epoch_ms(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() {
        return None;
    }
    Local
        .timestamp_millis_opt(ms as i64)
        .single()
        .map(|dt| dt.date_naive())
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    chrono::DateTime::parse_from_rfc3339(t)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Unique key identifying a row across filtering, sorting and paging.
///
/// Derived from a key extractor, a designated key column, or (lossy
/// fallback) the row's positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    /// Integer key (database ids, positional indices)
    Int(i64),
    /// String key
    Text(String),
}

impl RowKey {
    /// Positional-index fallback key. Ordering-sensitive: not stable
    /// across data mutation. Documented lossy fallback only.
    pub fn positional(index: usize) -> Self {
        RowKey::Int(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&CellValue> for RowKey {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Number(n)
                if n.is_finite()
                    && n.fract().abs() < f64::EPSILON
                    && n.abs() < 9.0e18 =>
            {
                RowKey::Int(n.trunc() as i64)
            }
            other => RowKey::Text(other.to_display()),
        }
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        RowKey::Int(n)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        RowKey::Text(s.to_string())
    }
}

/// Field access for rows addressed by a field-path accessor.
///
/// Rows used only with getter accessors can return [`CellValue::Null`]
/// for every field.
pub trait RowAccess {
    /// Value of the named field, `Null` when absent.
    fn field(&self, name: &str) -> CellValue;
}

impl RowAccess for serde_json::Value {
    fn field(&self, name: &str) -> CellValue {
        match self.get(name) {
            Some(serde_json::Value::Bool(b)) => CellValue::Bool(*b),
            Some(serde_json::Value::Number(n)) => {
                n.as_f64().map_or(CellValue::Null, CellValue::Number)
            }
            Some(serde_json::Value::String(s)) => CellValue::Text(s.clone()),
            _ => CellValue::Null,
        }
    }
}

impl RowAccess for HashMap<String, CellValue> {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn number_display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(42.0).to_display(), "42");
        assert_eq!(CellValue::Number(1.5).to_display(), "1.5");
        assert_eq!(CellValue::Null.to_display(), "");
        assert_eq!(CellValue::Bool(true).to_display(), "true");
    }

    #[test]
    fn numeric_interpretation() {
        assert_eq!(CellValue::Text(" 3.5 ".into()).as_number(), Some(3.5));
        assert_eq!(CellValue::Text("abc".into()).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), Some(1.0));
    }

    #[test]
    fn date_parsing() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(CellValue::Text("2024-03-01".into()).as_date(), Some(d));
        assert_eq!(
            CellValue::Text("2024-03-01T10:30:00".into()).as_date(),
            Some(d)
        );
        assert_eq!(CellValue::Text("not a date".into()).as_date(), None);
        assert_eq!(CellValue::Date(d).as_date(), Some(d));
    }

    #[test]
    fn row_keys_from_values() {
        assert_eq!(RowKey::from(&CellValue::Number(7.0)), RowKey::Int(7));
        assert_eq!(
            RowKey::from(&CellValue::Number(1.5)),
            RowKey::Text("1.5".into())
        );
        assert_eq!(
            RowKey::from(&CellValue::Text("abc".into())),
            RowKey::Text("abc".into())
        );
        assert_eq!(RowKey::positional(3), RowKey::Int(3));
    }

    #[test]
    fn json_row_access() {
        let row = serde_json::json!({ "name": "ada", "age": 36, "active": true });
        assert_eq!(row.field("name"), CellValue::Text("ada".into()));
        assert_eq!(row.field("age"), CellValue::Number(36.0));
        assert_eq!(row.field("active"), CellValue::Bool(true));
        assert_eq!(row.field("missing"), CellValue::Null);
    }
}
