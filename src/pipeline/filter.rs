//! Filter stage: per-kind row predicates.
//!
//! A row survives iff it satisfies every active filter entry whose
//! column declares a matching filter kind. Filter values that cannot be
//! interpreted for their kind (non-numeric number filter, unparseable
//! date) deactivate that entry rather than excluding rows.

use crate::types::{ColumnSet, FilterKind, FilterModel, RowAccess};

/// Indices of rows passing the filter model, in input order.
pub fn apply_filter<T: RowAccess>(
    rows: &[T],
    columns: &ColumnSet<T>,
    model: &FilterModel,
) -> Vec<usize> {
    if model.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|&(_, row)| row_passes(row, columns, model))
        .map(|(i, _)| i)
        .collect()
}

fn row_passes<T: RowAccess>(row: &T, columns: &ColumnSet<T>, model: &FilterModel) -> bool {
    for (col_id, value) in model.entries() {
        let Some(col) = columns.get(col_id) else {
            // Unknown ids in the model are inert, not exclusionary.
            continue;
        };
        let Some(kind) = col.filter else {
            continue;
        };
        let cell = col.value_of(row);
        let pass = match kind {
            FilterKind::Text => {
                let needle = value.to_display().to_lowercase();
                needle.is_empty() || cell.to_display().to_lowercase().contains(&needle)
            }
            FilterKind::Number => match value.as_number() {
                // Non-numeric filter input: entry inactive.
                None => true,
                Some(f) => cell
                    .as_number()
                    .is_some_and(|n| (n - f).abs() < f64::EPSILON),
            },
            FilterKind::Date => match value.as_date() {
                None => true,
                Some(f) => cell.as_date() == Some(f),
            },
            FilterKind::Select => {
                let wanted = value.to_display();
                wanted.is_empty() || cell.to_display() == wanted
            }
        };
        if !pass {
            return false;
        }
    }
    true
}
