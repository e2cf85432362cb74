use crate::error::EngineError;
use shared::models::ReportTable;
use std::cmp::Ordering;

/// Stable descending sort on a numeric column. Rows without a number in that
/// column (missing or never normalized) go last, keeping their relative order.
pub fn sort_descending(table: &mut ReportTable, column: &str) -> Result<(), EngineError> {
    let idx = table.column_index(column).ok_or_else(|| {
        EngineError::ReportError(format!("Cannot sort report '{}' by unknown column '{}'", table.name, column))
    })?;

    table.rows.sort_by(|a, b| {
        match (a.values[idx].as_number(), b.values[idx].as_number()) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    Ok(())
}
