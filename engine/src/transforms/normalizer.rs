// Coerces currency-formatted report cells to numbers.
use crate::error::EngineError;
use shared::models::{FieldValue, ReportTable};
use shared::utils::currency_format::parse_amount;

/// Text is parsed after stripping `$` and `,`; unparseable text becomes `Missing`.
pub fn normalize_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::from_number(parse_amount(s)),
        FieldValue::Number(n) => FieldValue::from_number(Some(*n)),
        FieldValue::Missing => FieldValue::Missing,
    }
}

pub fn normalize_columns(table: &mut ReportTable, columns: &[&str]) -> Result<(), EngineError> {
    for column in columns {
        table.map_column(column, normalize_value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value(&FieldValue::text("$1,234.50")), FieldValue::Number(1234.50));
        assert_eq!(normalize_value(&FieldValue::text("")), FieldValue::Missing);
        assert_eq!(normalize_value(&FieldValue::text("N/A")), FieldValue::Missing);
        assert_eq!(normalize_value(&FieldValue::Number(7.0)), FieldValue::Number(7.0));
        assert_eq!(normalize_value(&FieldValue::Missing), FieldValue::Missing);
    }

    #[test]
    fn test_normalize_columns_only_touches_named_columns() {
        let mut table = ReportTable::new("t", vec!["FOB".to_string(), "Vol".to_string()]);
        table.push_row(vec![FieldValue::text("$30.00"), FieldValue::text("1,200")]).unwrap();

        normalize_columns(&mut table, &["Vol"]).unwrap();
        assert_eq!(table.rows[0].values, vec![FieldValue::text("$30.00"), FieldValue::Number(1200.0)]);
    }

    #[test]
    fn test_normalize_unknown_column_is_error() {
        let mut table = ReportTable::new("t", vec!["FOB".to_string()]);
        let err = normalize_columns(&mut table, &["Landed"]).unwrap_err();
        assert!(err.to_string().contains("Column 'Landed' not found"));
    }
}
