// Target savings at a fixed fraction of annual spend.
use super::MetricCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{FieldValue, ReportTable};

pub fn target_savings(annual_spend: Option<f64>, rate: f64) -> Option<f64> {
    annual_spend.map(|spend| spend * rate)
}

/// Per-case price after taking `rate` off the landed cost.
pub fn target_price(landed_cost: f64, rate: f64) -> f64 {
    landed_cost * (1.0 - rate)
}

/// Column name for a savings rate, e.g. 0.30 -> "Target_Savings_30pct".
pub fn savings_column_name(rate: f64) -> String {
    format!("Target_Savings_{}pct", (rate * 100.0).round() as i64)
}

pub struct TargetSavings {
    column: String,
    spend_column: String,
    rate: f64,
}

impl TargetSavings {
    pub fn new(spend_column: impl Into<String>, rate: f64) -> Self {
        Self {
            column: savings_column_name(rate),
            spend_column: spend_column.into(),
            rate,
        }
    }
}

impl MetricCalculator for TargetSavings {
    fn column(&self) -> &str {
        &self.column
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "spend": self.spend_column, "rate": self.rate })
    }

    fn calculate(&self, table: &ReportTable) -> Result<Vec<FieldValue>, EngineError> {
        Ok(table
            .column_values(&self.spend_column)?
            .iter()
            .map(|spend| FieldValue::from_number(target_savings(spend.as_number(), self.rate)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::apply_metric;

    #[test]
    fn test_savings_column_name() {
        assert_eq!(savings_column_name(0.30), "Target_Savings_30pct");
        assert_eq!(savings_column_name(0.125), "Target_Savings_13pct");
    }

    #[test]
    fn test_target_price() {
        assert!((target_price(40.0, 0.30) - 28.0).abs() < 1e-9);
        assert_eq!(target_price(40.0, 0.0), 40.0);
    }

    #[test]
    fn test_target_savings() {
        assert_eq!(target_savings(Some(1000.0), 0.25), Some(250.0));
        assert_eq!(target_savings(None, 0.30), None);
    }

    #[test]
    fn test_apply_adds_column() {
        let mut table = ReportTable::new("t", vec!["Est_Annual_Spend".to_string()]);
        table.push_row(vec![FieldValue::Number(1000.0)]).unwrap();
        table.push_row(vec![FieldValue::Missing]).unwrap();

        apply_metric(&mut table, &TargetSavings::new("Est_Annual_Spend", 0.5)).unwrap();
        assert_eq!(table.columns, vec!["Est_Annual_Spend", "Target_Savings_50pct"]);
        assert_eq!(table.value(0, "Target_Savings_50pct"), Some(&FieldValue::Number(500.0)));
        assert_eq!(table.value(1, "Target_Savings_50pct"), Some(&FieldValue::Missing));
    }
}
