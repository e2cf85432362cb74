// Annualized spend projection: landed cost x weekly volume x weeks per year.
use super::MetricCalculator;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{FieldValue, ReportTable};

pub fn annual_spend(landed_cost: Option<f64>, weekly_volume: Option<f64>, weeks_per_year: f64) -> Option<f64> {
    Some(landed_cost? * weekly_volume? * weeks_per_year)
}

pub struct AnnualSpend {
    column: String,
    landed_cost_column: String,
    weekly_volume_column: String,
    weeks_per_year: f64,
}

impl AnnualSpend {
    pub fn new(
        column: impl Into<String>,
        landed_cost_column: impl Into<String>,
        weekly_volume_column: impl Into<String>,
        weeks_per_year: f64,
    ) -> Self {
        Self {
            column: column.into(),
            landed_cost_column: landed_cost_column.into(),
            weekly_volume_column: weekly_volume_column.into(),
            weeks_per_year,
        }
    }
}

impl MetricCalculator for AnnualSpend {
    fn column(&self) -> &str {
        &self.column
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "landed_cost": self.landed_cost_column,
            "weekly_volume": self.weekly_volume_column,
            "weeks_per_year": self.weeks_per_year,
        })
    }

    fn calculate(&self, table: &ReportTable) -> Result<Vec<FieldValue>, EngineError> {
        let landed = table.column_values(&self.landed_cost_column)?;
        let volume = table.column_values(&self.weekly_volume_column)?;
        Ok(landed
            .iter()
            .zip(volume.iter())
            .map(|(l, v)| FieldValue::from_number(annual_spend(l.as_number(), v.as_number(), self.weeks_per_year)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_spend() {
        assert_eq!(annual_spend(Some(30.0), Some(10.0), 52.0), Some(15600.0));
        assert_eq!(annual_spend(None, Some(10.0), 52.0), None);
        assert_eq!(annual_spend(Some(30.0), None, 52.0), None);
    }

    #[test]
    fn test_annual_spend_is_deterministic() {
        let first = annual_spend(Some(12.34), Some(56.0), 52.0);
        for _ in 0..10 {
            assert_eq!(annual_spend(Some(12.34), Some(56.0), 52.0), first);
        }
    }

    #[test]
    fn test_calculate_over_table() {
        let mut table = ReportTable::new("t", vec!["Landed".to_string(), "Vol".to_string()]);
        table.push_row(vec![FieldValue::Number(2.5), FieldValue::Number(4.0)]).unwrap();
        table.push_row(vec![FieldValue::Missing, FieldValue::Number(4.0)]).unwrap();
        table.push_row(vec![FieldValue::text("$3.00"), FieldValue::Number(1.0)]).unwrap();

        let metric = AnnualSpend::new("Spend", "Landed", "Vol", 52.0);
        let values = metric.calculate(&table).unwrap();
        // Un-normalized text does not count as a number.
        assert_eq!(values, vec![FieldValue::Number(520.0), FieldValue::Missing, FieldValue::Missing]);
        assert_eq!(metric.parameters()["weeks_per_year"], 52.0);
    }

    #[test]
    fn test_calculate_unknown_column() {
        let table = ReportTable::new("t", vec!["Landed".to_string()]);
        let metric = AnnualSpend::new("Spend", "Landed", "Vol", 52.0);
        assert!(metric.calculate(&table).is_err());
    }
}
