// Derived report metrics
pub mod savings;
pub mod scenario;
pub mod spend;

pub use savings::TargetSavings;
pub use spend::AnnualSpend;

use crate::error::EngineError;
use serde_json::Value;
use shared::models::{FieldValue, ReportTable};

// Common trait for column-producing metrics
pub trait MetricCalculator {
    fn column(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this metric instance
    fn calculate(&self, table: &ReportTable) -> Result<Vec<FieldValue>, EngineError>; // One value per row, Missing where inputs are missing
}

/// Computes `metric` over `table` and appends the result as a new column.
pub fn apply_metric(table: &mut ReportTable, metric: &dyn MetricCalculator) -> Result<(), EngineError> {
    tracing::debug!(report = %table.name, metric = metric.column(), parameters = %metric.parameters(), "Applying metric");
    let values = metric.calculate(table)?;
    table.add_column(metric.column(), values)?;
    Ok(())
}
