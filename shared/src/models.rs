use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One data line of the source sheet, kept positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    /// 1-based line number in the source file (metadata lines included).
    pub line: usize,
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Returns the cell at `index`, or `None` when it is out of range or blank.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells
            .get(index)
            .map(String::as_str)
            .filter(|cell| !cell.trim().is_empty())
    }
}

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Missing,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            Some(s) => FieldValue::Text(s.to_string()),
            None => FieldValue::Missing,
        }
    }

    pub fn from_number(n: Option<f64>) -> Self {
        match n {
            Some(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Missing,
        }
    }

    /// Numeric view of the value. Text is not coerced here; run it through
    /// the normalizer first.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => f.write_str(&crate::utils::currency_format::format_number(*n)),
            FieldValue::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub values: Vec<FieldValue>,
}

/// A named, column-ordered report ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| anyhow!("Column '{}' not found in report '{}'", column, self.name))
    }

    pub fn push_row(&mut self, values: Vec<FieldValue>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(anyhow!(
                "Row has {} values but report '{}' has {} columns",
                values.len(),
                self.name,
                self.columns.len()
            ));
        }
        self.rows.push(ReportRow { values });
        Ok(())
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.values.get(idx))
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<&FieldValue>> {
        let idx = self.require_column(column)?;
        Ok(self.rows.iter().map(|r| &r.values[idx]).collect())
    }

    /// Appends a column; `values` must hold exactly one entry per row.
    pub fn add_column(&mut self, column: impl Into<String>, values: Vec<FieldValue>) -> Result<()> {
        let column = column.into();
        if self.column_index(&column).is_some() {
            return Err(anyhow!("Column '{}' already exists in report '{}'", column, self.name));
        }
        if values.len() != self.rows.len() {
            return Err(anyhow!(
                "Column '{}' has {} values but report '{}' has {} rows",
                column,
                values.len(),
                self.name,
                self.rows.len()
            ));
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.values.push(value);
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn add_constant_column(&mut self, column: impl Into<String>, value: FieldValue) -> Result<()> {
        let values = vec![value; self.rows.len()];
        self.add_column(column, values)
    }

    /// Rewrites every value of `column` in place.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&FieldValue) -> FieldValue,
    {
        let idx = self.require_column(column)?;
        for row in &mut self.rows {
            row.values[idx] = f(&row.values[idx]);
        }
        Ok(())
    }

    /// Cell strings of every row, in column order, as they are written out.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(|r| r.values.iter().map(ToString::to_string).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineSource {
    /// Parsed from the landed cost of the first matching sheet row.
    Observed,
    /// The sheet value was missing or unparseable; the configured fallback was used.
    Fallback,
}

/// Savings projection for moving one commodity to a target cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub commodity: String,
    pub product: Option<String>,
    pub baseline_cost: f64,
    pub baseline_source: BaselineSource,
    pub target_cost: f64,
    pub weekly_volume: f64,
    pub annual_savings: f64,
    pub fee_rate: f64,
    pub fee: f64,
}

/// Totals across all keyword-matched items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub generated_at: DateTime<Utc>,
    pub matched_items: usize,
    /// Items where both landed cost and weekly volume parsed.
    pub priced_items: usize,
    pub total_annual_spend: f64,
    pub total_target_savings: f64,
    pub savings_rate: f64,
    /// Highest annual savings first.
    pub top_opportunities: Vec<Opportunity>,
}

/// One item's savings at the target rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub product: String,
    pub landed_cost: f64,
    pub target_price: f64,
    pub savings_per_case: f64,
    pub current_annual_cost: f64,
    pub optimized_annual_cost: f64,
    pub annual_savings: f64,
}
