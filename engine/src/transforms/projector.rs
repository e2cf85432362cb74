// Narrows source rows to a renamed, ordered set of report columns.
use crate::data::schema::{ColumnMap, ReportField};
use crate::error::EngineError;
use shared::models::{FieldValue, ReportTable, SourceRow};

#[derive(Debug, Clone)]
pub struct Projection {
    fields: Vec<(ReportField, String)>,
}

impl Projection {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = (ReportField, S)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(f, name)| (f, name.into())).collect(),
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields.iter().map(|(_, name)| name.clone()).collect()
    }

    /// Cells outside a row's width or left blank become `FieldValue::Missing`.
    pub fn project(&self, name: &str, rows: &[&SourceRow], columns: &ColumnMap) -> Result<ReportTable, EngineError> {
        let indices: Vec<usize> = self.fields.iter().map(|(f, _)| columns.index(*f)).collect();
        let mut table = ReportTable::new(name, self.column_names());
        for row in rows {
            let values = indices.iter().map(|&idx| FieldValue::from_cell(row.get(idx))).collect();
            table.push_row(values)?;
        }
        Ok(table)
    }
}
