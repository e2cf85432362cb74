// Writes a ReportTable as a comma-delimited CSV with a header row.
use crate::error::EngineError;
use csv::{QuoteStyle, WriterBuilder};
use shared::models::ReportTable;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Returns the number of data rows written. The report is written to a sibling
/// temp file and renamed over `path`, so a failed write leaves any previous
/// report in place.
pub fn write_report(table: &ReportTable, path: &Path) -> Result<usize, EngineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path)?;
    if let Err(e) = write_records(table, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        EngineError::ReportError(format!(
            "Failed to move '{}' into place at '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ))
    })?;

    info!(report = %table.name, path = %path.display(), rows = table.len(), "Saved report");
    Ok(table.len())
}

fn temp_path_for(path: &Path) -> Result<PathBuf, EngineError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| EngineError::ReportError(format!("Report path '{}' has no file name", path.display())))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn write_records(table: &ReportTable, path: &Path) -> Result<(), EngineError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .from_path(path)?;

    wtr.write_record(&table.columns)?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
