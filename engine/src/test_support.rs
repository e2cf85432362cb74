// Fixture builders for sheet-level tests.
use crate::config::PipelineSettings;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const SHEET_WIDTH: usize = 70;

/// One tab-separated line of `SHEET_WIDTH` cells with the given cells filled in.
pub fn sheet_line(cells: &[(usize, &str)]) -> String {
    let mut line = vec![""; SHEET_WIDTH];
    for (idx, value) in cells {
        line[*idx] = *value;
    }
    line.join("\t")
}

/// Three metadata lines, a header matching the default column settings, then `rows`.
pub fn write_sheet(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "IDI PROCUREMENT\tUNCLE CHARLES").unwrap();
    writeln!(file, "WEEK 12").unwrap();
    writeln!(file).unwrap();
    writeln!(
        file,
        "{}",
        sheet_line(&[(1, "ITEM DESCRIPTION"), (2, "GRADE"), (13, "FOB"), (47, "ORIGIN OF ITEM"), (66, "TTL")])
    )
    .unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

/// A data row with the six fields the reports read.
pub fn item_row(description: &str, fob: &str, pack: &str, origin: &str, landed: &str, weekly: &str) -> String {
    sheet_line(&[(1, description), (2, pack), (13, fob), (47, origin), (66, weekly), (68, landed)])
}

pub fn settings_for(sheet: &Path, output_dir: &Path) -> PipelineSettings {
    let mut settings = PipelineSettings::load_default().unwrap();
    settings.input.path = sheet.to_path_buf();
    settings.output.directory = output_dir.to_path_buf();
    settings
}
