use crate::config::settings::InputSettings;
use crate::data::source_table::{LoadMode, SourceTable};
use crate::error::EngineError;
use csv::{ByteRecord, ReaderBuilder};
use shared::models::SourceRow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};

/// Loads the delimited procurement export.
///
/// Layout: `metadata_rows` free-form lines, then the header row, then data rows.
/// Data rows wider than the header are malformed and skipped. Shorter rows are
/// kept and their absent trailing cells read as missing.
pub struct SheetLoader {
    path: PathBuf,
    metadata_rows: usize,
    delimiter: u8,
}

impl SheetLoader {
    pub fn new(path: impl Into<PathBuf>, metadata_rows: usize, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            metadata_rows,
            delimiter,
        }
    }

    pub fn from_settings(input: &InputSettings) -> Result<Self, EngineError> {
        Ok(Self::new(&input.path, input.metadata_rows, input.delimiter_byte()?))
    }

    /// Tries a strict pass first and retries once in permissive mode.
    /// A missing file is never retried.
    pub fn load(&self) -> Result<SourceTable, EngineError> {
        info!(path = %self.path.display(), metadata_rows = self.metadata_rows, "Loading procurement sheet");

        let table = match self.load_with(LoadMode::Strict) {
            Ok(table) => table,
            Err(e @ EngineError::SourceNotFound { .. }) => return Err(e),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Strict load failed, retrying in permissive mode");
                self.load_with(LoadMode::Permissive)?
            }
        };

        if table.is_empty() {
            warn!(path = %self.path.display(), skipped = table.skipped_lines, "Sheet has no data rows");
        }
        info!(
            path = %self.path.display(),
            columns = table.width(),
            rows = table.len(),
            skipped = table.skipped_lines,
            mode = ?table.mode,
            "Loaded procurement sheet"
        );
        Ok(table)
    }

    fn open_past_metadata(&self) -> Result<BufReader<File>, EngineError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EngineError::SourceNotFound { path: self.path.clone() },
            _ => EngineError::from(e),
        })?;

        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        for _ in 0..self.metadata_rows {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
        }
        Ok(reader)
    }

    fn load_with(&self, mode: LoadMode) -> Result<SourceTable, EngineError> {
        let reader = self.open_past_metadata()?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false) // Header is read as the first record so both modes decode it the same way
            .flexible(true)
            .quoting(mode == LoadMode::Strict)
            .from_reader(reader);

        let mut record = ByteRecord::new();
        if !self.read_line_record(&mut rdr, &mut record, mode)? {
            return Err(EngineError::CsvDataFormatError(format!(
                "No header row after {} metadata lines in '{}'",
                self.metadata_rows,
                self.path.display()
            )));
        }
        let headers = decode_record(&record, mode).ok_or_else(|| {
            EngineError::CsvDataFormatError("Header row is not valid UTF-8".to_string())
        })?;
        let width = headers.len();

        let mut rows = Vec::new();
        let mut skipped_lines = 0;
        while self.read_line_record(&mut rdr, &mut record, mode)? {
            let line = self.line_of(&record);

            if record.len() > width {
                warn!(line, fields = record.len(), expected = width, "Skipping malformed line: too many fields");
                skipped_lines += 1;
                continue;
            }
            match decode_record(&record, mode) {
                Some(cells) => rows.push(SourceRow::new(line, cells)),
                None => {
                    warn!(line, "Skipping malformed line: invalid UTF-8");
                    skipped_lines += 1;
                }
            }
        }

        Ok(SourceTable {
            headers,
            rows,
            skipped_lines,
            mode,
        })
    }

    /// Reads the next record. In strict mode a quoted field that spans a line
    /// break (usually an unterminated quote swallowing the following lines)
    /// fails the pass so the caller can retry permissively.
    fn read_line_record<R: io::Read>(
        &self,
        rdr: &mut csv::Reader<R>,
        record: &mut ByteRecord,
        mode: LoadMode,
    ) -> Result<bool, EngineError> {
        if !rdr.read_byte_record(record)? {
            return Ok(false);
        }
        if mode == LoadMode::Strict && record.iter().any(spans_line_break) {
            return Err(EngineError::CsvDataFormatError(format!(
                "Quoted field starting on line {} of '{}' runs across line breaks",
                self.line_of(record),
                self.path.display()
            )));
        }
        Ok(true)
    }

    fn line_of(&self, record: &ByteRecord) -> usize {
        self.metadata_rows + record.position().map_or(0, |p| p.line() as usize)
    }
}

fn spans_line_break(field: &[u8]) -> bool {
    field.iter().any(|&b| b == b'\n' || b == b'\r')
}

fn decode_record(record: &ByteRecord, mode: LoadMode) -> Option<Vec<String>> {
    record
        .iter()
        .map(|field| match mode {
            LoadMode::Strict => std::str::from_utf8(field).ok().map(str::to_string),
            LoadMode::Permissive => Some(String::from_utf8_lossy(field).into_owned()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_sheet(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_skips_metadata_and_reads_header() {
        let sheet = create_test_sheet(
            b"IDI export\t\t\nweek 12\t\t\n\t\t\n\tITEM DESCRIPTION\tGRADE\n\tAPPLE FUJI 56CT\tUS1\n\tONION RED\tUS2\n",
        );
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();

        assert_eq!(table.headers, vec!["", "ITEM DESCRIPTION", "GRADE"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get(1), Some("APPLE FUJI 56CT"));
        assert_eq!(table.rows[0].line, 5);
        assert_eq!(table.rows[1].line, 6);
        assert_eq!(table.mode, LoadMode::Strict);
        assert_eq!(table.skipped_lines, 0);
    }

    #[test]
    fn test_load_skips_wide_rows_and_keeps_short_rows() {
        let sheet = create_test_sheet(
            b"m\nm\nm\n\tITEM DESCRIPTION\tGRADE\n\tAPPLE\tUS1\textra\tcells\n\tBEEF\n\tRICE\tLONG\n",
        );
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();

        assert_eq!(table.skipped_lines, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get(1), Some("BEEF"));
        assert_eq!(table.rows[0].get(2), None);
        assert_eq!(table.rows[1].get(2), Some("LONG"));
    }

    #[test]
    fn test_load_skips_invalid_utf8_rows_in_strict_mode() {
        let sheet = create_test_sheet(b"m\nm\nm\n\tITEM DESCRIPTION\n\tAPPLE\xff\n\tGARLIC\n");
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();

        assert_eq!(table.mode, LoadMode::Strict);
        assert_eq!(table.skipped_lines, 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get(1), Some("GARLIC"));
    }

    #[test]
    fn test_load_falls_back_to_permissive_mode() {
        let sheet = create_test_sheet(b"m\nm\nm\n\tITEM DESCRIPTION\xff\n\t\"APPLE FUJI\n");
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();

        assert_eq!(table.mode, LoadMode::Permissive);
        assert!(table.headers[1].starts_with("ITEM DESCRIPTION"));
        // Quotes are literal in permissive mode.
        assert_eq!(table.rows[0].get(1), Some("\"APPLE FUJI"));
    }

    #[test]
    fn test_unterminated_quote_retries_in_permissive_mode() {
        let sheet = create_test_sheet(
            b"m\nm\nm\n\tITEM DESCRIPTION\tGRADE\tX\n\t\"APPLE FUJI\tUS1\n\tBEEF CHUCK\tUS2\n\tONION RED\tUS3\n",
        );
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();

        assert_eq!(table.mode, LoadMode::Permissive);
        assert_eq!(table.len(), 3);
        assert_eq!(table.skipped_lines, 0);
        assert_eq!(table.rows[0].get(1), Some("\"APPLE FUJI"));
        assert_eq!(table.rows[0].get(2), Some("US1"));
        assert_eq!(table.rows[1].get(1), Some("BEEF CHUCK"));
        assert_eq!(table.rows[1].line, 6);
        assert_eq!(table.rows[2].get(1), Some("ONION RED"));
    }

    #[test]
    fn test_header_only_sheet_loads_empty() {
        let sheet = create_test_sheet(b"m\nm\nm\n\tITEM DESCRIPTION\n");
        let table = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = SheetLoader::new("non_existent_sheet.csv", 3, b'\t').load();
        match result {
            Err(EngineError::SourceNotFound { path }) => assert_eq!(path, PathBuf::from("non_existent_sheet.csv")),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_without_header_row() {
        let sheet = create_test_sheet(b"only\nmetadata\n");
        let err = SheetLoader::new(sheet.path(), 3, b'\t').load().unwrap_err();
        assert!(err.to_string().contains("No header row"));
    }
}
