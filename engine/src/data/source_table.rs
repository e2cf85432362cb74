// The loaded sheet, held read-only while the reports are generated.
use shared::models::SourceRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Standard quoting, UTF-8 required.
    Strict,
    /// Quoting disabled, bytes decoded lossily.
    Permissive,
}

#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
    /// Data lines dropped as malformed.
    pub skipped_lines: usize,
    pub mode: LoadMode,
}

impl SourceTable {
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
