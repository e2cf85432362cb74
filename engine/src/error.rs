use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Source file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // Header row does not carry a column the settings expect.
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Column index {index} for '{field}' is beyond the sheet width of {width} columns")]
    ColumnOutOfRange {
        field: String,
        index: usize,
        width: usize,
    },

    #[error("Report error: {0}")]
    ReportError(String),

    // Errors bubbling up from the shared crate's table helpers.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Errors that make running any report pointless.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::SourceNotFound { .. }
                | EngineError::ConfigError(_)
                | EngineError::ConfigParseError { .. }
                | EngineError::SchemaError(_)
                | EngineError::ColumnOutOfRange { .. }
        )
    }
}
