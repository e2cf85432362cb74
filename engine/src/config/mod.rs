// Engine configuration module
pub mod settings;

pub use settings::{ColumnSettings, ColumnSpec, PipelineSettings};
