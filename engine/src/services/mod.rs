// Report generation services
pub mod report_service;

pub use report_service::{PipelineRun, ReportArtifact, ReportKind, ReportOutcome, ReportService};
