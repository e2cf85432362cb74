//! Command-line surface of the `procurement-reports` binary: argument parsing,
//! the end-to-end run, and the console text plus exit status it produces.

use crate::config::PipelineSettings;
use crate::data::loader::SheetLoader;
use crate::error::EngineError;
use crate::services::report_service::{commodity_scenario, portfolio_summary};
use crate::services::{PipelineRun, ReportArtifact, ReportService};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "procurement-reports")]
#[command(about = "Builds procurement savings reports from the IDI spreadsheet export")]
#[command(version)]
pub struct Cli {
    /// Settings file replacing the embedded defaults
    pub settings: Option<PathBuf>,
}

impl Cli {
    pub fn load_settings(&self) -> Result<PipelineSettings, EngineError> {
        match &self.settings {
            Some(path) => {
                info!(path = %path.display(), "Loading settings file");
                PipelineSettings::load_from_file(path)
            }
            None => PipelineSettings::load_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Every report ran, at least one failed.
    ReportsFailed,
    /// Settings, source file or sheet layout rejected; no report ran.
    InputRejected,
    /// Stopped before any report ran for another reason (I/O, CSV reader).
    Aborted,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::ReportsFailed => 1,
            ExitStatus::InputRejected => 2,
            ExitStatus::Aborted => 3,
        }
    }

    pub fn for_error(error: &EngineError) -> Self {
        if error.is_fatal() {
            ExitStatus::InputRejected
        } else {
            ExitStatus::Aborted
        }
    }
}

/// What the binary prints after a run, and how it exits.
#[derive(Debug)]
pub struct ConsoleReport {
    pub sections: Vec<String>,
    pub status: ExitStatus,
}

/// Loads settings and the sheet, then runs every report.
pub fn run_pipeline(cli: &Cli) -> Result<ConsoleReport, EngineError> {
    let settings = cli.load_settings()?;
    info!(version = %settings.version, "Settings loaded");

    let table = SheetLoader::from_settings(&settings.input)?.load()?;
    let service = ReportService::new(&table, &settings)?;
    Ok(summarize_run(&service.run_all()))
}

pub fn summarize_run(run: &PipelineRun) -> ConsoleReport {
    let mut sections = Vec::new();
    for outcome in &run.outcomes {
        match &outcome.result {
            Ok(ReportArtifact::Scenario(projection)) => sections.push(commodity_scenario::render(projection)),
            Ok(ReportArtifact::Portfolio(summary)) => sections.push(portfolio_summary::render(summary)),
            Ok(ReportArtifact::NotApplicable(reason)) => sections.push(reason.clone()),
            Ok(ReportArtifact::Csv { .. }) => {}
            Err(e) => sections.push(format!("Error generating {}: {}", outcome.kind, e)),
        }
    }

    let failed = run.failures();
    let status = if failed > 0 {
        sections.push(format!("{} of {} reports failed", failed, run.outcomes.len()));
        ExitStatus::ReportsFailed
    } else {
        ExitStatus::Success
    };
    ConsoleReport { sections, status }
}
