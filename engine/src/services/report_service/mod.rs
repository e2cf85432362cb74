// engine/src/services/report_service/mod.rs
// Hub for report generation: the ReportService owns the loaded sheet and the
// resolved columns, and each report lives in its own sibling module.

use crate::config::PipelineSettings;
use crate::data::schema::{ColumnMap, ReportField};
use crate::data::source_table::SourceTable;
use crate::error::EngineError;
use crate::transforms::KeywordFilter;
use chrono::{DateTime, Utc};
use shared::models::{PortfolioSummary, ScenarioProjection, SourceRow};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

pub mod arbitrage_targets;
pub mod commodity_scenario;
pub mod helpers;
pub mod mvp_dashboard;
pub mod optimization_targets;
pub mod portfolio_summary;
pub mod war_room;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    OptimizationTargets,
    WarRoom,
    ArbitrageTargets,
    CommodityScenario,
    MvpDashboard,
    PortfolioSummary,
}

impl ReportKind {
    /// Run order of `ReportService::run_all`.
    pub const ALL: [ReportKind; 6] = [
        ReportKind::OptimizationTargets,
        ReportKind::WarRoom,
        ReportKind::ArbitrageTargets,
        ReportKind::CommodityScenario,
        ReportKind::MvpDashboard,
        ReportKind::PortfolioSummary,
    ];
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::OptimizationTargets => "optimization targets",
            ReportKind::WarRoom => "war room dashboard",
            ReportKind::ArbitrageTargets => "arbitrage targets",
            ReportKind::CommodityScenario => "commodity scenario",
            ReportKind::MvpDashboard => "MVP dashboard",
            ReportKind::PortfolioSummary => "portfolio summary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportArtifact {
    Csv { path: PathBuf, rows: usize },
    Scenario(ScenarioProjection),
    Portfolio(PortfolioSummary),
    /// Nothing to report, e.g. no row matched the scenario commodity.
    NotApplicable(String),
}

#[derive(Debug)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub result: Result<ReportArtifact, EngineError>,
}

impl ReportOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct PipelineRun {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<ReportOutcome>,
}

impl PipelineRun {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn outcome(&self, kind: ReportKind) -> Option<&ReportOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

pub struct ReportService<'a> {
    table: &'a SourceTable,
    settings: &'a PipelineSettings,
    columns: ColumnMap,
    filter: KeywordFilter,
}

impl<'a> ReportService<'a> {
    /// Resolves the configured columns against the sheet header. A layout that
    /// does not match the settings fails here, before any report runs.
    pub fn new(table: &'a SourceTable, settings: &'a PipelineSettings) -> Result<Self, EngineError> {
        let columns = ColumnMap::resolve(&table.headers, &settings.columns)?;
        Ok(ReportService {
            table,
            settings,
            columns,
            filter: KeywordFilter::new(&settings.keywords),
        })
    }

    pub fn settings(&self) -> &PipelineSettings {
        self.settings
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn rows(&self) -> &'a [SourceRow] {
        &self.table.rows
    }

    /// Rows whose description matches any configured keyword, in sheet order.
    pub fn matched_rows(&self) -> Vec<&'a SourceRow> {
        self.filter.apply(&self.table.rows, self.columns.index(ReportField::Description))
    }

    pub fn run(&self, kind: ReportKind) -> ReportOutcome {
        info!(report = %kind, "Generating report");
        let result = match kind {
            ReportKind::OptimizationTargets => optimization_targets::generate(self),
            ReportKind::WarRoom => war_room::generate(self),
            ReportKind::ArbitrageTargets => arbitrage_targets::generate(self),
            ReportKind::CommodityScenario => commodity_scenario::generate(self),
            ReportKind::MvpDashboard => mvp_dashboard::generate(self),
            ReportKind::PortfolioSummary => portfolio_summary::generate(self),
        };

        match &result {
            Ok(ReportArtifact::NotApplicable(reason)) => info!(report = %kind, reason = %reason, "Report not applicable"),
            Ok(_) => info!(report = %kind, "Report complete"),
            Err(e) => error!(report = %kind, error = %e, "Error generating report"),
        }
        ReportOutcome { kind, result }
    }

    /// Runs every report in order. A failed report is recorded and the rest still run.
    pub fn run_all(&self) -> PipelineRun {
        let started_at = Utc::now();
        let outcomes: Vec<ReportOutcome> = ReportKind::ALL.iter().map(|&kind| self.run(kind)).collect();
        let finished_at = Utc::now();

        let run = PipelineRun {
            started_at,
            finished_at,
            outcomes,
        };
        info!(
            reports = run.outcomes.len(),
            failed = run.failures(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "Report run finished"
        );
        run
    }
}
