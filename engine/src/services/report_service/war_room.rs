// War room tracking sheet: the matched items plus blank negotiation columns.
use super::helpers::{add_tracking_columns, dashboard_projection, save};
use super::{ReportArtifact, ReportService};
use crate::error::EngineError;

pub const REPORT_NAME: &str = "war_room";

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let settings = service.settings();
    let mut table = dashboard_projection().project(REPORT_NAME, &service.matched_rows(), service.columns())?;
    add_tracking_columns(&mut table, &settings.dashboard.default_status)?;

    save(&table, &settings.output.path_for(&settings.output.war_room))
}
