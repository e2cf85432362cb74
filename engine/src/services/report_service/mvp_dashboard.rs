// MVP dashboard: the war room layout with numeric cost/volume columns, busiest items first.
use super::helpers::{add_tracking_columns, dashboard_projection, save, CURRENT_FOB, CURRENT_LANDED_COST, WEEKLY_VOL};
use super::{ReportArtifact, ReportService};
use crate::error::EngineError;
use crate::transforms::normalizer::normalize_columns;
use crate::transforms::sort::sort_descending;

pub const REPORT_NAME: &str = "mvp_dashboard";

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let settings = service.settings();
    let mut table = dashboard_projection().project(REPORT_NAME, &service.matched_rows(), service.columns())?;

    normalize_columns(&mut table, &[CURRENT_FOB, CURRENT_LANDED_COST, WEEKLY_VOL])?;
    add_tracking_columns(&mut table, &settings.dashboard.default_status)?;
    sort_descending(&mut table, WEEKLY_VOL)?;

    save(&table, &settings.output.path_for(&settings.output.mvp_dashboard))
}
