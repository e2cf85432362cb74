// Spend ranking: matched items ordered by projected annual spend, with the savings target at the configured rate.
use super::helpers::{item_projection, save};
use super::{ReportArtifact, ReportService};
use crate::error::EngineError;
use crate::metrics::{apply_metric, AnnualSpend, TargetSavings};
use crate::transforms::normalizer::normalize_columns;
use crate::transforms::sort::sort_descending;

pub const REPORT_NAME: &str = "arbitrage_targets";

pub const LANDED_COST_EST: &str = "Landed_Cost_Est";
pub const WEEKLY_VOL: &str = "Weekly_Vol";
pub const EST_ANNUAL_SPEND: &str = "Est_Annual_Spend";

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let settings = service.settings();
    let projection = item_projection(["Product", "FOB_Price", "Pack_Size", "Origin", LANDED_COST_EST, WEEKLY_VOL]);
    let mut table = projection.project(REPORT_NAME, &service.matched_rows(), service.columns())?;

    normalize_columns(&mut table, &[LANDED_COST_EST, WEEKLY_VOL])?;
    apply_metric(
        &mut table,
        &AnnualSpend::new(EST_ANNUAL_SPEND, LANDED_COST_EST, WEEKLY_VOL, settings.projection.weeks_per_year),
    )?;
    apply_metric(&mut table, &TargetSavings::new(EST_ANNUAL_SPEND, settings.projection.savings_rate))?;
    sort_descending(&mut table, EST_ANNUAL_SPEND)?;

    save(&table, &settings.output.path_for(&settings.output.arbitrage_targets))
}
