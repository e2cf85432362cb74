// Savings scenario for the configured commodity, priced off the first matching sheet row.
use super::{ReportArtifact, ReportService};
use crate::data::schema::ReportField;
use crate::error::EngineError;
use crate::metrics::scenario::project_scenario;
use crate::transforms::KeywordFilter;
use shared::models::{BaselineSource, ScenarioProjection};
use shared::utils::currency_format::{format_currency, parse_amount};
use tracing::debug;

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let settings = service.settings();
    let scenario = &settings.scenario;
    let columns = service.columns();

    let filter = KeywordFilter::new([scenario.commodity.as_str()]);
    let matches = filter.apply(service.rows(), columns.index(ReportField::Description));
    let Some(first) = matches.first() else {
        return Ok(ReportArtifact::NotApplicable(format!("No {} rows found in data", scenario.commodity)));
    };

    let product = first.get(columns.index(ReportField::Description)).map(str::to_string);
    let observed = first.get(columns.index(ReportField::LandedCost)).and_then(parse_amount);
    debug!(line = first.line, product = ?product, observed_baseline = ?observed, "Scenario baseline row");

    let projection = project_scenario(scenario, settings.projection.weeks_per_year, product, observed);
    debug!(?projection, "Scenario projection");
    Ok(ReportArtifact::Scenario(projection))
}

/// Console lines for the scenario.
pub fn render(projection: &ScenarioProjection) -> String {
    let baseline_note = match projection.baseline_source {
        BaselineSource::Observed => "from sheet",
        BaselineSource::Fallback => "fallback",
    };
    format!(
        "--- {} SCENARIO ---\nBaseline Cost: {} ({})\nTarget Cost: {}\nWeekly Volume: {}\nProjected Annual Savings: {}\nFee ({:.0}%): {}",
        projection.commodity.to_uppercase(),
        format_currency(projection.baseline_cost),
        baseline_note,
        format_currency(projection.target_cost),
        projection.weekly_volume,
        format_currency(projection.annual_savings),
        projection.fee_rate * 100.0,
        format_currency(projection.fee),
    )
}
