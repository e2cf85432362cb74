// Single-commodity savings scenario: what moving one item to a target cost is worth.
use crate::config::settings::ScenarioSettings;
use shared::models::{BaselineSource, ScenarioProjection};
use tracing::warn;

pub fn annual_savings(baseline_cost: f64, target_cost: f64, weekly_volume: f64, weeks_per_year: f64) -> f64 {
    (baseline_cost - target_cost) * weekly_volume * weeks_per_year
}

/// Builds the projection. `observed_baseline` is the parsed landed cost of the
/// first matching sheet row; when absent the configured fallback is used.
pub fn project_scenario(
    settings: &ScenarioSettings,
    weeks_per_year: f64,
    product: Option<String>,
    observed_baseline: Option<f64>,
) -> ScenarioProjection {
    let (baseline_cost, baseline_source) = match observed_baseline {
        Some(cost) => (cost, BaselineSource::Observed),
        None => {
            warn!(
                commodity = %settings.commodity,
                fallback = settings.fallback_baseline_cost,
                "Baseline cost missing or unparseable, using fallback"
            );
            (settings.fallback_baseline_cost, BaselineSource::Fallback)
        }
    };

    let savings = annual_savings(baseline_cost, settings.target_cost, settings.weekly_volume, weeks_per_year);

    ScenarioProjection {
        commodity: settings.commodity.clone(),
        product,
        baseline_cost,
        baseline_source,
        target_cost: settings.target_cost,
        weekly_volume: settings.weekly_volume,
        annual_savings: savings,
        fee_rate: settings.fee_rate,
        fee: savings * settings.fee_rate,
    }
}
