// Totals across all matched items: annualized spend and savings at the target
// rate, plus the items with the most to gain.
use super::helpers::item_projection;
use super::{ReportArtifact, ReportService};
use crate::error::EngineError;
use crate::metrics::savings::{target_price, target_savings};
use crate::metrics::spend::annual_spend;
use crate::transforms::normalizer::normalize_columns;
use chrono::Utc;
use shared::models::{FieldValue, Opportunity, PortfolioSummary};
use shared::utils::currency_format::format_currency;
use std::cmp::Ordering;
use tracing::debug;

pub const REPORT_NAME: &str = "portfolio_summary";

const PRODUCT: &str = "Product";
const LANDED: &str = "Landed";
const WEEKLY: &str = "Weekly";

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let settings = service.settings();
    let rate = settings.projection.savings_rate;
    let projection = item_projection([PRODUCT, "FOB", "Pack", "Origin", LANDED, WEEKLY]);
    let mut table = projection.project(REPORT_NAME, &service.matched_rows(), service.columns())?;
    normalize_columns(&mut table, &[LANDED, WEEKLY])?;

    let products = table.column_values(PRODUCT)?;
    let landed = table.column_values(LANDED)?;
    let weekly = table.column_values(WEEKLY)?;

    let mut priced_items = 0;
    let mut total_annual_spend = 0.0;
    let mut opportunities = Vec::new();
    for ((product, cost), volume) in products.iter().zip(&landed).zip(&weekly) {
        let Some(spend) = annual_spend(cost.as_number(), volume.as_number(), settings.projection.weeks_per_year) else {
            continue;
        };
        priced_items += 1;
        total_annual_spend += spend;

        // Zero-cost lines carry no opportunity.
        if let (FieldValue::Text(product), Some(cost)) = (product, cost.as_number()) {
            if cost > 0.0 {
                opportunities.push(opportunity(product, cost, spend, rate));
            }
        }
    }

    opportunities.sort_by(|a, b| b.annual_savings.partial_cmp(&a.annual_savings).unwrap_or(Ordering::Equal));
    opportunities.truncate(settings.dashboard.top_opportunities);
    debug!(ranked = opportunities.len(), limit = settings.dashboard.top_opportunities, "Ranked opportunities");

    let summary = PortfolioSummary {
        generated_at: Utc::now(),
        matched_items: table.len(),
        priced_items,
        total_annual_spend,
        total_target_savings: target_savings(Some(total_annual_spend), rate).unwrap_or(0.0),
        savings_rate: rate,
        top_opportunities: opportunities,
    };
    Ok(ReportArtifact::Portfolio(summary))
}

fn opportunity(product: &str, landed_cost: f64, annual_spend: f64, rate: f64) -> Opportunity {
    let target = target_price(landed_cost, rate);
    let annual_savings = target_savings(Some(annual_spend), rate).unwrap_or(0.0);
    Opportunity {
        product: product.to_string(),
        landed_cost,
        target_price: target,
        savings_per_case: landed_cost - target,
        current_annual_cost: annual_spend,
        optimized_annual_cost: annual_spend - annual_savings,
        annual_savings,
    }
}

/// Console lines for the summary.
pub fn render(summary: &PortfolioSummary) -> String {
    let mut text = format!(
        "--- PORTFOLIO SUMMARY ---\nMatched Items: {} ({} priced)\nTotal Annual Spend (Est): {}\nPotential Annual Savings ({:.0}%): {}",
        summary.matched_items,
        summary.priced_items,
        format_currency(summary.total_annual_spend),
        summary.savings_rate * 100.0,
        format_currency(summary.total_target_savings),
    );
    if !summary.top_opportunities.is_empty() {
        text.push_str(&format!("\nTop {} Opportunities:", summary.top_opportunities.len()));
        for (rank, item) in summary.top_opportunities.iter().enumerate() {
            text.push_str(&format!(
                "\n  {}. {}: {} -> {} per year (save {}, {} per case)",
                rank + 1,
                item.product,
                format_currency(item.current_annual_cost),
                format_currency(item.optimized_annual_cost),
                format_currency(item.annual_savings),
                format_currency(item.savings_per_case),
            ));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::SheetLoader;
    use crate::test_support::{item_row, settings_for, write_sheet};
    use tempfile::tempdir;

    fn expect_portfolio(artifact: ReportArtifact) -> PortfolioSummary {
        match artifact {
            ReportArtifact::Portfolio(summary) => summary,
            other => panic!("expected a portfolio summary, got {:?}", other),
        }
    }

    #[test]
    fn test_totals_skip_unpriced_items() {
        let sheet = write_sheet(&[
            item_row("APPLE FUJI", "$30.00", "56CT", "USA", "$10.00", "100"),
            item_row("ONION RED", "$12.00", "25LB", "MEXICO", "", "50"),
            item_row("BEEF CHUCK", "$4.00", "60LB", "USA", "$5.00", "1,000"),
            item_row("CARROT", "$9.00", "50LB", "USA", "$10.00", "10"),
        ]);
        let out = tempdir().unwrap();
        let settings = settings_for(sheet.path(), out.path());
        let table = SheetLoader::from_settings(&settings.input).unwrap().load().unwrap();
        let service = ReportService::new(&table, &settings).unwrap();

        let summary = expect_portfolio(generate(&service).unwrap());
        assert_eq!(summary.matched_items, 3);
        assert_eq!(summary.priced_items, 2);
        // (10 * 100 + 5 * 1000) * 52
        assert!((summary.total_annual_spend - 312_000.0).abs() < 1e-6);
        assert!((summary.total_target_savings - 93_600.0).abs() < 1e-6);

        let text = render(&summary);
        assert!(text.contains("Matched Items: 3 (2 priced)"));
        assert!(text.contains("Total Annual Spend (Est): $312,000.00"));
        assert!(text.contains("Potential Annual Savings (30%): $93,600.00"));
    }

    #[test]
    fn test_top_opportunities_ranked_and_limited() {
        let sheet = write_sheet(&[
            item_row("APPLE FUJI", "$30.00", "56CT", "USA", "$10.00", "100"),
            item_row("BEEF CHUCK", "$4.00", "60LB", "USA", "$5.00", "1,000"),
            item_row("RICE JASMINE", "$20.00", "50LB", "THAILAND", "$0.00", "500"),
            item_row("GARLIC PEELED", "$15.00", "30LB", "CHINA", "$40.00", "100"),
            item_row("ONION RED", "$12.00", "25LB", "MEXICO", "N/A", "50"),
        ]);
        let out = tempdir().unwrap();
        let mut settings = settings_for(sheet.path(), out.path());
        settings.dashboard.top_opportunities = 2;
        let table = SheetLoader::from_settings(&settings.input).unwrap().load().unwrap();
        let service = ReportService::new(&table, &settings).unwrap();

        let summary = expect_portfolio(generate(&service).unwrap());
        let ranked: Vec<&str> = summary.top_opportunities.iter().map(|o| o.product.as_str()).collect();
        assert_eq!(ranked, vec!["BEEF CHUCK", "GARLIC PEELED"]);

        let beef = &summary.top_opportunities[0];
        assert!((beef.current_annual_cost - 260_000.0).abs() < 1e-6);
        assert!((beef.annual_savings - 78_000.0).abs() < 1e-6);
        assert!((beef.optimized_annual_cost - 182_000.0).abs() < 1e-6);
        assert!((beef.target_price - 3.5).abs() < 1e-9);
        assert!((beef.savings_per_case - 1.5).abs() < 1e-9);

        let text = render(&summary);
        assert!(text.contains("Top 2 Opportunities:"));
        assert!(text.contains("  1. BEEF CHUCK: $260,000.00 -> $182,000.00 per year (save $78,000.00, $1.50 per case)"));
        assert!(text.contains("  2. GARLIC PEELED:"));
    }

    #[test]
    fn test_no_opportunities_omits_ranking() {
        let sheet = write_sheet(&[item_row("ONION RED", "$12.00", "25LB", "MEXICO", "", "50")]);
        let out = tempdir().unwrap();
        let settings = settings_for(sheet.path(), out.path());
        let table = SheetLoader::from_settings(&settings.input).unwrap().load().unwrap();
        let service = ReportService::new(&table, &settings).unwrap();

        let summary = expect_portfolio(generate(&service).unwrap());
        assert!(summary.top_opportunities.is_empty());
        assert!(!render(&summary).contains("Opportunities"));
    }
}
