// Helpers shared by the report handlers
use crate::data::report_writer::write_report;
use crate::data::schema::ReportField;
use crate::error::EngineError;
use crate::transforms::Projection;
use shared::models::{FieldValue, ReportTable};
use std::path::Path;
use tracing::debug;

use super::ReportArtifact;

// Dashboard (war room / MVP) column names
pub const PRODUCT: &str = "Product";
pub const CURRENT_FOB: &str = "Current_FOB";
pub const PACK_SIZE: &str = "Pack_Size";
pub const ORIGIN: &str = "Origin";
pub const CURRENT_LANDED_COST: &str = "Current_Landed_Cost";
pub const WEEKLY_VOL: &str = "Weekly_Vol";

pub const TARGET_SUPPLIER: &str = "Target_Supplier";
pub const TARGET_PRICE_QUOTE: &str = "Target_Price_Quote";
pub const POTENTIAL_SAVINGS: &str = "Potential_Savings";
pub const STATUS: &str = "Status";

const PREVIEW_ROWS: usize = 5;

/// The six item fields in sheet-report order, under the given column names.
pub fn item_projection(names: [&str; 6]) -> Projection {
    let fields = [
        ReportField::Description,
        ReportField::FobPrice,
        ReportField::PackSize,
        ReportField::Origin,
        ReportField::LandedCost,
        ReportField::WeeklyVolume,
    ];
    Projection::new(fields.into_iter().zip(names))
}

pub fn dashboard_projection() -> Projection {
    item_projection([PRODUCT, CURRENT_FOB, PACK_SIZE, ORIGIN, CURRENT_LANDED_COST, WEEKLY_VOL])
}

/// Negotiation tracking columns, blank except for the status.
pub fn add_tracking_columns(table: &mut ReportTable, status: &str) -> Result<(), EngineError> {
    table.add_constant_column(TARGET_SUPPLIER, FieldValue::text(""))?;
    table.add_constant_column(TARGET_PRICE_QUOTE, FieldValue::text(""))?;
    table.add_constant_column(POTENTIAL_SAVINGS, FieldValue::text(""))?;
    table.add_constant_column(STATUS, FieldValue::text(status))?;
    Ok(())
}

pub fn log_preview(table: &ReportTable) {
    for (i, record) in table.records().take(PREVIEW_ROWS).enumerate() {
        debug!(report = %table.name, row = i, values = ?record, "Preview");
    }
}

pub fn save(table: &ReportTable, path: &Path) -> Result<ReportArtifact, EngineError> {
    log_preview(table);
    let rows = write_report(table, path)?;
    Ok(ReportArtifact::Csv {
        path: path.to_path_buf(),
        rows,
    })
}
