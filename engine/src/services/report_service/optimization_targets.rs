// Candidate items for supplier negotiation: description, FOB, pack and landed cost as they appear in the sheet.
use super::helpers::save;
use super::{ReportArtifact, ReportService};
use crate::data::schema::ReportField;
use crate::error::EngineError;
use crate::transforms::Projection;

pub const REPORT_NAME: &str = "optimization_targets";

pub fn generate(service: &ReportService<'_>) -> Result<ReportArtifact, EngineError> {
    let projection = Projection::new([
        (ReportField::Description, "Description"),
        (ReportField::FobPrice, "FOB_Price"),
        (ReportField::PackSize, "Pack_Size"),
        (ReportField::LandedCost, "Est_Landed_Cost"),
    ]);
    let table = projection.project(REPORT_NAME, &service.matched_rows(), service.columns())?;

    let output = &service.settings().output;
    save(&table, &output.path_for(&output.optimization_targets))
}
