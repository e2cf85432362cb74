// Resolves the configured column positions against the sheet's header row.
//
// Positions are validated once per loaded file: a field with an expected header
// must find that header (at its configured index or, failing that, anywhere in
// the row); a field without one must at least fall inside the header width.
use crate::config::settings::{ColumnSettings, ColumnSpec};
use crate::error::EngineError;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    Description,
    FobPrice,
    PackSize,
    Origin,
    LandedCost,
    WeeklyVolume,
}

impl ReportField {
    pub const ALL: [ReportField; 6] = [
        ReportField::Description,
        ReportField::FobPrice,
        ReportField::PackSize,
        ReportField::Origin,
        ReportField::LandedCost,
        ReportField::WeeklyVolume,
    ];

    /// Settings key for the field.
    pub fn key(&self) -> &'static str {
        match self {
            ReportField::Description => "description",
            ReportField::FobPrice => "fob_price",
            ReportField::PackSize => "pack_size",
            ReportField::Origin => "origin",
            ReportField::LandedCost => "landed_cost",
            ReportField::WeeklyVolume => "weekly_volume",
        }
    }
}

/// Field positions validated against one loaded sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 6],
}

impl ColumnMap {
    pub fn resolve(headers: &[String], columns: &ColumnSettings) -> Result<Self, EngineError> {
        let mut indices = [0; 6];
        for (slot, field) in indices.iter_mut().zip(ReportField::ALL) {
            *slot = resolve_field(field, columns.spec(field), headers)?;
        }
        let map = ColumnMap { indices };
        debug!(?map, "Resolved sheet columns");
        Ok(map)
    }

    pub fn index(&self, field: ReportField) -> usize {
        self.indices[field as usize]
    }
}

fn header_matches(found: &str, expected: &str) -> bool {
    found.trim().eq_ignore_ascii_case(expected.trim())
}

fn resolve_field(field: ReportField, spec: &ColumnSpec, headers: &[String]) -> Result<usize, EngineError> {
    let width = headers.len();

    let Some(expected) = &spec.header else {
        if spec.index < width {
            return Ok(spec.index);
        }
        return Err(EngineError::ColumnOutOfRange {
            field: field.key().to_string(),
            index: spec.index,
            width,
        });
    };

    if headers.get(spec.index).is_some_and(|h| header_matches(h, expected)) {
        return Ok(spec.index);
    }

    match headers.iter().position(|h| header_matches(h, expected)) {
        Some(found) => {
            warn!(
                field = field.key(),
                header = %expected,
                configured_index = spec.index,
                found_index = found,
                "Expected header found at a different position, using it"
            );
            Ok(found)
        }
        None => Err(EngineError::SchemaError(format!(
            "Expected header '{}' for '{}' not found (configured index {}, header there is {:?})",
            expected,
            field.key(),
            spec.index,
            headers.get(spec.index).map(String::as_str).unwrap_or("<none>")
        ))),
    }
}
