// Pipeline settings: the embedded defaults live in assets/config/default.json
// and a user file with the same shape can replace them.
use crate::data::schema::ReportField;
use crate::error::EngineError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    pub version: String,
    pub input: InputSettings,
    pub columns: ColumnSettings,
    pub keywords: Vec<String>,
    pub projection: ProjectionSettings,
    pub scenario: ScenarioSettings,
    pub dashboard: DashboardSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputSettings {
    pub path: PathBuf,
    pub metadata_rows: usize, // Lines above the header row
    pub delimiter: String, // Should be a single byte, but a JSON string is easier
}

impl InputSettings {
    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "input.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

/// Where a semantic field is expected in the sheet.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColumnSpec {
    pub index: usize,
    // Columns without a usable header in the export are located by index only.
    #[serde(default)]
    pub header: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ColumnSettings {
    pub description: ColumnSpec,
    pub fob_price: ColumnSpec,
    pub pack_size: ColumnSpec,
    pub origin: ColumnSpec,
    pub landed_cost: ColumnSpec,
    pub weekly_volume: ColumnSpec,
}

impl ColumnSettings {
    pub fn spec(&self, field: ReportField) -> &ColumnSpec {
        match field {
            ReportField::Description => &self.description,
            ReportField::FobPrice => &self.fob_price,
            ReportField::PackSize => &self.pack_size,
            ReportField::Origin => &self.origin,
            ReportField::LandedCost => &self.landed_cost,
            ReportField::WeeklyVolume => &self.weekly_volume,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectionSettings {
    pub weeks_per_year: f64,
    pub savings_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioSettings {
    pub commodity: String,
    pub target_cost: f64,
    pub fallback_baseline_cost: f64,
    pub weekly_volume: f64,
    pub fee_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub default_status: String,
    // Items listed in the portfolio summary's ranking
    #[serde(default = "default_top_opportunities")]
    pub top_opportunities: usize,
}

fn default_top_opportunities() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub optimization_targets: String,
    pub war_room: String,
    pub arbitrage_targets: String,
    pub mvp_dashboard: String,
}

impl OutputSettings {
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

impl PipelineSettings {
    pub fn load_default() -> Result<Self, EngineError> {
        let config_str = include_str!("../../assets/config/default.json"); // Path relative to this .rs file
        Self::from_json(config_str)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&config_str)
    }

    pub fn from_json(config_str: &str) -> Result<Self, EngineError> {
        let settings: PipelineSettings = serde_json::from_str(config_str)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.input.delimiter_byte()?;

        if self.keywords.is_empty() {
            return Err(EngineError::ConfigError("keywords must not be empty".to_string()));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(EngineError::ConfigError("keywords must not contain blank entries".to_string()));
        }
        if self.scenario.commodity.trim().is_empty() {
            return Err(EngineError::ConfigError("scenario.commodity must not be blank".to_string()));
        }

        if !(self.projection.weeks_per_year > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "projection.weeks_per_year must be positive, got {}",
                self.projection.weeks_per_year
            )));
        }
        check_rate("projection.savings_rate", self.projection.savings_rate)?;
        check_rate("scenario.fee_rate", self.scenario.fee_rate)?;

        if !(self.scenario.weekly_volume >= 0.0) {
            return Err(EngineError::ConfigError(format!(
                "scenario.weekly_volume must not be negative, got {}",
                self.scenario.weekly_volume
            )));
        }
        for (name, value) in [
            ("scenario.target_cost", self.scenario.target_cost),
            ("scenario.fallback_baseline_cost", self.scenario.fallback_baseline_cost),
        ] {
            if !value.is_finite() {
                return Err(EngineError::ConfigError(format!("{} must be a finite number", name)));
            }
        }

        for (name, file) in [
            ("output.optimization_targets", &self.output.optimization_targets),
            ("output.war_room", &self.output.war_room),
            ("output.arbitrage_targets", &self.output.arbitrage_targets),
            ("output.mvp_dashboard", &self.output.mvp_dashboard),
        ] {
            if file.trim().is_empty() {
                return Err(EngineError::ConfigError(format!("{} must not be blank", name)));
            }
        }
        Ok(())
    }
}

fn check_rate(name: &str, rate: f64) -> Result<(), EngineError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(EngineError::ConfigError(format!("{} must be within [0, 1], got {}", name, rate)))
    }
}
