//! User settings for the pantry
//!
//! Display preferences and reporting thresholds, stored in `config.json`.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::PantryPaths;
use crate::error::PantryError;
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default number of rows in the most-distributed report
    #[serde(default = "default_report_top_n")]
    pub report_top_n: usize,

    /// Items at or below this quantity are flagged as low stock
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Window used by the expiring stock report
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_report_top_n() -> usize {
    10
}

fn default_low_stock_threshold() -> u32 {
    5
}

fn default_expiry_warning_days() -> u32 {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            report_top_n: default_report_top_n(),
            low_stock_threshold: default_low_stock_threshold(),
            expiry_warning_days: default_expiry_warning_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &PantryPaths) -> Result<Self, PantryError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - `pantry init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PantryError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PantryError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would break formatting later
    pub fn validate(&self) -> Result<(), PantryError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(PantryError::Config(format!(
                "Invalid date format: {}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PantryPaths) -> Result<(), PantryError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
