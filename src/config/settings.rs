//! User settings for subsplit
//!
//! Manages display preferences and the names of the source tables.

use serde::{Deserialize, Serialize};

use super::paths::SubsplitPaths;
use crate::error::SubsplitError;
use crate::storage::Table;

/// Names of the four source tables, as exported from the shared spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    #[serde(default = "default_transactions_table")]
    pub transactions: String,

    #[serde(default = "default_services_table")]
    pub services: String,

    #[serde(default = "default_change_log_table")]
    pub change_log: String,

    #[serde(default = "default_members_table")]
    pub members: String,
}

fn default_transactions_table() -> String {
    "transactions".to_string()
}

fn default_services_table() -> String {
    "service".to_string()
}

fn default_change_log_table() -> String {
    "subscription change log".to_string()
}

fn default_members_table() -> String {
    "summary".to_string()
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            transactions: default_transactions_table(),
            services: default_services_table(),
            change_log: default_change_log_table(),
            members: default_members_table(),
        }
    }
}

impl TableNames {
    /// Configured name for a logical table
    pub fn name(&self, table: Table) -> &str {
        match table {
            Table::Transactions => &self.transactions,
            Table::Services => &self.services,
            Table::ChangeLog => &self.change_log,
            Table::Members => &self.members,
        }
    }
}

/// User settings for subsplit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for "available until" dates (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Source table names
    #[serde(default)]
    pub tables: TableNames,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "฿".to_string()
}

fn default_date_format() -> String {
    "%b %d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            tables: TableNames::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SubsplitPaths) -> Result<Self, SubsplitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SubsplitError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SubsplitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SubsplitPaths) -> Result<(), SubsplitError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SubsplitError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SubsplitError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "฿");
        assert_eq!(settings.date_format, "%b %d");
        assert_eq!(settings.tables.name(Table::Members), "summary");
        assert_eq!(
            settings.tables.name(Table::ChangeLog),
            "subscription change log"
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubsplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.tables.members = "people".into();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.tables.name(Table::Members), "people");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"tables": {"services": "plans"}}"#).unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.tables.services, "plans");
        assert_eq!(settings.tables.transactions, "transactions");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubsplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, SubsplitError::Config(_)));
    }
}
