//! Path management for subsplit
//!
//! Provides XDG-compliant path resolution for configuration and data tables.
//!
//! ## Path Resolution Order
//!
//! 1. `SUBSPLIT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/subsplit` or `~/.config/subsplit`
//! 3. Windows: `%APPDATA%\subsplit`

use std::path::PathBuf;

use crate::error::SubsplitError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SUBSPLIT_DATA_DIR";

/// Manages all paths used by subsplit
#[derive(Debug, Clone)]
pub struct SubsplitPaths {
    /// Base directory for all subsplit files
    base_dir: PathBuf,
}

impl SubsplitPaths {
    /// Create a new SubsplitPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home/config directory
    /// can be determined.
    pub fn new() -> Result<Self, SubsplitError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SubsplitPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/subsplit/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the exported tables
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path of a table file by its table name
    pub fn table_file(&self, table_name: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", table_name))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SubsplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SubsplitError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SubsplitError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if subsplit has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SubsplitError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                SubsplitError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("subsplit"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SubsplitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SubsplitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("subsplit"))
}
