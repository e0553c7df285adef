//! Path management for the pantry
//!
//! ## Path Resolution Order
//!
//! 1. `PANTRY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pantry` or `~/.config/pantry`
//! 3. Windows: `%APPDATA%\pantry`

use std::path::PathBuf;

use crate::error::PantryError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PANTRY_DATA_DIR";

/// Manages all paths used by the pantry
#[derive(Debug, Clone)]
pub struct PantryPaths {
    base_dir: PathBuf,
}

impl PantryPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is set.
    pub fn new() -> Result<Self, PantryError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create PantryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the collection files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir().join("inventory.json")
    }

    pub fn donations_file(&self) -> PathBuf {
        self.data_dir().join("donations.json")
    }

    pub fn distributions_file(&self) -> PathBuf {
        self.data_dir().join("distributions.json")
    }

    pub fn households_file(&self) -> PathBuf {
        self.data_dir().join("households.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PantryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PantryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PantryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the pantry has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PantryError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                PantryError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("pantry"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PantryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PantryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("pantry"))
}
