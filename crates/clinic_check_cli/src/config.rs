//! Configuration management for the ClinicCheck CLI.
//!
//! This module provides functionality for loading and saving configuration
//! files for the ClinicCheck CLI application. The configuration carries the
//! base URL of the clinic API under test plus the flow settings (account
//! credentials and fixture values) consumed by `clinic_check_core`.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current
//! directory. Every field has a default reproducing the standard seeded
//! smoke-test scenario, so a missing file is not an error for `run`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clinic_check_core::FlowConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "clinic-check.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the ClinicCheck CLI application.
///
/// Combines the CLI-specific base URL with the core flow configuration,
/// which is flattened so its `[admin]`, `[patient]`, `[doctor]`, and
/// `[fixtures]` tables sit at the top level of the file.
///
/// # Example TOML Configuration
///
/// ```toml
/// base_url = "http://localhost:8080"
///
/// [admin]
/// email = "admin@clinic.test"
/// password = "Admin@123"
///
/// [fixtures]
/// department_name = "Cardiology Test"
/// schedule_day = "Monday"
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the clinic API under test
    #[serde(default = "AppConfig::default_base_url")]
    pub base_url: String,

    /// Flow settings (credentials and fixtures)
    #[serde(flatten)]
    pub flow: FlowConfig,
}

impl AppConfig {
    fn default_base_url() -> String {
        "http://localhost:8080".to_string()
    }

    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path to the configuration file to load
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read due to permissions or I/O issues
    /// - The file contains invalid TOML syntax or an unexpected structure
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Saves the configuration to a TOML file at the specified path.
    ///
    /// Creates parent directories automatically if they don't exist and
    /// overwrites existing files at the target path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            flow: FlowConfig::default(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// # Arguments
///
/// * `config_path` - Optional path to a specific configuration file
///
/// # Behaviour
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./clinic-check.toml` in the
///   current directory
/// - Falls back to the current directory if unable to determine the working
///   directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
