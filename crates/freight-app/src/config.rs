//! Configuration management for freight-dispatch
//!
//! Config stored at: ~/.config/freight-dispatch/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use freight_domain::model::DEFAULT_COMPANY_NAME;
use freight_types::{AssignmentPolicy, ConfigError, OutputFormat, Result};

const APP_DIR: &str = "freight-dispatch";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Company data file override
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Distribution policy used when none is given on the command line
    #[serde(default)]
    pub policy: AssignmentPolicy,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Name given to companies created without one
    #[serde(default = "default_company_name")]
    pub default_company_name: String,
}

fn default_company_name() -> String {
    DEFAULT_COMPANY_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            policy: AssignmentPolicy::default(),
            output_format: OutputFormat::default(),
            default_company_name: default_company_name(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Company data file, falling back to the platform data directory
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.data_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir.join("company.json"))
    }

    /// Load config from the default location, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Freight Dispatch Configuration")?;
        writeln!(f, "==============================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data file:      {}",
            self.data_file()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Policy:         {}", self.policy)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Company name:   {}", self.default_company_name)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
