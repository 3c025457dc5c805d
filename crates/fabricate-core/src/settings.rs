//! Wizard defaults persisted between runs
//!
//! An explicit value loaded once at process start and passed into whatever
//! needs it; there is deliberately no process-wide singleton. Missing file
//! means defaults, and a save failure is the caller's to report.

use crate::fabrication::FabricationError;
use crate::project::ProjectDetails;
use crate::APPLICATION_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "fabricate.yaml";

/// Field defaults offered by the wizard on its next run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub owner_name: String,
    pub owner_email: String,
    pub description: String,
    pub keywords: String,
    pub base_directory: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner_name: String::new(),
            owner_email: String::new(),
            description: String::new(),
            keywords: String::new(),
            base_directory: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Settings {
    /// The standard settings location: `<config_dir>/fabricate/fabricate.yaml`
    pub fn default_path() -> Result<PathBuf, FabricationError> {
        let config_dir = dirs::config_dir().ok_or(FabricationError::NoConfigDir)?;
        Ok(config_dir.join(APPLICATION_NAME).join(SETTINGS_FILENAME))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    /// Carry a completed run's fields forward as the next run's defaults
    pub fn remember(&mut self, details: &ProjectDetails) {
        self.owner_name = details.owner_name.clone();
        self.owner_email = details.owner_email.clone();
        self.description = details.description.clone();
        self.keywords = details.keywords.clone();
        self.base_directory = details.base_directory.clone();
    }
}
