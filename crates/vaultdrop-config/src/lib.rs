//! Settings management for Vaultdrop
//!
//! The settings file is YAML with a backend selector and one named section
//! per backend:
//!
//! ```yaml
//! backend: amazon
//! amazon:
//!   bucket: my-drops
//!   region: eu-west-1
//!   prefix: drops
//! ```

pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level settings document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Selected backend section name
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Amazon backend section
    #[serde(default)]
    pub amazon: Option<AmazonSection>,
}

fn default_backend() -> String {
    "amazon".to_string()
}

/// Amazon backend section of the settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmazonSection {
    #[serde(default)]
    pub bucket: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub notification_arn: Option<String>,
}

impl Settings {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The amazon section, validated for required fields.
    pub fn amazon(&self) -> Result<&AmazonSection> {
        let section = self
            .amazon
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSection("amazon".to_string()))?;
        section.validate()?;
        Ok(section)
    }
}

impl AmazonSection {
    /// Required fields checked up front, before any client is built.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.bucket.is_empty() {
            missing.push("bucket");
        }
        if self.region.is_empty() {
            missing.push("region");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!(
                "amazon section is missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Locate the settings file.
///
/// Search order:
/// 1. VDROP_CONFIG environment variable (direct path)
/// 2. Current directory: vaultdrop.yaml, .vaultdrop.yaml
/// 3. ~/.config/vaultdrop/config.yaml
pub fn find_settings_file() -> Result<PathBuf> {
    if let Ok(configured) = std::env::var("VDROP_CONFIG") {
        let path = PathBuf::from(configured);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;
    for filename in ["vaultdrop.yaml", ".vaultdrop.yaml"] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("vaultdrop").join("config.yaml");
        if path.exists() {
            return Ok(path);
        }
    }

    Err(ConfigError::SettingsNotFound)
}
