//! Configuration handling for id generation and rules output

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ids::DEFAULT_ID_PREFIX;

/// User configuration for rendering contexts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplicabilityConfig {
    /// Prefix for generated element ids
    pub id_prefix: Option<String>,
    /// First number handed out by the per-page id counter
    pub first_id: Option<u64>,
    /// Pretty-print the embedded rules JSON
    pub pretty_rules: Option<bool>,
}

impl ApplicabilityConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "applicability", "applicability")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file, defaulting when it is missing
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: ApplicabilityConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn id_prefix(&self) -> &str {
        self.id_prefix.as_deref().unwrap_or(DEFAULT_ID_PREFIX)
    }

    pub fn first_id(&self) -> u64 {
        self.first_id.unwrap_or(1)
    }

    pub fn pretty_rules(&self) -> bool {
        self.pretty_rules.unwrap_or(false)
    }
}
