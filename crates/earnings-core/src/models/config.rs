//! Configuration structures for extraction and display.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extraction::MatchPolicy;

use super::display::NOT_AVAILABLE;

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Display configuration.
    pub display: DisplayConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Scope over which rule tokens are matched.
    pub policy: MatchPolicy,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Placeholder for fields that were not found.
    pub not_available: String,

    /// Default output format for the CLI (`table`, `json`, `csv`, `text`).
    pub format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            not_available: NOT_AVAILABLE.to_string(),
            format: "table".to_string(),
        }
    }
}

impl EarningsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EarningsConfig =
            serde_json::from_str(r#"{"extraction": {"policy": "document"}}"#).unwrap();

        assert_eq!(config.extraction.policy, MatchPolicy::Document);
        assert_eq!(config.display.not_available, "N/A");
        assert_eq!(config.display.format, "table");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = EarningsConfig::default();
        config.display.not_available = "—".to_string();
        config.save(&path).unwrap();

        assert_eq!(EarningsConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(EarningsConfig::from_file(&path).is_err());
    }
}
