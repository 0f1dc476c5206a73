// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for remediabot

use crate::error::{RemediationError, Result};
use crate::rules::DEFAULT_MAX_ALT_LENGTH;
use crate::violation::WcagLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Highest WCAG level whose rules are run
    pub level: WcagLevel,
    pub max_alt_length: usize,
    /// Rule ids to skip
    pub disabled_rules: Vec<String>,
    /// JSON message catalog for non-English output
    pub locale_catalog: Option<PathBuf>,
    /// Directory names skipped when scanning
    pub exclude: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: WcagLevel::AAA,
            max_alt_length: DEFAULT_MAX_ALT_LENGTH,
            disabled_rules: Vec::new(),
            locale_catalog: None,
            exclude: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "target".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "vendor".to_string(),
                "coverage".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self.disabled_rules.iter().any(|id| id == rule_id)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("remediabot")
        .join("config.toml")
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| RemediationError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| RemediationError::Config(format!("YAML parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/remediabot.toml")).expect("defaults");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_alt_length, 120);
    }

    #[test]
    fn test_load_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
        writeln!(
            file,
            "level = \"AA\"\nmax_alt_length = 100\ndisabled_rules = [\"table-header-scope\"]"
        )
        .expect("write");

        let config = load_config(file.path()).expect("valid config");
        assert_eq!(config.level, WcagLevel::AA);
        assert_eq!(config.max_alt_length, 100);
        assert!(!config.is_rule_enabled("table-header-scope"));
        assert!(config.is_rule_enabled("img-alt"));
        // Unspecified fields keep their defaults
        assert!(config.exclude.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_load_yaml() {
        let mut file = Builder::new().suffix(".yml").tempfile().expect("temp file");
        writeln!(file, "max_alt_length: 80\nlocale_catalog: fr.json").expect("write");

        let config = load_config(file.path()).expect("valid config");
        assert_eq!(config.max_alt_length, 80);
        assert_eq!(config.locale_catalog, Some(PathBuf::from("fr.json")));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
        writeln!(file, "max_alt_length = \"lots\"").expect("write");

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, RemediationError::Config(_)));
    }
}
