//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Regime;

use super::types::{Jurisdiction, JurisdictionConfig, RuleConfig, RulesFile};

/// Loads and provides access to rule configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query thresholds and the jurisdiction allow-list.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rules.yaml          # Thresholds and week boundary policy
/// └── jurisdictions.yaml  # Jurisdiction allow-list and default regime
/// ```
///
/// # Example
///
/// ```no_run
/// use overtime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Weekly cap: {}", loader.config().thresholds().weekly_regular_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RuleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The thresholds or jurisdiction tokens fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<RulesFile>(&path.join("rules.yaml"))?;
        let jurisdictions = Self::load_yaml::<JurisdictionConfig>(&path.join("jurisdictions.yaml"))?;

        let config = RuleConfig::new(rules.thresholds, rules.week_boundary, jurisdictions);
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            jurisdictions = config.jurisdictions().jurisdictions.len(),
            default_regime = %config.jurisdictions().default_regime,
            "Loaded rule configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: RuleConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rule configuration.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Consumes the loader and returns the rule configuration.
    pub fn into_config(self) -> RuleConfig {
        self.config
    }

    /// Gets a jurisdiction by its token.
    pub fn get_jurisdiction(&self, token: &str) -> Option<&Jurisdiction> {
        self.config.jurisdictions().get(token)
    }

    /// Returns the fail-open default regime.
    pub fn default_regime(&self) -> Regime {
        self.config.jurisdictions().default_regime
    }
}
