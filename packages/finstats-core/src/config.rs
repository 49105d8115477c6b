//! Report configuration and persistence.

use crate::performance::check_periods;
use crate::risk::check_confidence;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters for a full statistics report.
///
/// The engine functions take these values as explicit arguments; this struct
/// only bundles them for the report and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    /// Confidence level for VaR and Expected Shortfall
    pub confidence: f64,
    /// Return periods per year (252 daily, 52 weekly, 12 monthly)
    pub periods_per_year: u32,
    /// Annual risk-free rate, spread evenly over the periods of a year
    pub annual_risk_free: f64,
    /// Delta degrees of freedom for the standard deviation
    pub ddof: usize,
    /// Target return for downside deviation and the Sortino ratio
    pub target_return: f64,
    /// Starting level of indexed returns
    pub index_base: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            periods_per_year: 252,
            annual_risk_free: 0.022,
            ddof: crate::risk::DEFAULT_DDOF,
            target_return: crate::performance::DEFAULT_TARGET_RETURN,
            index_base: crate::indexed::DEFAULT_BASE,
        }
    }
}

impl StatsConfig {
    /// Default config file path: `~/.finstats/config.json`.
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".finstats/config.json"))
            .unwrap_or_else(|| PathBuf::from("finstats.json"))
    }

    /// Load a config file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check every field against the ranges the metric functions accept.
    pub fn validate(&self) -> Result<()> {
        check_confidence(self.confidence)?;
        check_periods(self.periods_per_year)?;

        if !self.annual_risk_free.is_finite() {
            return Err(Error::Validation(format!(
                "annual_risk_free must be finite, got {}",
                self.annual_risk_free
            )));
        }
        if !self.target_return.is_finite() {
            return Err(Error::Validation(format!(
                "target_return must be finite, got {}",
                self.target_return
            )));
        }
        if !self.index_base.is_finite() || self.index_base <= 0.0 {
            return Err(Error::Validation(format!(
                "index_base must be finite and positive, got {}",
                self.index_base
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(StatsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = StatsConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, StatsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let config = StatsConfig {
            confidence: 0.99,
            periods_per_year: 12,
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(StatsConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "periods_per_year": 52 }"#).unwrap();

        let config = StatsConfig::load(&path).unwrap();
        assert_eq!(config.periods_per_year, 52);
        assert_eq!(config.confidence, 0.95);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "confidence": 1.5 }"#).unwrap();
        assert!(matches!(StatsConfig::load(&path), Err(Error::Validation(_))));

        let zero_periods = StatsConfig {
            periods_per_year: 0,
            ..Default::default()
        };
        assert!(matches!(zero_periods.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(StatsConfig::load(&path), Err(Error::Json(_))));
    }
}
