//! Configuration management for the placement readiness tool

use crate::error::{Result, ReadinessError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Newest-first history is truncated to this many entries on save
    pub max_history: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Descriptions shorter than this raise an advisory warning
    pub short_jd_warning_chars: usize,
    pub scoring: ScoringConfig,
}

/// Additive weights used by the readiness scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base: u32,
    pub per_category: u32,
    pub category_cap: u32,
    pub company_bonus: u32,
    pub role_bonus: u32,
    pub long_jd_bonus: u32,
    pub long_jd_threshold: usize,
    pub max_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    pub export_dir: PathBuf,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base: 35,
            per_category: 5,
            category_cap: 30,
            company_bonus: 10,
            role_bonus: 10,
            long_jd_bonus: 10,
            long_jd_threshold: 800,
            max_score: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("placement-readiness");

        Self {
            storage: StorageConfig {
                data_dir,
                max_history: 50,
            },
            analysis: AnalysisConfig {
                short_jd_warning_chars: 200,
                scoring: ScoringConfig::default(),
            },
            output: OutputConfig {
                color_output: true,
                export_dir: PathBuf::from("."),
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults on first run.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ReadinessError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ReadinessError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("placement-readiness")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.max_history == 0 {
            return Err(ReadinessError::Configuration(
                "storage.max_history must be at least 1".to_string(),
            ));
        }
        if self.analysis.scoring.max_score == 0 || self.analysis.scoring.max_score > 100 {
            return Err(ReadinessError::Configuration(
                "analysis.scoring.max_score must be within 1..=100".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_weights() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.base, 35);
        assert_eq!(scoring.category_cap, 30);
        assert_eq!(scoring.long_jd_threshold, 800);
    }

    #[test]
    fn test_load_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first.storage.max_history, 50);

        let second = Config::load_from(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_zero_history_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.storage.max_history = 0;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ReadinessError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_config_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "storage = 12").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ReadinessError::Configuration(_))
        ));
    }
}
