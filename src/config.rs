//! Configuration management for the CV analyzer

use crate::error::{CvAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub senior_keywords: Vec<String>,
    pub junior_keywords: Vec<String>,
    pub senior_min_years: u32,
    pub junior_max_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub bonus_weight: f64,
    pub bonus_cap: f64,
    pub levels: LevelThresholds,
}

/// Lower bounds (inclusive) of each score level. Anything below `fair` is POOR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub gap_priority: u8,
    pub gap_reason: String,
    pub weeks_per_step: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// TOML file replacing the built-in taxonomy, relations and curricula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub extraction_timeout_secs: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            excellent: 80.0,
            good: 60.0,
            fair: 40.0,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            senior_keywords: ["senior", "lead", "principal", "architect", "trưởng nhóm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            junior_keywords: ["junior", "intern", "fresher", "trainee", "thực tập"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            senior_min_years: 5,
            junior_max_years: 2,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bonus_weight: 0.2,
            bonus_cap: 20.0,
            levels: LevelThresholds::default(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            gap_priority: 7,
            gap_reason: "Required by the target position".to_string(),
            weeks_per_step: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            recommendation: RecommendationConfig::default(),
            reference: ReferenceConfig::default(),
            input: InputConfig {
                extraction_timeout_secs: 30,
                enable_cache: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CvAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CvAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-analyzer")
            .join("config.toml")
    }

    /// Reject settings that would make scoring or recommendations ambiguous
    pub fn validate(&self) -> Result<()> {
        let levels = &self.scoring.levels;
        if !(levels.excellent > levels.good && levels.good > levels.fair && levels.fair >= 0.0) {
            return Err(CvAnalyzerError::Configuration(format!(
                "Score level thresholds must be strictly descending and non-negative \
                 (excellent={}, good={}, fair={})",
                levels.excellent, levels.good, levels.fair
            )));
        }

        if self.scoring.bonus_weight < 0.0 || self.scoring.bonus_cap < 0.0 {
            return Err(CvAnalyzerError::Configuration(
                "Bonus weight and bonus cap must be non-negative".to_string(),
            ));
        }

        if !(1..=10).contains(&self.recommendation.gap_priority) {
            return Err(CvAnalyzerError::Configuration(format!(
                "Gap priority must be between 1 and 10, got {}",
                self.recommendation.gap_priority
            )));
        }

        if self.extraction.junior_max_years >= self.extraction.senior_min_years {
            return Err(CvAnalyzerError::Configuration(format!(
                "junior_max_years ({}) must be lower than senior_min_years ({})",
                self.extraction.junior_max_years, self.extraction.senior_min_years
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.bonus_cap, 20.0);
        assert_eq!(config.recommendation.gap_priority, 7);
    }

    #[test]
    fn test_overlapping_thresholds_rejected() {
        let mut config = Config::default();
        config.scoring.levels.good = 90.0;
        assert!(matches!(config.validate(), Err(CvAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_gap_priority_out_of_range_rejected() {
        let mut config = Config::default();
        config.recommendation.gap_priority = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip_keeps_custom_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.recommendation.weeks_per_step = 3;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.recommendation.weeks_per_step, 3);
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
        assert!(loaded.reference.data_path.is_none());
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CvAnalyzerError::Configuration(_))));
    }
}
