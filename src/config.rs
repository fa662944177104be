//! Trainer configuration. Paths and the seed are fixed per run and passed into the pipeline.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Exported session records (CSV)
    pub data_path: PathBuf,
    /// Where the fitted model artifact is written
    pub model_path: PathBuf,
    /// Seed shared by the train/test split and the forest
    pub seed: u64,
    /// Train/test partitioning
    pub split: SplitConfig,
    /// Random forest parameters
    pub forest: ForestConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of rows held out for evaluation, in (0, 1)
    pub test_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_estimators: usize,
    /// None grows trees until leaves are pure
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Draw a bootstrap sample per tree
    pub bootstrap: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("cheat_data.csv"),
            model_path: PathBuf::from("cheat_detection_model.json"),
            seed: 42,
            split: SplitConfig::default(),
            forest: ForestConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { test_ratio: 0.2 }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TrainerConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {}", path.display(), e)))?;
        let config: TrainerConfig = serde_json::from_str(&data)
            .map_err(|e| PipelineError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.split.test_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(PipelineError::Config(format!(
                "split.test_ratio must be in (0, 1), got {}",
                ratio
            )));
        }
        if self.forest.n_estimators == 0 {
            return Err(PipelineError::Config("forest.n_estimators must be > 0".into()));
        }
        if self.forest.min_samples_split < 2 {
            return Err(PipelineError::Config(
                "forest.min_samples_split must be >= 2".into(),
            ));
        }
        if self.forest.min_samples_leaf == 0 {
            return Err(PipelineError::Config(
                "forest.min_samples_leaf must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let c = TrainerConfig::load(std::path::Path::new("no-such-config.json")).unwrap();
        assert_eq!(c.seed, 42);
        assert_eq!(c.forest.n_estimators, 100);
        assert!((c.split.test_ratio - 0.2).abs() < 1e-12);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"seed": 7, "forest": {{"n_estimators": 10}}}}"#).unwrap();
        let c = TrainerConfig::load(f.path()).unwrap();
        assert_eq!(c.seed, 7);
        assert_eq!(c.forest.n_estimators, 10);
        assert_eq!(c.forest.min_samples_split, 2);
        assert_eq!(c.data_path, PathBuf::from("cheat_data.csv"));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not json").unwrap();
        assert!(matches!(
            TrainerConfig::load(f.path()),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_ratio() {
        let mut c = TrainerConfig::default();
        c.split.test_ratio = 1.0;
        assert!(c.validate().is_err());
        c.split.test_ratio = 0.0;
        assert!(c.validate().is_err());
    }
}
