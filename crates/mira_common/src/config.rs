//! Mira configuration
//!
//! One TOML file controls the elicitation bounds, the classifier training
//! parameters, and the locations of the dataset and reference tables.
//!
//! The question cap is inclusive: the answer that reaches the cap is still
//! recorded, then the walk stops. "Insufficient evidence" is strictly
//! `yes_count < min_yes_answers`.

use crate::error::{MiraError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Elicitation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElicitationSettings {
    /// Maximum yes/no answers recorded per session (valid: 1-32)
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,

    /// Minimum yes answers required before the classifier runs (valid: 1-16)
    #[serde(default = "default_min_yes_answers")]
    pub min_yes_answers: usize,

    /// Severity scores above this value get the high-severity advisory
    #[serde(default = "default_severity_alert_threshold")]
    pub severity_alert_threshold: i32,
}

fn default_max_questions() -> usize {
    8
}

fn default_min_yes_answers() -> usize {
    3
}

fn default_severity_alert_threshold() -> i32 {
    3
}

impl ElicitationSettings {
    /// Validate and clamp max_questions to valid range (1-32)
    pub fn effective_max_questions(&self) -> usize {
        self.max_questions.clamp(1, 32)
    }

    /// Validate and clamp min_yes_answers to valid range (1-16)
    pub fn effective_min_yes_answers(&self) -> usize {
        self.min_yes_answers.clamp(1, 16)
    }
}

impl Default for ElicitationSettings {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
            min_yes_answers: default_min_yes_answers(),
            severity_alert_threshold: default_severity_alert_threshold(),
        }
    }
}

/// Classifier training settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSettings {
    /// Fraction of dataset rows used for training (valid: 0.5-0.95)
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,

    /// Number of trees in the ensemble (valid: 1-200)
    #[serde(default = "default_trees")]
    pub trees: usize,

    /// Maximum tree depth (valid: 1-64)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// RNG seed for bootstrap sampling
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_train_fraction() -> f64 {
    0.8
}

fn default_trees() -> usize {
    30
}

fn default_max_depth() -> usize {
    16
}

fn default_seed() -> u64 {
    42
}

impl TrainingSettings {
    /// Validate and clamp train_fraction to valid range (0.5-0.95)
    pub fn effective_train_fraction(&self) -> f64 {
        self.train_fraction.clamp(0.5, 0.95)
    }

    /// Validate and clamp trees to valid range (1-200)
    pub fn effective_trees(&self) -> usize {
        self.trees.clamp(1, 200)
    }

    /// Validate and clamp max_depth to valid range (1-64)
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.clamp(1, 64)
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            train_fraction: default_train_fraction(),
            trees: default_trees(),
            max_depth: default_max_depth(),
            seed: default_seed(),
        }
    }
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    #[serde(default = "default_training_out")]
    pub training_out: PathBuf,

    #[serde(default = "default_testing_out")]
    pub testing_out: PathBuf,

    #[serde(default = "default_precautions")]
    pub precautions: PathBuf,

    #[serde(default = "default_severity")]
    pub severity: PathBuf,

    #[serde(default = "default_description")]
    pub description: PathBuf,
}

fn default_dataset() -> PathBuf {
    PathBuf::from("Data/dataset.csv")
}

fn default_training_out() -> PathBuf {
    PathBuf::from("Data/trainingSet.csv")
}

fn default_testing_out() -> PathBuf {
    PathBuf::from("Data/testingSet.csv")
}

fn default_precautions() -> PathBuf {
    PathBuf::from("MasterData/symptom_precaution.csv")
}

fn default_severity() -> PathBuf {
    PathBuf::from("MasterData/Symptom_severity.csv")
}

fn default_description() -> PathBuf {
    PathBuf::from("MasterData/symptom_Description.csv")
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            training_out: default_training_out(),
            testing_out: default_testing_out(),
            precautions: default_precautions(),
            severity: default_severity(),
            description: default_description(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub elicitation: ElicitationSettings,

    #[serde(default)]
    pub training: TrainingSettings,

    #[serde(default)]
    pub paths: DataPaths,
}

impl TriageConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| MiraError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from file if it exists, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Render as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MiraError::Config(e.to_string()))
    }
}
