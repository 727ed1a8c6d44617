//! Multi-label genre models.
//!
//! A [`GenreModel`] learns a mapping from normalized movie text to a set of
//! genre labels. Model families are selected through [`ModelFamily`] and
//! constructed with [`build_model`].
//!
//! # Examples
//!
//! ```
//! use reeltag::model::{ModelConfig, build_model};
//!
//! let mut model = build_model(ModelConfig::default()).unwrap();
//!
//! let texts = vec![
//!     "spaceship crew explores distant galaxy".to_string(),
//!     "detective hunts serial killer city".to_string(),
//!     "alien invasion spaceship galaxy war".to_string(),
//!     "killer stalks detective dark city".to_string(),
//! ];
//! let labels = vec![
//!     vec!["Science Fiction".to_string()],
//!     vec!["Crime".to_string()],
//!     vec!["Science Fiction".to_string()],
//!     vec!["Crime".to_string()],
//! ];
//! model.fit(&texts, &labels).unwrap();
//!
//! for genre in model.predict_single("Nebula", "A spaceship lost in the galaxy").unwrap() {
//!     assert!(model.labels().contains(&genre));
//! }
//! ```

pub mod one_vs_rest;
pub mod persistence;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::normalizer::{Normalizer, NormalizerConfig};
use crate::error::{ReeltagError, Result, ensure_exists};
use crate::ml::estimator::EstimatorConfig;
use crate::ml::metrics::Stats;
use crate::ml::vectorizer::VectorizerConfig;
use crate::model::one_vs_rest::OneVsRestModel;

/// The fit/predict contract shared by every model family.
pub trait GenreModel: Send + Sync + fmt::Debug {
    /// Fit on normalized texts and their label sets.
    fn fit(&mut self, texts: &[String], labels: &[Vec<String>]) -> Result<()>;

    /// Predict a label set for each normalized text.
    fn predict(&self, texts: &[String]) -> Result<Vec<Vec<String>>>;

    /// Normalize a raw title/description pair and predict its labels.
    fn predict_single(&self, title: &str, description: &str) -> Result<Vec<String>>;

    /// Micro-averaged precision, recall and F1 against held-out data.
    fn get_stats(&self, texts: &[String], labels: &[Vec<String>]) -> Result<Stats>;

    /// Write the fitted model in the versioned model file format.
    fn save(&self, writer: &mut dyn Write) -> Result<()>;

    fn is_fitted(&self) -> bool;

    fn family(&self) -> ModelFamily;

    fn config(&self) -> &ModelConfig;

    /// The label universe; empty before fitting.
    fn labels(&self) -> &[String];

    /// Training metadata; `None` before fitting.
    fn metadata(&self) -> Option<&ModelMetadata>;

    /// The normalizer applied by [`GenreModel::predict_single`].
    fn normalizer(&self) -> &Normalizer;
}

/// Available model families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    /// One binary classifier per label.
    #[default]
    Ovr,
}

impl FromStr for ModelFamily {
    type Err = ReeltagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ovr" => Ok(ModelFamily::Ovr),
            _ => Err(ReeltagError::configuration(format!(
                "unknown model family '{s}', available: Ovr"
            ))),
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Ovr => write!(f, "Ovr"),
        }
    }
}

/// Everything needed to construct and fit a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub family: ModelFamily,
    /// Probability at or above which a label is assigned.
    pub threshold: f64,
    /// Seed for per-label estimator training.
    pub seed: u64,
    /// Worker threads for per-label fitting.
    pub num_threads: usize,
    pub normalizer: NormalizerConfig,
    pub vectorizer: VectorizerConfig,
    pub estimator: EstimatorConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            family: ModelFamily::Ovr,
            threshold: 0.3,
            seed: 42,
            num_threads: num_cpus::get(),
            normalizer: NormalizerConfig::default(),
            vectorizer: VectorizerConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Read a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure_exists(path)?;
        let content = fs::read_to_string(path)?;
        let config: ModelConfig = serde_json::from_str(&content).map_err(|e| {
            ReeltagError::configuration(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)?;
        if self.num_threads == 0 {
            return Err(ReeltagError::configuration("num_threads must be at least 1"));
        }
        self.vectorizer.validate()?;
        self.estimator.validate()
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ReeltagError::configuration(format!(
            "threshold must be in [0, 1], got {threshold}"
        )))
    }
}

/// Information recorded when a model is fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub id: Uuid,
    pub family: ModelFamily,
    /// Name of the per-label estimator.
    pub estimator: String,
    pub trained_at: DateTime<Utc>,
    pub training_examples: usize,
    pub num_labels: usize,
    pub vocabulary_size: usize,
    /// Version of the crate that fitted the model.
    pub version: String,
}

impl ModelMetadata {
    pub fn new(
        family: ModelFamily,
        estimator: &str,
        training_examples: usize,
        num_labels: usize,
        vocabulary_size: usize,
    ) -> Self {
        ModelMetadata {
            id: Uuid::new_v4(),
            family,
            estimator: estimator.to_string(),
            trained_at: Utc::now(),
            training_examples,
            num_labels,
            vocabulary_size,
            version: crate::VERSION.to_string(),
        }
    }
}

/// Construct an unfitted model for `config.family`.
pub fn build_model(config: ModelConfig) -> Result<Box<dyn GenreModel>> {
    config.validate()?;
    match config.family {
        ModelFamily::Ovr => Ok(Box::new(OneVsRestModel::new(config)?)),
    }
}
