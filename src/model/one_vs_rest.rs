//! One-vs-rest multi-label model.
//!
//! One binary estimator is fitted per label on that label's indicator column.
//! A label is assigned when its estimator's probability reaches the threshold;
//! estimators without probabilities fall back to their hard decision.

use std::io::Write;

use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::error::{ReeltagError, Result};
use crate::ml::binarizer::MultiLabelBinarizer;
use crate::ml::estimator::{BinaryClassifier, BinaryEstimator, ConstantClassifier, EstimatorConfig};
use crate::ml::metrics::{Stats, micro_stats};
use crate::ml::sparse::SparseVector;
use crate::ml::vectorizer::TfIdfVectorizer;
use crate::model::persistence;
use crate::model::{GenreModel, ModelConfig, ModelFamily, ModelMetadata};

/// Everything learned by [`OneVsRestModel::fit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedOneVsRest {
    pub metadata: ModelMetadata,
    pub vectorizer: TfIdfVectorizer,
    pub binarizer: MultiLabelBinarizer,
    /// One estimator per binarizer class, in class order.
    pub estimators: Vec<BinaryEstimator>,
}

impl FittedOneVsRest {
    /// Indicator row for one feature vector.
    fn decide(&self, features: &SparseVector, threshold: f64) -> Vec<bool> {
        self.estimators
            .iter()
            .map(|estimator| match estimator.predict_proba(features) {
                Some(probability) => probability >= threshold,
                None => estimator.predict(features),
            })
            .collect()
    }
}

/// Multi-label model with one binary estimator per label.
#[derive(Debug)]
pub struct OneVsRestModel {
    config: ModelConfig,
    normalizer: Normalizer,
    fitted: Option<FittedOneVsRest>,
}

impl OneVsRestModel {
    /// Create an unfitted model.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = Normalizer::new(config.normalizer.clone())?;
        Ok(OneVsRestModel {
            config,
            normalizer,
            fitted: None,
        })
    }

    /// Reassemble a fitted model from its persisted parts.
    pub fn from_parts(config: ModelConfig, fitted: FittedOneVsRest) -> Result<Self> {
        if fitted.estimators.len() != fitted.binarizer.num_classes() {
            return Err(ReeltagError::corrupt_model(format!(
                "{} estimators for {} labels",
                fitted.estimators.len(),
                fitted.binarizer.num_classes()
            )));
        }
        let mut model = OneVsRestModel::new(config)?;
        model.fitted = Some(fitted);
        Ok(model)
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Fitted state, or `NotFitted`.
    pub fn fitted(&self) -> Result<&FittedOneVsRest> {
        self.fitted.as_ref().ok_or_else(|| {
            ReeltagError::not_fitted("call fit before predicting or saving")
        })
    }

    /// Indicator rows for a batch of normalized texts.
    pub fn predict_indicators(&self, texts: &[String]) -> Result<Vec<Vec<bool>>> {
        let fitted = self.fitted()?;
        let features = fitted.vectorizer.transform_batch(texts)?;
        let threshold = self.config.threshold;
        Ok(features
            .par_iter()
            .map(|x| fitted.decide(x, threshold))
            .collect())
    }

    fn fit_estimators(
        &self,
        features: &[SparseVector],
        indicators: &[Vec<bool>],
        classes: &[String],
    ) -> Result<Vec<BinaryEstimator>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads)
            .thread_name(|i| format!("reeltag-fit-{i}"))
            .build()
            .map_err(|e| ReeltagError::other(format!("Failed to create thread pool: {e}")))?;

        let estimator_config: EstimatorConfig = self.config.estimator;
        let seed = self.config.seed;

        pool.install(|| {
            classes
                .par_iter()
                .enumerate()
                .map(|(j, label)| {
                    let column: Vec<bool> = indicators.iter().map(|row| row[j]).collect();
                    let positives = column.iter().filter(|&&on| on).count();

                    if positives == 0 || positives == column.len() {
                        warn!("label '{label}' is constant in the training data");
                        return Ok(BinaryEstimator::Constant(ConstantClassifier::new(
                            positives > 0,
                        )));
                    }

                    // per-label seeds keep results independent of scheduling
                    let mut estimator = estimator_config.build(seed.wrapping_add(j as u64));
                    estimator.fit(features, &column)?;
                    debug!(
                        "fitted {} for '{label}' ({positives} positive of {})",
                        estimator.name(),
                        column.len()
                    );
                    Ok(estimator)
                })
                .collect::<Result<Vec<_>>>()
        })
    }
}

impl GenreModel for OneVsRestModel {
    fn fit(&mut self, texts: &[String], labels: &[Vec<String>]) -> Result<()> {
        if texts.is_empty() || labels.is_empty() {
            return Err(ReeltagError::invalid_input(
                "texts and labels must not be empty",
            ));
        }
        if texts.len() != labels.len() {
            return Err(ReeltagError::invalid_input(format!(
                "{} texts but {} label sets",
                texts.len(),
                labels.len()
            )));
        }

        info!(
            "fitting {} model with {} estimator on {} examples",
            self.family(),
            self.config.estimator,
            texts.len()
        );

        let mut binarizer = MultiLabelBinarizer::new();
        binarizer.fit(labels);
        if binarizer.num_classes() == 0 {
            return Err(ReeltagError::invalid_input(
                "every label set is empty; nothing to learn",
            ));
        }
        let indicators = binarizer.transform(labels);

        let mut vectorizer = TfIdfVectorizer::new(self.config.vectorizer.clone());
        let features = vectorizer.fit_transform(texts)?;
        info!(
            "vectorized {} examples into {} features",
            features.len(),
            vectorizer.vocabulary_size()
        );

        let estimators = self.fit_estimators(&features, &indicators, binarizer.classes())?;

        let metadata = ModelMetadata::new(
            self.family(),
            self.config.estimator.name(),
            texts.len(),
            binarizer.num_classes(),
            vectorizer.vocabulary_size(),
        );
        info!("fitted {} labels", binarizer.num_classes());

        self.fitted = Some(FittedOneVsRest {
            metadata,
            vectorizer,
            binarizer,
            estimators,
        });
        Ok(())
    }

    fn predict(&self, texts: &[String]) -> Result<Vec<Vec<String>>> {
        let rows = self.predict_indicators(texts)?;
        Ok(self.fitted()?.binarizer.inverse_transform(&rows))
    }

    fn predict_single(&self, title: &str, description: &str) -> Result<Vec<String>> {
        self.fitted()?;
        let text = self.normalizer.normalize_example(title, description)?;
        Ok(self.predict(&[text])?.pop().unwrap_or_default())
    }

    fn get_stats(&self, texts: &[String], labels: &[Vec<String>]) -> Result<Stats> {
        let fitted = self.fitted()?;
        if texts.len() != labels.len() {
            return Err(ReeltagError::invalid_input(format!(
                "{} texts but {} label sets",
                texts.len(),
                labels.len()
            )));
        }

        let unknown = fitted.binarizer.unknown_labels(labels);
        if !unknown.is_empty() {
            warn!(
                "ignoring labels not seen during fit: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        let truth = fitted.binarizer.transform(labels);
        let predicted = self.predict_indicators(texts)?;
        micro_stats(&truth, &predicted)
    }

    fn save(&self, writer: &mut dyn Write) -> Result<()> {
        let fitted = self.fitted()?;
        persistence::write_one_vs_rest(writer, &self.config, fitted)
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn family(&self) -> ModelFamily {
        ModelFamily::Ovr
    }

    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn labels(&self) -> &[String] {
        match &self.fitted {
            Some(fitted) => fitted.binarizer.classes(),
            None => &[],
        }
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        self.fitted.as_ref().map(|fitted| &fitted.metadata)
    }

    fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::vectorizer::{DocumentFrequency, VectorizerConfig};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn corpus() -> (Vec<String>, Vec<Vec<String>>) {
        let texts = strings(&[
            "spaceship galaxy alien planet",
            "galaxy spaceship robot future",
            "detective murder police investigation",
            "murder detective crime gang",
            "spaceship alien murder detective",
            "robot future planet galaxy",
        ]);
        let labels = vec![
            strings(&["SciFi"]),
            strings(&["SciFi"]),
            strings(&["Crime"]),
            strings(&["Crime"]),
            strings(&["Crime", "SciFi"]),
            strings(&["SciFi"]),
        ];
        (texts, labels)
    }

    fn config() -> ModelConfig {
        ModelConfig {
            num_threads: 2,
            vectorizer: VectorizerConfig {
                min_df: DocumentFrequency::Count(1),
                ..VectorizerConfig::default()
            },
            estimator: EstimatorConfig::Logistic {
                alpha: 1e-4,
                eta0: 0.5,
                epochs: 50,
                tol: 0.0,
            },
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_fit_and_predict_training_data() {
        let (texts, labels) = corpus();
        let mut model = OneVsRestModel::new(config()).unwrap();
        model.fit(&texts, &labels).unwrap();

        assert!(model.is_fitted());
        assert_eq!(model.labels(), &["Crime", "SciFi"]);

        let stats = model.get_stats(&texts, &labels).unwrap();
        assert!(stats.f1 > 0.8, "{stats:?}");

        let metadata = model.metadata().unwrap();
        assert_eq!(metadata.training_examples, 6);
        assert_eq!(metadata.num_labels, 2);
        assert_eq!(metadata.estimator, "logistic");
    }

    #[test]
    fn test_unfitted_errors() {
        let model = OneVsRestModel::new(config()).unwrap();
        assert!(matches!(
            model.predict(&strings(&["galaxy"])),
            Err(ReeltagError::NotFitted(_))
        ));
        assert!(matches!(
            model.predict_single("Title", "galaxy"),
            Err(ReeltagError::NotFitted(_))
        ));
        assert!(matches!(
            model.save(&mut Vec::new()),
            Err(ReeltagError::NotFitted(_))
        ));
    }

    #[test]
    fn test_invalid_training_input() {
        let mut model = OneVsRestModel::new(config()).unwrap();
        assert!(matches!(
            model.fit(&[], &[]),
            Err(ReeltagError::InvalidInput(_))
        ));
        assert!(matches!(
            model.fit(&strings(&["a b", "c d"]), &[strings(&["X"])]),
            Err(ReeltagError::InvalidInput(_))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_out_of_vocabulary_text() {
        let (texts, labels) = corpus();
        let mut model = OneVsRestModel::new(config()).unwrap();
        model.fit(&texts, &labels).unwrap();

        let predictions = model.predict(&strings(&["zzz qqq", ""])).unwrap();
        assert_eq!(predictions.len(), 2);
        for labels in predictions {
            assert!(labels.iter().all(|l| model.labels().contains(l)));
        }
    }

    #[test]
    fn test_constant_label_column() {
        let texts = strings(&["galaxy spaceship", "robot planet", "alien galaxy"]);
        let labels = vec![
            strings(&["SciFi"]),
            strings(&["SciFi"]),
            strings(&["SciFi", "Alien"]),
        ];
        let mut model = OneVsRestModel::new(config()).unwrap();
        model.fit(&texts, &labels).unwrap();

        let fitted = model.fitted().unwrap();
        assert!(matches!(fitted.estimators[1], BinaryEstimator::Constant(_)));
        for prediction in model.predict(&texts).unwrap() {
            assert!(prediction.contains(&"SciFi".to_string()));
        }
    }

    #[test]
    fn test_probability_equal_to_threshold_is_assigned() {
        let (texts, genres) = corpus();
        let labels: Vec<Vec<String>> = genres
            .into_iter()
            .map(|mut set| {
                set.push("Feature".to_string());
                set
            })
            .collect();
        let strict = ModelConfig {
            threshold: 1.0,
            ..config()
        };
        let mut model = OneVsRestModel::new(strict).unwrap();
        model.fit(&texts, &labels).unwrap();

        // "Feature" is in every row, so its probability is exactly 1.0
        let fitted = model.fitted().unwrap();
        assert_eq!(fitted.binarizer.classes(), strings(&["Crime", "Feature", "SciFi"]));
        let empty = fitted.vectorizer.transform("").unwrap();
        assert_eq!(fitted.estimators[1].predict_proba(&empty), Some(1.0));
        assert_eq!(fitted.decide(&empty, 1.0), vec![false, true, false]);

        for prediction in model.predict(&texts).unwrap() {
            assert_eq!(prediction, strings(&["Feature"]));
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let (texts, labels) = corpus();
        let all = ModelConfig {
            threshold: 0.0,
            ..config()
        };
        let mut model = OneVsRestModel::new(all).unwrap();
        model.fit(&texts, &labels).unwrap();
        for prediction in model.predict(&texts).unwrap() {
            assert_eq!(prediction, strings(&["Crime", "SciFi"]));
        }

        let none = ModelConfig {
            threshold: 1.0,
            ..config()
        };
        let mut model = OneVsRestModel::new(none).unwrap();
        model.fit(&texts, &labels).unwrap();
        for prediction in model.predict(&texts).unwrap() {
            assert!(prediction.is_empty());
        }
    }

    #[test]
    fn test_hard_decision_fallback() {
        let (texts, labels) = corpus();
        let svm = ModelConfig {
            threshold: 1.0,
            estimator: EstimatorConfig::LinearSvm {
                lambda: 1e-3,
                epochs: 50,
            },
            ..config()
        };
        let mut model = OneVsRestModel::new(svm).unwrap();
        model.fit(&texts, &labels).unwrap();

        // the threshold is not consulted without probabilities
        let predictions = model.predict(&texts).unwrap();
        assert!(predictions.iter().any(|p| !p.is_empty()));
        assert!(model.get_stats(&texts, &labels).unwrap().f1 > 0.8);
    }

    #[test]
    fn test_thread_count_does_not_change_results() {
        let (texts, labels) = corpus();
        let mut one = OneVsRestModel::new(ModelConfig {
            num_threads: 1,
            ..config()
        })
        .unwrap();
        let mut four = OneVsRestModel::new(ModelConfig {
            num_threads: 4,
            ..config()
        })
        .unwrap();
        one.fit(&texts, &labels).unwrap();
        four.fit(&texts, &labels).unwrap();

        assert_eq!(
            one.fitted().unwrap().estimators,
            four.fitted().unwrap().estimators
        );
    }

    #[test]
    fn test_stats_ignore_unseen_labels() {
        let (texts, labels) = corpus();
        let mut model = OneVsRestModel::new(config()).unwrap();
        model.fit(&texts, &labels).unwrap();

        let mut with_unseen = labels.clone();
        with_unseen[0].push("Western".to_string());
        assert_eq!(
            model.get_stats(&texts, &with_unseen).unwrap(),
            model.get_stats(&texts, &labels).unwrap()
        );
    }
}
