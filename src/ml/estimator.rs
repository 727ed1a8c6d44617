//! Binary estimators used by the one-vs-rest ensemble.

pub mod linear_svm;
pub mod logistic;
pub mod sgd;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReeltagError, Result};
use crate::ml::estimator::linear_svm::LinearSvm;
use crate::ml::estimator::logistic::LogisticRegression;
use crate::ml::sparse::SparseVector;

/// A two-class classifier over sparse features.
pub trait BinaryClassifier: Send + Sync {
    /// Fit on feature rows and their boolean targets.
    fn fit(&mut self, features: &[SparseVector], targets: &[bool]) -> Result<()>;

    /// Raw decision score; positive means the positive class.
    fn decision_function(&self, features: &SparseVector) -> f64;

    /// Probability of the positive class, when the estimator provides one.
    fn predict_proba(&self, features: &SparseVector) -> Option<f64>;

    /// Hard decision.
    fn predict(&self, features: &SparseVector) -> bool {
        self.decision_function(features) > 0.0
    }

    /// Short estimator name.
    fn name(&self) -> &'static str;
}

/// Hyper-parameters of the per-label estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimatorConfig {
    /// Logistic regression fitted by SGD.
    Logistic {
        /// L2 regularization strength.
        alpha: f64,
        /// Initial learning rate.
        eta0: f64,
        epochs: usize,
        /// Early-stopping tolerance on the mean epoch loss.
        tol: f64,
    },
    /// Linear SVM fitted with Pegasos-style updates.
    LinearSvm {
        /// Regularization strength (Pegasos lambda).
        lambda: f64,
        epochs: usize,
    },
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::logistic()
    }
}

impl EstimatorConfig {
    /// Logistic regression with default hyper-parameters.
    pub fn logistic() -> Self {
        EstimatorConfig::Logistic {
            alpha: 1e-5,
            eta0: 1.0,
            epochs: 15,
            tol: 1e-4,
        }
    }

    /// Linear SVM with default hyper-parameters.
    pub fn linear_svm() -> Self {
        EstimatorConfig::LinearSvm {
            lambda: 1e-4,
            epochs: 15,
        }
    }

    /// The name used on the command line and in metadata.
    pub fn name(&self) -> &'static str {
        match self {
            EstimatorConfig::Logistic { .. } => "logistic",
            EstimatorConfig::LinearSvm { .. } => "linear-svm",
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (strength, epochs) = match *self {
            EstimatorConfig::Logistic {
                alpha,
                eta0,
                epochs,
                tol,
            } => {
                if !(eta0.is_finite() && eta0 > 0.0) {
                    return Err(ReeltagError::configuration(format!(
                        "eta0 must be positive, got {eta0}"
                    )));
                }
                if !(tol.is_finite() && tol >= 0.0) {
                    return Err(ReeltagError::configuration(format!(
                        "tol must be non-negative, got {tol}"
                    )));
                }
                (alpha, epochs)
            }
            EstimatorConfig::LinearSvm { lambda, epochs } => (lambda, epochs),
        };

        if !(strength.is_finite() && strength > 0.0) {
            return Err(ReeltagError::configuration(format!(
                "{} regularization must be positive, got {strength}",
                self.name()
            )));
        }
        // The first SGD step shrinks the weights by 1 - strength * eta0.
        let eta0 = match *self {
            EstimatorConfig::Logistic { eta0, .. } => eta0,
            EstimatorConfig::LinearSvm { .. } => 1.0,
        };
        if strength * eta0 >= 1.0 {
            return Err(ReeltagError::configuration(format!(
                "{} regularization times step size must be below 1, got {}",
                self.name(),
                strength * eta0
            )));
        }
        if epochs == 0 {
            return Err(ReeltagError::configuration("epochs must be at least 1"));
        }
        Ok(())
    }

    /// An unfitted estimator with these hyper-parameters.
    pub fn build(&self, seed: u64) -> BinaryEstimator {
        match *self {
            EstimatorConfig::Logistic {
                alpha,
                eta0,
                epochs,
                tol,
            } => BinaryEstimator::Logistic(LogisticRegression::new(alpha, eta0, epochs, tol, seed)),
            EstimatorConfig::LinearSvm { lambda, epochs } => {
                BinaryEstimator::LinearSvm(LinearSvm::new(lambda, epochs, seed))
            }
        }
    }
}

impl FromStr for EstimatorConfig {
    type Err = ReeltagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "logistic" => Ok(EstimatorConfig::logistic()),
            "linear-svm" | "linear_svm" | "svm" => Ok(EstimatorConfig::linear_svm()),
            other => Err(ReeltagError::configuration(format!(
                "unknown estimator '{other}', expected 'logistic' or 'linear-svm'"
            ))),
        }
    }
}

impl fmt::Display for EstimatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicts the single class seen during training.
///
/// Used for labels whose training column is all-positive or all-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantClassifier {
    positive: bool,
}

impl ConstantClassifier {
    pub fn new(positive: bool) -> Self {
        ConstantClassifier { positive }
    }

    pub fn positive(&self) -> bool {
        self.positive
    }
}

impl BinaryClassifier for ConstantClassifier {
    fn fit(&mut self, _features: &[SparseVector], targets: &[bool]) -> Result<()> {
        self.positive = targets.first().copied().unwrap_or(false);
        Ok(())
    }

    fn decision_function(&self, _features: &SparseVector) -> f64 {
        if self.positive { 1.0 } else { -1.0 }
    }

    fn predict_proba(&self, _features: &SparseVector) -> Option<f64> {
        Some(if self.positive { 1.0 } else { 0.0 })
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// Serializable closed set of per-label estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BinaryEstimator {
    Logistic(LogisticRegression),
    LinearSvm(LinearSvm),
    Constant(ConstantClassifier),
}

impl BinaryEstimator {
    fn inner(&self) -> &dyn BinaryClassifier {
        match self {
            BinaryEstimator::Logistic(model) => model,
            BinaryEstimator::LinearSvm(model) => model,
            BinaryEstimator::Constant(model) => model,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn BinaryClassifier {
        match self {
            BinaryEstimator::Logistic(model) => model,
            BinaryEstimator::LinearSvm(model) => model,
            BinaryEstimator::Constant(model) => model,
        }
    }
}

impl BinaryClassifier for BinaryEstimator {
    fn fit(&mut self, features: &[SparseVector], targets: &[bool]) -> Result<()> {
        self.inner_mut().fit(features, targets)
    }

    fn decision_function(&self, features: &SparseVector) -> f64 {
        self.inner().decision_function(features)
    }

    fn predict_proba(&self, features: &SparseVector) -> Option<f64> {
        self.inner().predict_proba(features)
    }

    fn predict(&self, features: &SparseVector) -> bool {
        self.inner().predict(features)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}

/// Shared input checks for the SGD estimators.
pub(crate) fn check_training_data(features: &[SparseVector], targets: &[bool]) -> Result<()> {
    if features.is_empty() {
        return Err(ReeltagError::invalid_input("cannot fit on zero examples"));
    }
    if features.len() != targets.len() {
        return Err(ReeltagError::invalid_input(format!(
            "{} feature rows but {} targets",
            features.len(),
            targets.len()
        )));
    }
    let dim = features[0].dim();
    if features.iter().any(|x| x.dim() != dim) {
        return Err(ReeltagError::invalid_input(
            "feature rows have different dimensions",
        ));
    }
    Ok(())
}
