//! L2-regularized logistic regression.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::estimator::sgd::{LinearModel, Loss, SgdParams, fit_sgd, sigmoid};
use crate::ml::estimator::{BinaryClassifier, check_training_data};
use crate::ml::sparse::SparseVector;

/// Logistic regression trained with seeded SGD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    alpha: f64,
    eta0: f64,
    epochs: usize,
    tol: f64,
    seed: u64,
    model: LinearModel,
}

impl LogisticRegression {
    pub fn new(alpha: f64, eta0: f64, epochs: usize, tol: f64, seed: u64) -> Self {
        LogisticRegression {
            alpha,
            eta0,
            epochs,
            tol,
            seed,
            model: LinearModel::default(),
        }
    }

    /// Learned weights and intercept.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

impl BinaryClassifier for LogisticRegression {
    fn fit(&mut self, features: &[SparseVector], targets: &[bool]) -> Result<()> {
        check_training_data(features, targets)?;
        let params = SgdParams {
            alpha: self.alpha,
            eta0: self.eta0,
            epochs: self.epochs,
            tol: self.tol,
            seed: self.seed,
        };
        self.model = fit_sgd(Loss::Log, &params, features, targets);
        Ok(())
    }

    fn decision_function(&self, features: &SparseVector) -> f64 {
        self.model.decision(features)
    }

    fn predict_proba(&self, features: &SparseVector) -> Option<f64> {
        Some(sigmoid(self.decision_function(features)))
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}
