//! Linear support vector machine.
//!
//! Pegasos updates with the step size `1 / (lambda * (t + t0))`, where the
//! offset `t0 = 1 / lambda` keeps the first step at 1. The model has no
//! probability output; callers fall back to [`BinaryClassifier::predict`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::estimator::sgd::{LinearModel, Loss, SgdParams, fit_sgd};
use crate::ml::estimator::{BinaryClassifier, check_training_data};
use crate::ml::sparse::SparseVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvm {
    lambda: f64,
    epochs: usize,
    seed: u64,
    model: LinearModel,
}

impl LinearSvm {
    pub fn new(lambda: f64, epochs: usize, seed: u64) -> Self {
        LinearSvm {
            lambda,
            epochs,
            seed,
            model: LinearModel::default(),
        }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

impl BinaryClassifier for LinearSvm {
    fn fit(&mut self, features: &[SparseVector], targets: &[bool]) -> Result<()> {
        check_training_data(features, targets)?;
        // eta0 / (1 + lambda * eta0 * t) with eta0 = 1 is the offset Pegasos schedule
        let params = SgdParams {
            alpha: self.lambda,
            eta0: 1.0,
            epochs: self.epochs,
            tol: 0.0,
            seed: self.seed,
        };
        self.model = fit_sgd(Loss::Hinge, &params, features, targets);
        Ok(())
    }

    fn decision_function(&self, features: &SparseVector) -> f64 {
        self.model.decision(features)
    }

    fn predict_proba(&self, _features: &SparseVector) -> Option<f64> {
        None
    }

    fn name(&self) -> &'static str {
        "linear-svm"
    }
}
