//! Stochastic gradient descent for L2-regularized linear models over sparse
//! features.
//!
//! The weight vector is stored as `scale * w` so the regularization shrink of
//! every step costs O(1) instead of O(dim); each sample only touches its own
//! non-zero coordinates.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::ml::sparse::SparseVector;

/// Loss minimized by [`fit_sgd`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    /// Logistic loss; the model produces calibrated-ish probabilities.
    Log,
    /// Hinge loss; a linear support vector machine.
    Hinge,
}

impl Loss {
    /// Derivative of the loss with respect to the margin `w·x + b` for a
    /// target `y` in {-1, +1}.
    fn gradient(&self, margin: f64, y: f64) -> f64 {
        match self {
            Loss::Log => -y * sigmoid(-y * margin),
            Loss::Hinge => {
                if y * margin < 1.0 {
                    -y
                } else {
                    0.0
                }
            }
        }
    }

    fn value(&self, margin: f64, y: f64) -> f64 {
        match self {
            Loss::Log => {
                let z = -y * margin;
                // ln(1 + e^z) without overflow
                if z > 0.0 {
                    z + (-z).exp().ln_1p()
                } else {
                    z.exp().ln_1p()
                }
            }
            Loss::Hinge => (1.0 - y * margin).max(0.0),
        }
    }
}

/// Hyper-parameters shared by the SGD-trained estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdParams {
    pub alpha: f64,
    pub eta0: f64,
    pub epochs: usize,
    pub tol: f64,
    pub seed: u64,
}

/// Dense weights plus intercept of a fitted linear model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearModel {
    /// Signed distance-like score `w·x + b`.
    pub fn decision(&self, x: &SparseVector) -> f64 {
        x.dot(&self.weights) + self.bias
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Fit a linear model by SGD with the inverse-scaling step size
/// `eta0 / (1 + alpha * eta0 * t)`.
///
/// Training stops early once the mean epoch loss improves by less than `tol`.
pub fn fit_sgd(
    loss: Loss,
    params: &SgdParams,
    features: &[SparseVector],
    targets: &[bool],
) -> LinearModel {
    let dim = features.first().map_or(0, SparseVector::dim);
    let mut w = vec![0.0; dim];
    let mut scale = 1.0f64;
    let mut bias = 0.0f64;

    let mut order: Vec<usize> = (0..features.len()).collect();
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut t = 0.0f64;
    let mut previous_loss = f64::INFINITY;

    for epoch in 0..params.epochs {
        order.shuffle(&mut rng);
        let mut epoch_loss = 0.0;

        for &i in &order {
            let x = &features[i];
            let y = if targets[i] { 1.0 } else { -1.0 };
            let eta = params.eta0 / (1.0 + params.alpha * params.eta0 * t);
            t += 1.0;

            let margin = scale * x.dot(&w) + bias;
            epoch_loss += loss.value(margin, y);
            let g = loss.gradient(margin, y);

            let shrink = 1.0 - eta * params.alpha;
            if shrink > 0.0 {
                scale *= shrink;
            } else {
                // the whole weight vector decays away on this step
                w.iter_mut().for_each(|wj| *wj = 0.0);
                scale = 1.0;
            }
            if g != 0.0 {
                for (j, v) in x.iter() {
                    w[j] -= eta * g * v / scale;
                }
                bias -= eta * g;
            }

            if scale < 1e-9 {
                for wj in &mut w {
                    *wj *= scale;
                }
                scale = 1.0;
            }
        }

        epoch_loss /= features.len().max(1) as f64;
        if (previous_loss - epoch_loss).abs() < params.tol {
            debug!("sgd converged after {} epochs, loss {:.6}", epoch + 1, epoch_loss);
            break;
        }
        previous_loss = epoch_loss;
    }

    for wj in &mut w {
        *wj *= scale;
    }
    LinearModel { weights: w, bias }
}
