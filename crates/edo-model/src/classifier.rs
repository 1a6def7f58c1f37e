//! L2-regularised logistic classifier used for predictive metrics.

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

use crate::logit::{sigmoid, softplus};
use crate::opts::ModelOpts;

const ARMIJO_FRACTION: f64 = 0.5;
const MIN_STEP: f64 = 1e-12;

/// L2-regularised logistic classifier trained by gradient descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    /// Feature weights in catalog order.
    pub weights: FeatureVector,
    /// Unpenalised bias.
    pub bias: f64,
    /// Gradient steps taken.
    pub iterations: usize,
    /// Whether the gradient fell below tolerance.
    pub converged: bool,
}

struct Loss<'a> {
    rows: &'a [FeatureVector],
    labels: &'a [bool],
    /// `1 / (C * n)`; the loss is the mean log loss plus `penalty / 2 * |w|^2`.
    penalty: f64,
}

fn dot(weights: &[f64; FEATURE_COUNT], row: &FeatureVector) -> f64 {
    weights.iter().zip(row.as_array()).map(|(w, x)| w * x).sum()
}

impl Loss<'_> {
    fn value(&self, weights: &[f64; FEATURE_COUNT], bias: f64) -> f64 {
        let n = self.rows.len() as f64;
        let log_loss: f64 = self
            .rows
            .iter()
            .zip(self.labels)
            .map(|(row, &label)| {
                let z = dot(weights, row) + bias;
                if label {
                    softplus(-z)
                } else {
                    softplus(z)
                }
            })
            .sum();
        log_loss / n + 0.5 * self.penalty * weights.iter().map(|w| w * w).sum::<f64>()
    }

    fn gradient(&self, weights: &[f64; FEATURE_COUNT], bias: f64) -> ([f64; FEATURE_COUNT], f64) {
        let n = self.rows.len() as f64;
        let mut grad = [0.0; FEATURE_COUNT];
        let mut grad_bias = 0.0;
        for (row, &label) in self.rows.iter().zip(self.labels) {
            let residual = sigmoid(dot(weights, row) + bias) - f64::from(u8::from(label));
            for (g, x) in grad.iter_mut().zip(row.as_array()) {
                *g += residual * x;
            }
            grad_bias += residual;
        }
        for (g, w) in grad.iter_mut().zip(weights) {
            *g = *g / n + self.penalty * w;
        }
        (grad, grad_bias / n)
    }
}

impl LogisticClassifier {
    /// Minimises the regularised log loss with backtracking line search.
    pub fn fit(rows: &[FeatureVector], labels: &[bool], opts: &ModelOpts) -> Result<Self, EdoError> {
        if rows.len() != labels.len() || rows.is_empty() {
            return Err(EdoError::Model(
                ErrorInfo::new("shape-mismatch", "features and labels must be non-empty and aligned")
                    .with_context("rows", rows.len())
                    .with_context("labels", labels.len()),
            ));
        }
        let loss = Loss {
            rows,
            labels,
            penalty: 1.0 / (opts.inverse_regularization * rows.len() as f64),
        };
        let mut weights = [0.0; FEATURE_COUNT];
        let mut bias = 0.0;
        let mut value = loss.value(&weights, bias);
        let mut step = 1.0;
        let mut converged = false;
        let mut iterations = 0;

        while iterations < opts.classifier_max_iters {
            let (grad, grad_bias) = loss.gradient(&weights, bias);
            let largest = grad.iter().fold(grad_bias.abs(), |acc, g| acc.max(g.abs()));
            if largest < opts.gradient_tolerance {
                converged = true;
                break;
            }
            iterations += 1;
            let grad_norm_sq = grad.iter().map(|g| g * g).sum::<f64>() + grad_bias * grad_bias;
            step *= 2.0;
            loop {
                let mut trial = weights;
                for (t, g) in trial.iter_mut().zip(&grad) {
                    *t -= step * g;
                }
                let trial_bias = bias - step * grad_bias;
                let trial_value = loss.value(&trial, trial_bias);
                if trial_value <= value - ARMIJO_FRACTION * step * grad_norm_sq || step < MIN_STEP {
                    weights = trial;
                    bias = trial_bias;
                    value = trial_value;
                    break;
                }
                step *= 0.5;
            }
        }
        if !converged {
            tracing::warn!(iterations, loss = value, "classifier did not reach gradient tolerance");
        }
        tracing::info!(iterations, converged, loss = value, "fitted classifier");
        Ok(Self {
            weights: FeatureVector::from_array(weights),
            bias,
            iterations,
            converged,
        })
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, row: &FeatureVector) -> f64 {
        sigmoid(dot(self.weights.as_array(), row) + self.bias)
    }

    /// Positive when the probability exceeds one half.
    pub fn predict(&self, row: &FeatureVector) -> bool {
        self.predict_proba(row) > 0.5
    }
}
