//! Modeling options and their defaults.

use edo_core::errors::{EdoError, ErrorInfo};
use serde::{Deserialize, Serialize};

fn opts_error(code: &str, message: &str, value: f64) -> EdoError {
    EdoError::Config(ErrorInfo::new(code, message).with_context("value", value))
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_confidence() -> f64 {
    0.95
}

fn default_ridge() -> f64 {
    1.0
}

fn default_max_newton_iters() -> usize {
    35
}

fn default_newton_tolerance() -> f64 {
    1e-8
}

fn default_inverse_regularization() -> f64 {
    1.0
}

fn default_classifier_max_iters() -> usize {
    1000
}

fn default_gradient_tolerance() -> f64 {
    1e-6
}

fn default_outcome_label() -> String {
    "literacy".to_string()
}

/// Modeling pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelOpts {
    /// Fraction of each outcome class held out for testing.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Confidence level of the odds-ratio intervals.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Ridge penalty of the inference fit; the intercept is never penalised
    /// and `0` gives plain maximum likelihood.
    #[serde(default = "default_ridge")]
    pub ridge: f64,
    /// Newton iteration cap of the inference fit.
    #[serde(default = "default_max_newton_iters")]
    pub max_newton_iters: usize,
    /// Largest absolute Newton step accepted as converged.
    #[serde(default = "default_newton_tolerance")]
    pub newton_tolerance: f64,
    /// Inverse L2 strength `C` of the classifier.
    #[serde(default = "default_inverse_regularization")]
    pub inverse_regularization: f64,
    /// Gradient descent iteration cap of the classifier.
    #[serde(default = "default_classifier_max_iters")]
    pub classifier_max_iters: usize,
    /// Largest absolute gradient component accepted as converged.
    #[serde(default = "default_gradient_tolerance")]
    pub gradient_tolerance: f64,
    /// Outcome wording used in findings ("higher odds of <label>").
    #[serde(default = "default_outcome_label")]
    pub outcome_label: String,
}

impl Default for ModelOpts {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            confidence: default_confidence(),
            ridge: default_ridge(),
            max_newton_iters: default_max_newton_iters(),
            newton_tolerance: default_newton_tolerance(),
            inverse_regularization: default_inverse_regularization(),
            classifier_max_iters: default_classifier_max_iters(),
            gradient_tolerance: default_gradient_tolerance(),
            outcome_label: default_outcome_label(),
        }
    }
}

impl ModelOpts {
    /// Rejects options no fit can honour.
    pub fn validate(&self) -> Result<(), EdoError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(opts_error(
                "invalid-test-fraction",
                "test fraction must lie strictly between 0 and 1",
                self.test_fraction,
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(opts_error(
                "invalid-confidence",
                "confidence must lie strictly between 0 and 1",
                self.confidence,
            ));
        }
        if !(self.ridge.is_finite() && self.ridge >= 0.0) {
            return Err(opts_error("invalid-ridge", "ridge must be finite and non-negative", self.ridge));
        }
        if !(self.inverse_regularization.is_finite() && self.inverse_regularization > 0.0) {
            return Err(opts_error(
                "invalid-regularization",
                "inverse regularisation must be finite and positive",
                self.inverse_regularization,
            ));
        }
        if !(self.newton_tolerance > 0.0 && self.gradient_tolerance > 0.0) {
            return Err(EdoError::config("invalid-tolerance", "tolerances must be positive"));
        }
        if self.max_newton_iters == 0 || self.classifier_max_iters == 0 {
            return Err(EdoError::config("invalid-iterations", "iteration caps must be positive"));
        }
        Ok(())
    }
}
