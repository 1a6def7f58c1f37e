//! Ridge-penalised logistic regression with Wald inference (`ridge: 0` gives
//! plain maximum likelihood).

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Feature, FeatureVector, FEATURE_COUNT};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::opts::ModelOpts;

/// Name of the intercept row in the coefficient table.
pub const INTERCEPT: &str = "const";

const MAX_STEP_HALVINGS: usize = 30;

fn model_error(code: &str, message: impl Into<String>) -> EdoError {
    EdoError::Model(ErrorInfo::new(code, message.into()))
}

/// Numerically stable `ln(1 + e^x)`.
pub(crate) fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Design matrix with a leading column of ones.
pub(crate) fn design_matrix(rows: &[FeatureVector]) -> DMatrix<f64> {
    DMatrix::from_fn(rows.len(), FEATURE_COUNT + 1, |i, j| {
        if j == 0 {
            1.0
        } else {
            rows[i].as_array()[j - 1]
        }
    })
}

/// Converged (or last) state of the Newton iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceFit {
    /// Intercept followed by the feature coefficients in catalog order.
    pub coefficients: Vec<f64>,
    /// Standard errors from the inverse Hessian, same order.
    pub std_errors: Vec<f64>,
    /// Penalised log-likelihood at the returned coefficients.
    pub log_likelihood: f64,
    /// Newton steps taken.
    pub iterations: usize,
    /// Whether the step size fell below tolerance.
    pub converged: bool,
}

struct Objective<'a> {
    x: &'a DMatrix<f64>,
    y: &'a DVector<f64>,
    ridge: f64,
}

impl Objective<'_> {
    fn penalty(&self, beta: &DVector<f64>) -> f64 {
        0.5 * self.ridge * beta.rows(1, FEATURE_COUNT).norm_squared()
    }

    fn log_likelihood(&self, beta: &DVector<f64>) -> f64 {
        let eta = self.x * beta;
        let ll: f64 = eta
            .iter()
            .zip(self.y.iter())
            .map(|(e, y)| y * e - softplus(*e))
            .sum();
        ll - self.penalty(beta)
    }

    fn gradient_and_hessian(&self, beta: &DVector<f64>) -> (DVector<f64>, DMatrix<f64>) {
        let eta = self.x * beta;
        let mu = eta.map(sigmoid);
        let mut gradient = self.x.tr_mul(&(self.y - &mu));
        let mut weighted = self.x.clone();
        for (i, m) in mu.iter().enumerate() {
            weighted.row_mut(i).scale_mut(m * (1.0 - m));
        }
        let mut hessian = self.x.tr_mul(&weighted);
        for j in 1..=FEATURE_COUNT {
            gradient[j] -= self.ridge * beta[j];
            hessian[(j, j)] += self.ridge;
        }
        (gradient, hessian)
    }
}

/// Fits `P(y = 1) = sigmoid(b0 + b . x)` by Newton-Raphson.
///
/// Steps are halved while they lower the penalised log-likelihood; when no
/// halving improves it the fit stops where it is, unconverged. Running out of
/// iterations is flagged on the fit rather than failing; a Hessian that is
/// not positive definite is a [`EdoError::Model`].
pub fn fit_inference(rows: &[FeatureVector], labels: &[bool], opts: &ModelOpts) -> Result<InferenceFit, EdoError> {
    if rows.len() != labels.len() || rows.is_empty() {
        return Err(EdoError::Model(
            ErrorInfo::new("shape-mismatch", "features and labels must be non-empty and aligned")
                .with_context("rows", rows.len())
                .with_context("labels", labels.len()),
        ));
    }
    let x = design_matrix(rows);
    let y = DVector::from_iterator(labels.len(), labels.iter().map(|&l| f64::from(u8::from(l))));
    let objective = Objective {
        x: &x,
        y: &y,
        ridge: opts.ridge,
    };

    let mut beta = DVector::zeros(FEATURE_COUNT + 1);
    let mut ll = objective.log_likelihood(&beta);
    let mut converged = false;
    let mut iterations = 0;
    while iterations < opts.max_newton_iters {
        iterations += 1;
        let (gradient, hessian) = objective.gradient_and_hessian(&beta);
        let step = hessian
            .cholesky()
            .ok_or_else(|| model_error("singular-hessian", "Hessian is not positive definite"))?
            .solve(&gradient);
        let mut scale = 1.0;
        let mut candidate = &beta + &step;
        let mut candidate_ll = objective.log_likelihood(&candidate);
        for _ in 0..MAX_STEP_HALVINGS {
            if candidate_ll >= ll {
                break;
            }
            scale *= 0.5;
            candidate = &beta + &step * scale;
            candidate_ll = objective.log_likelihood(&candidate);
        }
        if candidate_ll < ll {
            tracing::warn!(iterations, "no step-halved Newton step improves the objective");
            break;
        }
        let max_step = (&step * scale).amax();
        beta = candidate;
        ll = candidate_ll;
        if max_step < opts.newton_tolerance {
            converged = true;
            break;
        }
    }
    if !converged {
        tracing::warn!(iterations, "inference fit did not converge");
    }

    let (_, hessian) = objective.gradient_and_hessian(&beta);
    let covariance = hessian
        .cholesky()
        .ok_or_else(|| model_error("singular-hessian", "Hessian is not positive definite"))?
        .inverse();
    let std_errors = (0..=FEATURE_COUNT)
        .map(|j| covariance[(j, j)].max(0.0).sqrt())
        .collect();
    tracing::info!(iterations, converged, log_likelihood = ll, "fitted inference model");
    Ok(InferenceFit {
        coefficients: beta.iter().copied().collect(),
        std_errors,
        log_likelihood: ll,
        iterations,
        converged,
    })
}

/// Significance tier of a p-value.
pub fn significance(p_value: f64) -> &'static str {
    if p_value < 0.001 {
        "***"
    } else if p_value < 0.01 {
        "**"
    } else if p_value < 0.05 {
        "*"
    } else {
        ""
    }
}

/// One row of the odds-ratio table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    /// Feature name, or [`INTERCEPT`].
    pub term: String,
    /// Estimated coefficient on the standardised scale.
    pub coefficient: f64,
    /// `exp(coefficient)`.
    pub odds_ratio: f64,
    /// Lower confidence bound of the odds ratio.
    pub or_ci_lower: f64,
    /// Upper confidence bound of the odds ratio.
    pub or_ci_upper: f64,
    /// Two-sided Wald p-value.
    pub p_value: f64,
    /// Stars for the 0.05 / 0.01 / 0.001 thresholds.
    pub significant: String,
}

/// Builds the coefficient table, intercept first.
pub fn coefficient_table(fit: &InferenceFit, confidence: f64) -> Result<Vec<CoefficientRow>, EdoError> {
    let normal = Normal::new(0.0, 1.0).map_err(|err| model_error("normal", err.to_string()))?;
    let quantile = normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
    let terms = std::iter::once(INTERCEPT).chain(Feature::ALL.iter().map(|f| f.name()));
    Ok(terms
        .zip(fit.coefficients.iter().zip(&fit.std_errors))
        .map(|(term, (&coefficient, &se))| {
            let z = coefficient / se;
            let p_value = if z.is_finite() {
                2.0 * normal.cdf(-z.abs())
            } else {
                f64::NAN
            };
            CoefficientRow {
                term: term.to_string(),
                coefficient,
                odds_ratio: coefficient.exp(),
                or_ci_lower: (coefficient - quantile * se).exp(),
                or_ci_upper: (coefficient + quantile * se).exp(),
                p_value,
                significant: significance(p_value).to_string(),
            }
        })
        .collect())
}
