//! Modeling report and coefficient table output.

use std::io::Write;

use edo_core::errors::{EdoError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::findings::Finding;
use crate::logit::CoefficientRow;
use crate::metrics::{ClassificationReport, Metrics};

/// Model family recorded in every report.
pub const MODEL_TYPE: &str = "Logistic Regression";

/// Iteration counts and convergence of both fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    /// Newton steps of the inference fit.
    pub inference_iterations: usize,
    /// Whether the inference fit converged.
    pub inference_converged: bool,
    /// Gradient steps of the classifier.
    pub classifier_iterations: usize,
    /// Whether the classifier converged.
    pub classifier_converged: bool,
}

/// Structured metrics summary of one modeling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelingReport {
    /// Model family.
    pub model_type: String,
    /// Input feature names in catalog order.
    pub features: Vec<String>,
    /// Training rows.
    pub train_size: usize,
    /// Test rows.
    pub test_size: usize,
    /// Accuracy and discrimination scores.
    pub metrics: Metrics,
    /// Test confusion matrix `[[TN, FP], [FN, TP]]`.
    pub confusion_matrix: [[usize; 2]; 2],
    /// Test per-class breakdown.
    pub classification_report: ClassificationReport,
    /// Significant features in plain language.
    pub key_findings: Vec<Finding>,
    /// Fit diagnostics.
    pub convergence: Convergence,
}

fn csv_error(err: impl ToString) -> EdoError {
    EdoError::Io(ErrorInfo::new("csv_write", err.to_string()))
}

/// Writes the odds-ratio table, one row per term.
pub fn write_coefficient_table<W: Write>(writer: W, rows: &[CoefficientRow]) -> Result<(), EdoError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).map_err(csv_error)?;
    }
    csv.flush().map_err(csv_error)
}
