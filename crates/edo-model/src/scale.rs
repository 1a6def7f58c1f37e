//! Standard scaling fitted on training rows.

use edo_core::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Per-feature standardisation fitted on the training partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Training means.
    pub mean: FeatureVector,
    /// Training population standard deviations; zero spread is stored as 1.
    pub scale: FeatureVector,
}

impl StandardScaler {
    /// Fits means and population standard deviations. `rows` must be non-empty.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let n = rows.len().max(1) as f64;
        let mean = FeatureVector::from_fn(|feature| rows.iter().map(|row| row[feature]).sum::<f64>() / n);
        let scale = FeatureVector::from_fn(|feature| {
            let var = rows
                .iter()
                .map(|row| (row[feature] - mean[feature]).powi(2))
                .sum::<f64>()
                / n;
            let sd = var.sqrt();
            if sd > 0.0 && sd.is_finite() {
                sd
            } else {
                1.0
            }
        });
        Self { mean, scale }
    }

    /// Standardises one row.
    pub fn transform_row(&self, row: &FeatureVector) -> FeatureVector {
        FeatureVector::from_fn(|feature: Feature| (row[feature] - self.mean[feature]) / self.scale[feature])
    }

    /// Standardises every row with the fitted statistics.
    pub fn transform(&self, rows: &[FeatureVector]) -> Vec<FeatureVector> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
