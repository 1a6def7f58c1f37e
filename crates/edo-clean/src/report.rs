//! Counts of every repair made by a cleaning pass.

use std::collections::BTreeMap;

use edo_core::Feature;
use serde::{Deserialize, Serialize};

/// Sample statistics used to standardise one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreStats {
    /// Mean of the cleaned column.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub sd: f64,
}

/// Counts of every repair applied while cleaning one table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows in the raw input.
    pub input_rows: usize,
    /// Exact duplicates removed (first occurrence kept).
    pub duplicates_removed: usize,
    /// Rows dropped for a missing required value.
    pub missing_removed: usize,
    /// Values clipped into their domain, per feature.
    pub clipped: BTreeMap<Feature, usize>,
    /// Rows dropped because the outcome was not exactly 0 or 1.
    pub invalid_outcome_removed: usize,
    /// Standardisation statistics of the features that received a z-score.
    pub zscores: BTreeMap<Feature, ZScoreStats>,
    /// Features whose z-score was skipped (fewer than two rows or zero variance).
    pub zscores_skipped: Vec<Feature>,
    /// Rows in the cleaned output.
    pub output_rows: usize,
}

impl CleaningReport {
    /// Total clipped values across features.
    pub fn total_clipped(&self) -> usize {
        self.clipped.values().sum()
    }

    /// Whether cleaning changed nothing about the rows it kept or dropped.
    pub fn is_clean(&self) -> bool {
        self.duplicates_removed == 0
            && self.missing_removed == 0
            && self.invalid_outcome_removed == 0
            && self.total_clipped() == 0
    }
}
