//! Plain-language statements for significant odds ratios.

use edo_core::Feature;
use serde::{Deserialize, Serialize};

use crate::logit::CoefficientRow;

const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Plain-language statement about one significant feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Feature name.
    pub feature: String,
    /// Fitted odds ratio.
    pub odds_ratio: f64,
    /// Direction and magnitude sentence.
    pub interpretation: String,
}

/// "Each unit increase in ..." sentence for one odds ratio.
pub fn interpret_odds_ratio(feature: &str, odds_ratio: f64, outcome_label: &str) -> String {
    let (change, direction) = if odds_ratio > 1.0 {
        ((odds_ratio - 1.0) * 100.0, "higher")
    } else {
        ((1.0 - odds_ratio) * 100.0, "lower")
    };
    format!(
        "Each unit increase in {feature} is associated with {change:.1}% {direction} odds of {outcome_label}"
    )
}

/// Findings for features with `p < 0.05`, in catalog order.
pub fn key_findings(table: &[CoefficientRow], outcome_label: &str) -> Vec<Finding> {
    Feature::ALL
        .iter()
        .filter_map(|feature| table.iter().find(|row| row.term == feature.name()))
        .filter(|row| row.p_value < SIGNIFICANCE_LEVEL)
        .map(|row| Finding {
            feature: row.term.clone(),
            odds_ratio: row.odds_ratio,
            interpretation: interpret_odds_ratio(&row.term, row.odds_ratio, outcome_label),
        })
        .collect()
}
