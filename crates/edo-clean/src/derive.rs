//! Derived columns: z-scores and fixed-edge categorical bins.

use std::fmt;
use std::str::FromStr;

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::Feature;
use serde::{Deserialize, Serialize};

use crate::report::{CleaningReport, ZScoreStats};
use crate::validate::ValidRow;

/// Features that receive a z-score column, in output order.
pub const ZSCORE_FEATURES: [Feature; 4] = [
    Feature::EnrollmentRate,
    Feature::PupilTeacherRatio,
    Feature::TeacherQualificationRate,
    Feature::HouseholdPovertyRate,
];

/// Position of `feature` inside [`ZSCORE_FEATURES`].
pub fn zscore_slot(feature: Feature) -> Option<usize> {
    ZSCORE_FEATURES.iter().position(|f| *f == feature)
}

/// Index of the `(edges[i], edges[i + 1]]` interval holding `value`.
fn bin_index(value: f64, edges: &[f64; 5]) -> Option<usize> {
    edges
        .windows(2)
        .position(|pair| value > pair[0] && value <= pair[1])
}

macro_rules! binned_category {
    (
        $(#[$meta:meta])*
        $name:ident, $column:literal, edges = $edges:expr,
        [$($variant:ident => $label:literal),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Ordered categories, lowest first.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Bin edges; category `i` covers `(EDGES[i], EDGES[i + 1]]`.
            pub const EDGES: [f64; 5] = $edges;
            /// Output column name.
            pub const COLUMN: &'static str = $column;

            /// Category of `value`, or `None` outside every interval.
            pub fn of(value: f64) -> Option<Self> {
                bin_index(value, &Self::EDGES).map(|idx| Self::ALL[idx])
            }

            /// Display label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = EdoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|category| category.label() == s.trim())
                    .ok_or_else(|| {
                        EdoError::Schema(
                            ErrorInfo::new("unknown-category", "label is not a known category")
                                .with_context("column", $column)
                                .with_context("value", s),
                        )
                    })
            }
        }
    };
}

binned_category!(
    /// Household poverty rate band.
    PovertyCategory, "poverty_category", edges = [0.0, 20.0, 40.0, 60.0, 100.0],
    [Low => "Low", Medium => "Medium", High => "High", VeryHigh => "Very High"]
);

binned_category!(
    /// Mother's schooling level.
    MotherEducationCategory, "mother_education_category", edges = [-1.0, 0.0, 6.0, 12.0, 16.0],
    [NoSchooling => "None", Primary => "Primary", Secondary => "Secondary", Tertiary => "Tertiary"]
);

binned_category!(
    /// School enrollment band.
    EnrollmentCategory, "enrollment_category", edges = [0.0, 70.0, 85.0, 95.0, 100.0],
    [Low => "Low", Medium => "Medium", High => "High", VeryHigh => "Very High"]
);

/// Mean and sample standard deviation, `None` when fewer than two values.
fn sample_stats(values: &[f64]) -> Option<ZScoreStats> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(ZScoreStats {
        mean,
        sd: (ss / (n - 1.0)).sqrt(),
    })
}

/// Computes standardisation statistics on the surviving rows and records them
/// (or the skip) in the report.
pub(crate) fn zscore_stats(rows: &[ValidRow], report: &mut CleaningReport) -> [Option<ZScoreStats>; 4] {
    let mut stats = [None; 4];
    for (slot, feature) in ZSCORE_FEATURES.iter().enumerate() {
        let values: Vec<f64> = rows.iter().map(|row| row.features[*feature]).collect();
        match sample_stats(&values) {
            Some(s) if s.sd > 0.0 && s.sd.is_finite() => {
                report.zscores.insert(*feature, s);
                stats[slot] = Some(s);
            }
            _ => {
                tracing::warn!(feature = %feature, rows = rows.len(), "skipping degenerate z-score");
                report.zscores_skipped.push(*feature);
            }
        }
    }
    stats
}
