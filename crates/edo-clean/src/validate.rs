//! Row-level repairs: deduplication, missing-value removal, clipping and outcome checks.

use std::collections::HashSet;

use edo_core::{Feature, FeatureVector, Location, Region, Sex, StratumKey};

use crate::report::CleaningReport;
use crate::schema::TypedRow;

/// A fully populated row whose values all lie in their domains.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidRow {
    pub key: StratumKey,
    pub features: FeatureVector,
    pub region_effect: Option<f64>,
    pub outcome: bool,
}

/// Bit-level identity of a row; `-0.0` and `0.0` compare equal.
#[derive(Hash, PartialEq, Eq)]
struct RowIdentity {
    region: Option<Region>,
    sex: Option<Sex>,
    location: Option<Location>,
    values: Vec<Option<u64>>,
}

fn bits(value: Option<f64>) -> Option<u64> {
    value.map(|v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
}

impl RowIdentity {
    fn of_typed(row: &TypedRow) -> Self {
        let mut values: Vec<Option<u64>> = row.features.iter().map(|v| bits(*v)).collect();
        values.push(bits(row.region_effect));
        values.push(bits(row.outcome));
        Self {
            region: row.region,
            sex: row.sex,
            location: row.location,
            values,
        }
    }

    fn of_valid(row: &ValidRow) -> Self {
        let mut values: Vec<Option<u64>> = row.features.iter().map(|(_, v)| bits(Some(v))).collect();
        values.push(bits(row.region_effect));
        values.push(bits(Some(f64::from(u8::from(row.outcome)))));
        Self {
            region: Some(row.key.region),
            sex: Some(row.key.sex),
            location: Some(row.key.location),
            values,
        }
    }
}

fn keep_first<T>(rows: Vec<T>, identity: impl Fn(&T) -> RowIdentity, report: &mut CleaningReport) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    let before = rows.len();
    let kept: Vec<T> = rows
        .into_iter()
        .filter(|row| seen.insert(identity(row)))
        .collect();
    report.duplicates_removed += before - kept.len();
    kept
}

/// Keeps the first occurrence of each exact duplicate, preserving order.
pub(crate) fn dedupe(rows: Vec<TypedRow>, report: &mut CleaningReport) -> Vec<TypedRow> {
    keep_first(rows, RowIdentity::of_typed, report)
}

/// Removes rows that became identical once clipped into their domains.
pub(crate) fn dedupe_repaired(rows: Vec<ValidRow>, report: &mut CleaningReport) -> Vec<ValidRow> {
    keep_first(rows, RowIdentity::of_valid, report)
}

/// Drops incomplete rows, clips features into their cleaning domain and
/// discards rows whose outcome is not exactly 0 or 1.
pub(crate) fn repair(
    rows: Vec<TypedRow>,
    with_region_effect: bool,
    report: &mut CleaningReport,
) -> Vec<ValidRow> {
    for feature in Feature::ALL {
        report.clipped.insert(feature, 0);
    }
    let mut valid = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(row) = row.complete(with_region_effect) else {
            report.missing_removed += 1;
            continue;
        };
        let mut features = row.features;
        for feature in Feature::ALL {
            let value = features[feature];
            let clipped = feature.cleaning_rule().domain().clip(value);
            if clipped != value {
                *report.clipped.entry(feature).or_default() += 1;
            }
            features[feature] = clipped;
        }
        let outcome = if row.outcome == 0.0 {
            false
        } else if row.outcome == 1.0 {
            true
        } else {
            report.invalid_outcome_removed += 1;
            continue;
        };
        valid.push(ValidRow {
            key: row.key,
            features,
            region_effect: row.region_effect,
            outcome,
        });
    }
    valid
}
