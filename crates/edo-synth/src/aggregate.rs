use std::collections::BTreeMap;

use edo_core::{Feature, FeatureVector, StratumKey, StratumRecord, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Stratum-level summary of the surviving individual rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratumSummary {
    /// Stratum identity.
    pub key: StratumKey,
    /// Arithmetic mean of each feature.
    pub means: FeatureVector,
    /// Mean outcome as a percentage in `[0, 100]`.
    pub outcome_rate: f64,
    /// Number of rows in the stratum.
    pub count: usize,
}

#[derive(Default)]
struct Accumulator {
    sums: [f64; FEATURE_COUNT],
    positives: usize,
    count: usize,
}

/// Collapses rows to one summary per stratum, ordered by stratum key.
///
/// Strata without rows produce no summary; callers treat them as missing.
pub fn summarize<'a, R, I>(records: I) -> Vec<StratumSummary>
where
    R: StratumRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut groups: BTreeMap<StratumKey, Accumulator> = BTreeMap::new();
    for record in records {
        let acc = groups.entry(record.stratum()).or_default();
        for (feature, value) in record.features().iter() {
            acc.sums[feature.index()] += value;
        }
        acc.positives += usize::from(record.outcome());
        acc.count += 1;
    }

    let summaries: Vec<StratumSummary> = groups
        .into_iter()
        .map(|(key, acc)| {
            let n = acc.count as f64;
            StratumSummary {
                key,
                means: FeatureVector::from_fn(|feature: Feature| acc.sums[feature.index()] / n),
                outcome_rate: acc.positives as f64 / n * 100.0,
                count: acc.count,
            }
        })
        .collect();
    tracing::debug!(strata = summaries.len(), "aggregated stratum summaries");
    summaries
}
