use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::rng::derive_substream_seed;
use edo_core::{Feature, FeatureVector, RngHandle, StratumKey, StratumRecord, FEATURE_COUNT};
use rand::distributions::Distribution;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::groups::Stratum;
use crate::params::GenerativeParams;

/// One synthetic individual drawn around its stratum profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Stratum the individual was drawn from.
    pub key: StratumKey,
    /// Perturbed and clipped features.
    pub features: FeatureVector,
    /// Region effect copied by value from the stratum.
    pub region_effect: f64,
    /// Binary outcome.
    pub outcome: bool,
}

impl StratumRecord for Individual {
    fn stratum(&self) -> StratumKey {
        self.key
    }

    fn features(&self) -> &FeatureVector {
        &self.features
    }

    fn outcome(&self) -> bool {
        self.outcome
    }
}

/// Logistic link of the generative model.
pub fn logistic(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

/// Outcome probability before jitter:
/// `sigmoid(intercept + sum(coef_i * x_i) + region_effect)`.
pub fn outcome_probability(
    features: &FeatureVector,
    region_effect: f64,
    intercept: f64,
    coefficients: &FeatureVector,
) -> f64 {
    let linear: f64 = features
        .iter()
        .map(|(feature, value)| coefficients[feature] * value)
        .sum();
    logistic(intercept + linear + region_effect)
}

fn normal(sd: f64, feature: Option<Feature>) -> Result<Normal, EdoError> {
    Normal::new(0.0, sd).map_err(|err| {
        let info = ErrorInfo::new("invalid-normal", err.to_string());
        EdoError::Config(match feature {
            Some(feature) => info.with_context("feature", feature),
            None => info,
        })
    })
}

/// Pre-built distributions shared read-only by every stratum worker.
struct SamplerKernel {
    noise: Vec<Normal>,
    jitter: Normal,
    intercept: f64,
    coefficients: FeatureVector,
}

impl SamplerKernel {
    fn new(params: &GenerativeParams) -> Result<Self, EdoError> {
        params.validate()?;
        let noise = Feature::ALL
            .iter()
            .map(|&feature| normal(params.feature(feature)?.noise_sd, Some(feature)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            noise,
            jitter: normal(params.probability_jitter_sd, None)?,
            intercept: params.intercept,
            coefficients: params.coefficients()?,
        })
    }

    fn draw(&self, stratum: &Stratum, rng: &mut RngHandle) -> Individual {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let idx = feature.index();
            let perturbed = stratum.features[feature] + self.noise[idx].sample(rng);
            values[idx] = feature.domain().clip(perturbed);
        }
        let features = FeatureVector::from_array(values);
        let probability = outcome_probability(
            &features,
            stratum.region_effect,
            self.intercept,
            &self.coefficients,
        );
        let jittered = (probability + self.jitter.sample(rng)).clamp(0.0, 1.0);
        Individual {
            key: stratum.key,
            features,
            region_effect: stratum.region_effect,
            outcome: rng.gen_bool(jittered),
        }
    }
}

/// Draws `per_stratum` individuals for every stratum.
///
/// Stratum `i` owns a generator seeded with `derive_substream_seed(seed, i)`,
/// so strata are sampled in parallel while the output stays identical to a
/// serial run. Rows are emitted stratum by stratum in input order.
pub fn sample_individuals(
    strata: &[Stratum],
    params: &GenerativeParams,
    per_stratum: usize,
    seed: u64,
) -> Result<Vec<Individual>, EdoError> {
    if per_stratum == 0 {
        return Err(EdoError::Config(ErrorInfo::new(
            "empty-strata",
            "individuals per stratum must be positive",
        )));
    }
    let kernel = SamplerKernel::new(params)?;

    let blocks: Vec<Vec<Individual>> = strata
        .par_iter()
        .enumerate()
        .map(|(idx, stratum)| {
            let mut rng = RngHandle::from_seed(derive_substream_seed(seed, idx as u64));
            (0..per_stratum)
                .map(|_| kernel.draw(stratum, &mut rng))
                .collect()
        })
        .collect();

    let individuals: Vec<Individual> = blocks.into_iter().flatten().collect();
    let positives = individuals.iter().filter(|row| row.outcome).count();
    tracing::info!(
        strata = strata.len(),
        rows = individuals.len(),
        positive_rate = positives as f64 / individuals.len().max(1) as f64,
        "sampled individuals"
    );
    Ok(individuals)
}
