#![deny(missing_docs)]
#![doc = "Two-stage generative model: stratum feature synthesis, jittered individual sampling with a logistic outcome draw, and stratum aggregation."]

/// Stratum-level summaries of individual rows.
pub mod aggregate;
/// Group feature synthesizer.
pub mod groups;
/// Generative constants.
pub mod params;
/// Individual sampler and outcome model.
pub mod sample;
pub mod table;

use edo_core::errors::EdoError;
use edo_core::rng::{derive_substream_seed, RngHandle, SAMPLE_STREAM, SYNTH_STREAM};
use edo_core::Region;
use serde::{Deserialize, Serialize};

pub use aggregate::{summarize, StratumSummary};
pub use groups::{synthesize_strata, Stratum};
pub use params::{FeatureParams, GenerativeParams, GroupDraw, DEFAULT_INDIVIDUALS_PER_STRATUM};
pub use sample::{logistic, outcome_probability, sample_individuals, Individual};

/// Strata and individuals produced by one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Stratum feature profiles.
    pub strata: Vec<Stratum>,
    /// Individual rows, stratum by stratum.
    pub individuals: Vec<Individual>,
}

/// Runs both generative stages from one master seed.
///
/// The synthesizer consumes substream [`SYNTH_STREAM`] and the sampler
/// derives per-stratum seeds from substream [`SAMPLE_STREAM`].
pub fn generate_population(
    regions: &[Region],
    params: &GenerativeParams,
    per_stratum: usize,
    seed: u64,
) -> Result<Population, EdoError> {
    let mut rng = RngHandle::substream(seed, SYNTH_STREAM);
    let strata = synthesize_strata(regions, params, &mut rng)?;
    let individuals = sample_individuals(
        &strata,
        params,
        per_stratum,
        derive_substream_seed(seed, SAMPLE_STREAM),
    )?;
    Ok(Population {
        strata,
        individuals,
    })
}
