use std::collections::BTreeSet;

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Feature, FeatureVector, Location, Region, RngHandle, Sex, StratumKey};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::params::{GenerativeParams, GroupDraw};

/// Stratum-level feature profile shared by every individual drawn from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stratum {
    /// Stratum identity.
    pub key: StratumKey,
    /// Stratum feature values.
    pub features: FeatureVector,
    /// Region random effect, identical for all strata of one region.
    pub region_effect: f64,
}

fn draw_feature(
    draw: &GroupDraw,
    location: Location,
    urban_bonus: f64,
    rng: &mut RngHandle,
) -> f64 {
    match draw {
        GroupDraw::ByLocation { urban, rural } => {
            let range = if location.is_urban() { urban } else { rural };
            rng.gen_range(range.min..range.max)
        }
        GroupDraw::Bonus {
            range,
            urban_weight,
        } => {
            let bonus = if location.is_urban() { urban_bonus } else { 0.0 };
            range.clip(rng.gen_range(range.min..range.max) + urban_weight * bonus)
        }
    }
}

/// Synthesizes one stratum per (region, sex, location) combination.
///
/// For each region in order a region effect is drawn from
/// `U(-bound, bound)`, then the four strata of that region draw their ten
/// features in catalog order. The table is a pure function of `regions`,
/// `params` and the generator state.
pub fn synthesize_strata(
    regions: &[Region],
    params: &GenerativeParams,
    rng: &mut RngHandle,
) -> Result<Vec<Stratum>, EdoError> {
    params.validate()?;
    if regions.is_empty() {
        return Err(EdoError::Config(ErrorInfo::new(
            "empty-regions",
            "at least one region is required",
        )));
    }
    let mut seen = BTreeSet::new();
    for region in regions {
        if !seen.insert(*region) {
            return Err(EdoError::Config(
                ErrorInfo::new("duplicate-region", "region listed more than once")
                    .with_context("region", region),
            ));
        }
    }

    let bound = params.region_effect_bound;
    let mut strata = Vec::with_capacity(regions.len() * Sex::ALL.len() * Location::ALL.len());
    for &region in regions {
        let region_effect = rng.gen_range(-bound..bound);
        for sex in Sex::ALL {
            for location in Location::ALL {
                let mut features = FeatureVector::from_array([0.0; edo_core::FEATURE_COUNT]);
                for feature in Feature::ALL {
                    let draw = &params.feature(feature)?.group;
                    features[feature] = draw_feature(draw, location, params.urban_bonus, rng);
                }
                strata.push(Stratum {
                    key: StratumKey::new(region, sex, location),
                    features,
                    region_effect,
                });
            }
        }
    }
    tracing::info!(
        regions = regions.len(),
        strata = strata.len(),
        "synthesized stratum feature profiles"
    );
    Ok(strata)
}
