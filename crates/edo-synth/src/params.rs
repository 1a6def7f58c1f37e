//! Generative constants: group-level ranges, sampler noise and the outcome model.
//!
//! The values are an external configuration surface. Defaults reproduce the
//! reference outputs exactly and must not be tuned in code.

use std::collections::BTreeMap;

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Domain, Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Individuals drawn per stratum by default (148 strata x 600 = 88,800 rows).
pub const DEFAULT_INDIVIDUALS_PER_STRATUM: usize = 600;

fn params_error(code: &str, message: impl Into<String>) -> EdoError {
    EdoError::Config(ErrorInfo::new(code, message.into()))
}

/// How a stratum's value for one feature is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupDraw {
    /// Urban and rural strata draw uniformly from separate ranges.
    ByLocation {
        /// Range used for urban strata.
        urban: Domain,
        /// Range used for rural strata.
        rural: Domain,
    },
    /// Uniform draw plus `urban_weight` times the urban bonus, clipped back into `range`.
    Bonus {
        /// Canonical range of the draw.
        range: Domain,
        /// Multiplier applied to the urban bonus (negative for unfavourable features).
        urban_weight: f64,
    },
}

impl GroupDraw {
    fn ranges(&self) -> Vec<Domain> {
        match self {
            GroupDraw::ByLocation { urban, rural } => vec![*urban, *rural],
            GroupDraw::Bonus { range, .. } => vec![*range],
        }
    }
}

/// Per-feature generative constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    /// Stratum-level draw.
    pub group: GroupDraw,
    /// Standard deviation of the individual-level additive noise.
    pub noise_sd: f64,
    /// Coefficient of the feature in the outcome logit.
    pub coefficient: f64,
}

/// Complete generative configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerativeParams {
    /// Intercept of the outcome logit.
    #[serde(default = "default_intercept")]
    pub intercept: f64,
    /// Region effects are drawn from `U(-bound, bound)`.
    #[serde(default = "default_region_effect_bound")]
    pub region_effect_bound: f64,
    /// Bonus applied to urban strata before the per-feature weight.
    #[serde(default = "default_urban_bonus")]
    pub urban_bonus: f64,
    /// Standard deviation of the Gaussian jitter added to the outcome probability.
    #[serde(default = "default_probability_jitter_sd")]
    pub probability_jitter_sd: f64,
    /// Per-feature constants; every catalog feature must be present.
    #[serde(default = "default_features")]
    pub features: BTreeMap<Feature, FeatureParams>,
}

fn default_intercept() -> f64 {
    -2.0
}

fn default_region_effect_bound() -> f64 {
    0.5
}

fn default_urban_bonus() -> f64 {
    15.0
}

fn default_probability_jitter_sd() -> f64 {
    0.05
}

fn bonus(min: f64, max: f64, urban_weight: f64) -> GroupDraw {
    GroupDraw::Bonus {
        range: Domain::new(min, max),
        urban_weight,
    }
}

fn by_location(urban: (f64, f64), rural: (f64, f64)) -> GroupDraw {
    GroupDraw::ByLocation {
        urban: Domain::new(urban.0, urban.1),
        rural: Domain::new(rural.0, rural.1),
    }
}

fn default_features() -> BTreeMap<Feature, FeatureParams> {
    let table = [
        (Feature::EnrollmentRate, bonus(60.0, 98.0, 0.3), 3.0, 0.04),
        (
            Feature::PupilTeacherRatio,
            by_location((20.0, 50.0), (35.0, 80.0)),
            5.0,
            -0.02,
        ),
        (Feature::TeacherQualificationRate, bonus(30.0, 95.0, 0.5), 5.0, 0.03),
        (Feature::HouseholdPovertyRate, bonus(10.0, 85.0, -1.0), 5.0, -0.02),
        (Feature::MotherEducationYears, bonus(0.0, 14.0, 0.2), 1.0, 0.15),
        (Feature::HouseholdSize, bonus(3.0, 10.0, 0.0), 1.0, -0.05),
        (Feature::InternetAccessRate, bonus(5.0, 70.0, 1.5), 5.0, 0.02),
        (Feature::TextbookAvailabilityIndex, bonus(0.2, 0.95, 0.01), 0.1, 2.0),
        (
            Feature::TravelTimeToSchoolMin,
            by_location((5.0, 30.0), (15.0, 90.0)),
            10.0,
            -0.01,
        ),
        (Feature::ElectricityAccessRate, bonus(10.0, 95.0, 1.2), 5.0, 0.01),
    ];
    table
        .into_iter()
        .map(|(feature, group, noise_sd, coefficient)| {
            (
                feature,
                FeatureParams {
                    group,
                    noise_sd,
                    coefficient,
                },
            )
        })
        .collect()
}

impl Default for GenerativeParams {
    fn default() -> Self {
        Self {
            intercept: default_intercept(),
            region_effect_bound: default_region_effect_bound(),
            urban_bonus: default_urban_bonus(),
            probability_jitter_sd: default_probability_jitter_sd(),
            features: default_features(),
        }
    }
}

impl GenerativeParams {
    /// Returns the constants for `feature`.
    pub fn feature(&self, feature: Feature) -> Result<&FeatureParams, EdoError> {
        self.features.get(&feature).ok_or_else(|| {
            EdoError::Config(
                ErrorInfo::new("missing-feature-params", "feature has no generative constants")
                    .with_context("feature", feature),
            )
        })
    }

    /// Generative coefficients in catalog order.
    pub fn coefficients(&self) -> Result<FeatureVector, EdoError> {
        let mut coefficients = FeatureVector::from_array([0.0; edo_core::FEATURE_COUNT]);
        for feature in Feature::ALL {
            coefficients[feature] = self.feature(feature)?.coefficient;
        }
        Ok(coefficients)
    }

    /// Checks every constant before any draw is made.
    pub fn validate(&self) -> Result<(), EdoError> {
        if !(self.region_effect_bound.is_finite() && self.region_effect_bound > 0.0) {
            return Err(params_error(
                "invalid-region-effect-bound",
                "region effect bound must be finite and strictly positive",
            ));
        }
        if !self.probability_jitter_sd.is_finite() || self.probability_jitter_sd <= 0.0 {
            return Err(params_error(
                "invalid-jitter",
                "probability jitter sd must be finite and strictly positive",
            ));
        }
        if !self.intercept.is_finite() || !self.urban_bonus.is_finite() {
            return Err(params_error(
                "non-finite",
                "intercept and urban bonus must be finite",
            ));
        }
        for feature in Feature::ALL {
            let params = self.feature(feature)?;
            if !params.noise_sd.is_finite() || params.noise_sd <= 0.0 {
                return Err(EdoError::Config(
                    ErrorInfo::new("invalid-noise", "noise sd must be finite and strictly positive")
                        .with_context("feature", feature),
                ));
            }
            if !params.coefficient.is_finite() {
                return Err(EdoError::Config(
                    ErrorInfo::new("non-finite", "coefficient must be finite")
                        .with_context("feature", feature),
                ));
            }
            for range in params.group.ranges() {
                if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
                    return Err(EdoError::Config(
                        ErrorInfo::new("invalid-range", "group range must satisfy min < max")
                            .with_context("feature", feature)
                            .with_context("min", range.min)
                            .with_context("max", range.max),
                    ));
                }
            }
        }
        Ok(())
    }
}
