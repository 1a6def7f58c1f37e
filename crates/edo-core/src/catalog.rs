//! The canonical continuous feature catalog.
//!
//! Every table in the pipeline stores features in [`Feature::ALL`] order. The
//! catalog owns three facts per feature: its column name, the domain the
//! sampler clips into, and the rule the cleaning stage enforces.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{EdoError, ErrorInfo};

/// Number of canonical continuous features.
pub const FEATURE_COUNT: usize = 10;

/// Canonical continuous features carried by strata and individuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Share of school-age children enrolled, in percent.
    EnrollmentRate,
    /// Pupils per teacher.
    PupilTeacherRatio,
    /// Share of qualified teachers, in percent.
    TeacherQualificationRate,
    /// Share of households below the poverty line, in percent.
    HouseholdPovertyRate,
    /// Years of schooling completed by the mother.
    MotherEducationYears,
    /// Persons per household.
    HouseholdSize,
    /// Share of households with internet access, in percent.
    InternetAccessRate,
    /// Textbook availability index in `[0, 1]`.
    TextbookAvailabilityIndex,
    /// One-way travel time to school in minutes.
    TravelTimeToSchoolMin,
    /// Share of households with electricity, in percent.
    ElectricityAccessRate,
}

/// Closed interval a feature value must lie in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound (may be infinite).
    pub max: f64,
}

impl Domain {
    /// Creates a new domain.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the domain.
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Returns whether `value` lies inside the domain.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Validation rule applied to a feature by the cleaning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningRule {
    /// Clip to `[0, 100]`.
    Percentage,
    /// Clip to `[0, 1]`.
    UnitIndex,
    /// Clip to `[0, +inf)`.
    NonNegative,
}

impl CleaningRule {
    /// Domain enforced by the rule.
    pub const fn domain(self) -> Domain {
        match self {
            CleaningRule::Percentage => Domain::new(0.0, 100.0),
            CleaningRule::UnitIndex => Domain::new(0.0, 1.0),
            CleaningRule::NonNegative => Domain::new(0.0, f64::INFINITY),
        }
    }
}

impl Feature {
    /// All features in canonical column order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::EnrollmentRate,
        Feature::PupilTeacherRatio,
        Feature::TeacherQualificationRate,
        Feature::HouseholdPovertyRate,
        Feature::MotherEducationYears,
        Feature::HouseholdSize,
        Feature::InternetAccessRate,
        Feature::TextbookAvailabilityIndex,
        Feature::TravelTimeToSchoolMin,
        Feature::ElectricityAccessRate,
    ];

    /// Position of the feature inside [`Feature::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical snake_case column name.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::EnrollmentRate => "enrollment_rate",
            Feature::PupilTeacherRatio => "pupil_teacher_ratio",
            Feature::TeacherQualificationRate => "teacher_qualification_rate",
            Feature::HouseholdPovertyRate => "household_poverty_rate",
            Feature::MotherEducationYears => "mother_education_years",
            Feature::HouseholdSize => "household_size",
            Feature::InternetAccessRate => "internet_access_rate",
            Feature::TextbookAvailabilityIndex => "textbook_availability_index",
            Feature::TravelTimeToSchoolMin => "travel_time_to_school_min",
            Feature::ElectricityAccessRate => "electricity_access_rate",
        }
    }

    /// Individual-level domain the sampler clips perturbed values into.
    pub const fn domain(self) -> Domain {
        match self {
            Feature::PupilTeacherRatio => Domain::new(10.0, 100.0),
            Feature::MotherEducationYears => Domain::new(0.0, 16.0),
            Feature::HouseholdSize => Domain::new(1.0, 15.0),
            Feature::TextbookAvailabilityIndex => Domain::new(0.0, 1.0),
            Feature::TravelTimeToSchoolMin => Domain::new(0.0, 180.0),
            Feature::EnrollmentRate
            | Feature::TeacherQualificationRate
            | Feature::HouseholdPovertyRate
            | Feature::InternetAccessRate
            | Feature::ElectricityAccessRate => Domain::new(0.0, 100.0),
        }
    }

    /// Rule the cleaning stage enforces for this feature.
    pub const fn cleaning_rule(self) -> CleaningRule {
        match self {
            Feature::EnrollmentRate
            | Feature::TeacherQualificationRate
            | Feature::HouseholdPovertyRate
            | Feature::InternetAccessRate
            | Feature::ElectricityAccessRate => CleaningRule::Percentage,
            Feature::TextbookAvailabilityIndex => CleaningRule::UnitIndex,
            Feature::PupilTeacherRatio
            | Feature::MotherEducationYears
            | Feature::HouseholdSize
            | Feature::TravelTimeToSchoolMin => CleaningRule::NonNegative,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = EdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| {
                EdoError::Schema(
                    ErrorInfo::new("unknown-feature", "feature name is not in the catalog")
                        .with_context("feature", s),
                )
            })
    }
}

/// Fixed-size vector holding one value per catalog feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wraps raw values given in [`Feature::ALL`] order.
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Builds a vector by evaluating `f` for every feature in catalog order.
    pub fn from_fn(mut f: impl FnMut(Feature) -> f64) -> Self {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = f(feature);
        }
        Self(values)
    }

    /// Raw values in catalog order.
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Iterates `(feature, value)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().map(move |&feature| (feature, self.0[feature.index()]))
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl IndexMut<Feature> for FeatureVector {
    fn index_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.0[feature.index()]
    }
}
