//! Column names shared by every tabular boundary.
//!
//! Feature columns are named by [`crate::Feature::name`].

/// Region label column.
pub const REGION: &str = "region";
/// Sex label column (`M` or `F`).
pub const SEX: &str = "sex";
/// Location label column (`urban` or `rural`).
pub const LOCATION: &str = "location";
/// Region random effect inherited from the stratum.
pub const REGION_EFFECT: &str = "region_effect";
/// Binary individual outcome.
pub const OUTCOME: &str = "literacy_outcome";
/// Stratum outcome rate on a 0-100 scale.
pub const OUTCOME_RATE: &str = "literacy_rate";
/// Stratum group size.
pub const COUNT: &str = "count";
/// Suffix appended to a feature name for its z-score column.
pub const ZSCORE_SUFFIX: &str = "_zscore";
