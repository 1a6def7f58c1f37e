#![deny(missing_docs)]
#![doc = "Shared vocabulary for the education outcomes pipeline: the feature catalog, stratum identity, structured errors and the deterministic seeding policy."]

pub mod catalog;
pub mod columns;
pub mod errors;
pub mod hash;
pub mod provenance;
pub mod rng;
pub mod serde;
pub mod strata;

pub use catalog::{CleaningRule, Domain, Feature, FeatureVector, FEATURE_COUNT};
pub use errors::{EdoError, ErrorInfo};
pub use hash::{bytes_hash_string, stable_hash_string};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use strata::{Location, Region, Sex, StratumKey, StratumRecord};
