//! Provenance and schema descriptors shared across pipeline artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the column contract of the emitted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking column changes.
    pub major: u32,
    /// Minor version incremented for additive columns.
    pub minor: u32,
    /// Patch version incremented for documentation-only changes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Column contract version of the emitted tables.
    pub schema_version: SchemaVersion,
    /// Hash of the configuration used to produce the data.
    pub config_hash: String,
    /// Stable hashes of each emitted table keyed by table name.
    pub table_hashes: BTreeMap<String, String>,
    /// Master deterministic seed used for all randomness.
    pub seed: u64,
    /// RFC 3339 timestamp recording when the run finished.
    pub created_at: String,
    /// Version map for all crates involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
