use std::fs;
use std::path::Path;

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::Region;
use edo_model::ModelOpts;
use edo_synth::{GenerativeParams, DEFAULT_INDIVIDUALS_PER_STRATUM};
use serde::{Deserialize, Serialize};

fn default_seed() -> u64 {
    42
}

fn default_per_stratum() -> usize {
    DEFAULT_INDIVIDUALS_PER_STRATUM
}

/// Complete run configuration; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Master seed for every stochastic stage.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Regions to synthesize; all 37 when absent.
    #[serde(default)]
    pub regions: Option<Vec<Region>>,
    /// Individuals drawn per stratum.
    #[serde(default = "default_per_stratum")]
    pub per_stratum: usize,
    /// Generative constants.
    #[serde(default)]
    pub generative: GenerativeParams,
    /// Modeling options.
    #[serde(default)]
    pub model: ModelOpts,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            regions: None,
            per_stratum: default_per_stratum(),
            generative: GenerativeParams::default(),
            model: ModelOpts::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a YAML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, EdoError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|err| EdoError::io("config_read", path, err))?;
        serde_yaml::from_str(&contents).map_err(|err| {
            EdoError::Config(
                ErrorInfo::new("config_parse", err.to_string()).with_context("path", path.display()),
            )
        })
    }

    /// Regions in effect for this run.
    pub fn regions(&self) -> Vec<Region> {
        self.regions
            .clone()
            .unwrap_or_else(|| Region::ALL.to_vec())
    }
}
