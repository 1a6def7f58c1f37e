pub mod clean;
pub mod generate;
pub mod model;
pub mod run;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Args;
use edo_clean::RawTable;
use edo_core::errors::EdoError;

use crate::config::PipelineConfig;

/// Flags shared by every subcommand that reads a configuration.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// YAML pipeline configuration; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured master seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<PipelineConfig, EdoError> {
        let mut config = PipelineConfig::load(self.config.as_deref())?;
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

pub fn read_table(path: &Path) -> Result<RawTable, Box<dyn Error>> {
    let file = File::open(path).map_err(|err| EdoError::io("table_read", path, err))?;
    Ok(RawTable::read_csv(file)?)
}
