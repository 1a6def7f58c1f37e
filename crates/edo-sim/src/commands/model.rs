use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use edo_clean::{load_cleaned, CleanedRecord};
use edo_model::{fit_pipeline, write_coefficient_table, ModelingOutcome};

use super::{read_table, ConfigArgs};
use crate::config::PipelineConfig;
use crate::output::{write_provenance, TableHashes};

#[derive(Args, Debug)]
pub struct ModelArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Cleaned individual table.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ModelArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.load()?;
    let table = load_cleaned(&read_table(&args.input)?)?;
    fs::create_dir_all(&args.out)?;
    let mut tables = TableHashes::default();
    model_into(&table.records, &config, &args.out, &mut tables)?;
    write_provenance(&args.out, &config, tables)
}

/// Fits the modeling pipeline and writes the odds-ratio table and metrics summary.
pub fn model_into(
    records: &[CleanedRecord],
    config: &PipelineConfig,
    out: &Path,
    tables: &mut TableHashes,
) -> Result<ModelingOutcome, Box<dyn Error>> {
    let outcome = fit_pipeline(records, &config.model, config.seed)?;
    tables.write(out, "odds_ratios_table.csv", |w| {
        write_coefficient_table(w, &outcome.coefficients)
    })?;
    tables.write_json(out, "metrics_summary.json", &outcome.report)?;
    for finding in &outcome.report.key_findings {
        tracing::info!(feature = %finding.feature, "{}", finding.interpretation);
    }
    Ok(outcome)
}
