use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use edo_clean::RawTable;
use edo_synth::table::{individual_header, individual_row};

use super::clean::clean_into;
use super::generate::generate_into;
use super::model::model_into;
use super::ConfigArgs;
use crate::output::{write_provenance, TableHashes};

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Overrides the configured individuals per stratum.
    #[arg(long)]
    pub per_stratum: Option<usize>,
    /// Output directory; raw tables go to `raw/`, cleaned tables to `clean/`
    /// and model outputs to `model/`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.config.load()?;
    if let Some(n) = args.per_stratum {
        config.per_stratum = n;
    }
    let raw_dir = args.out.join("raw");
    let clean_dir = args.out.join("clean");
    let model_dir = args.out.join("model");
    for dir in [&raw_dir, &clean_dir, &model_dir] {
        fs::create_dir_all(dir)?;
    }

    let mut raw_tables = TableHashes::default();
    let population = generate_into(&config, &raw_dir, &mut raw_tables)?;
    let raw = RawTable::from_rows(
        individual_header(),
        population.individuals.iter().map(individual_row),
    );
    let mut clean_tables = TableHashes::default();
    let cleaned = clean_into(&raw, &clean_dir, &mut clean_tables)?;
    let mut model_tables = TableHashes::default();
    let outcome = model_into(&cleaned.records, &config, &model_dir, &mut model_tables)?;
    tracing::info!(
        rows = population.individuals.len(),
        cleaned = cleaned.records.len(),
        test_accuracy = outcome.report.metrics.test_accuracy,
        "pipeline finished"
    );
    let mut tables = TableHashes::default();
    tables.merge("raw", raw_tables);
    tables.merge("clean", clean_tables);
    tables.merge("model", model_tables);
    write_provenance(&args.out, &config, tables)
}
