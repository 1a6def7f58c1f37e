use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use edo_synth::table::{write_individuals, write_strata, write_summaries};
use edo_synth::{generate_population, summarize, Population};

use super::ConfigArgs;
use crate::config::PipelineConfig;
use crate::output::{write_provenance, TableHashes};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Overrides the configured individuals per stratum.
    #[arg(long)]
    pub per_stratum: Option<usize>,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.config.load()?;
    if let Some(n) = args.per_stratum {
        config.per_stratum = n;
    }
    fs::create_dir_all(&args.out)?;
    let mut tables = TableHashes::default();
    generate_into(&config, &args.out, &mut tables)?;
    write_provenance(&args.out, &config, tables)
}

/// Generates the population and writes the strata, individual and raw summary tables.
pub fn generate_into(
    config: &PipelineConfig,
    out: &Path,
    tables: &mut TableHashes,
) -> Result<Population, Box<dyn Error>> {
    let population = generate_population(
        &config.regions(),
        &config.generative,
        config.per_stratum,
        config.seed,
    )?;
    tables.write(out, "strata.csv", |w| write_strata(w, &population.strata))?;
    tables.write(out, "individuals.csv", |w| {
        write_individuals(w, &population.individuals)
    })?;
    let summaries = summarize(&population.individuals);
    tables.write(out, "state_summary.csv", |w| write_summaries(w, &summaries))?;
    Ok(population)
}
