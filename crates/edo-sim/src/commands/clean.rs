use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use edo_clean::{clean, CleanedTable, RawTable};
use edo_synth::summarize;
use edo_synth::table::write_summaries;

use super::{read_table, ConfigArgs};
use crate::output::{write_provenance, TableHashes};

#[derive(Args, Debug)]
pub struct CleanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Raw individual table.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &CleanArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.load()?;
    let raw = read_table(&args.input)?;
    fs::create_dir_all(&args.out)?;
    let mut tables = TableHashes::default();
    clean_into(&raw, &args.out, &mut tables)?;
    write_provenance(&args.out, &config, tables)
}

/// Cleans `raw` and writes the cleaned table, its report and the stratum summary.
pub fn clean_into(raw: &RawTable, out: &Path, tables: &mut TableHashes) -> Result<CleanedTable, Box<dyn Error>> {
    let cleaned = clean(raw)?;
    tables.write(out, "cleaned.csv", |w| cleaned.write_csv(w))?;
    tables.write_json(out, "cleaning_report.json", &cleaned.report)?;
    let summaries = summarize(&cleaned.records);
    tables.write(out, "state_summary.csv", |w| write_summaries(w, &summaries))?;
    Ok(cleaned)
}
