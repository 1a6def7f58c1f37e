use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    clean::{self, CleanArgs},
    generate::{self, GenerateArgs},
    model::{self, ModelArgs},
    run::{self, RunArgs},
};

mod commands;
mod config;
mod logging;
mod output;

#[derive(Parser, Debug)]
#[command(name = "edo-sim", about = "Synthetic education outcomes: generate, clean and model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize strata and sample individuals.
    Generate(GenerateArgs),
    /// Validate and repair a raw individual table.
    Clean(CleanArgs),
    /// Fit the inference model and classifier on a cleaned table.
    Model(ModelArgs),
    /// Run generate, clean and model end to end.
    Run(RunArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Clean(args) => clean::run(&args),
        Command::Model(args) => model::run(&args),
        Command::Run(args) => run::run(&args),
    }
}
