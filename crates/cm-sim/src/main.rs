use std::error::Error;

use clap::{Parser, Subcommand};
use cm_sim::commands::{
    power_law::{self, PowerLawArgs},
    run::{self, RunArgs},
    validate::{self, ValidateArgs},
};
use cm_sim::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "cm-sim", about = "Configuration-model multigraph generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Realize a multigraph from a YAML configuration and report its distributions.
    Run(RunArgs),
    /// Check whether a degree sequence can be realized.
    Validate(ValidateArgs),
    /// Print the deterministic power-law degree sequence.
    PowerLaw(PowerLawArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Validate(args) => validate::run(&args),
        Command::PowerLaw(args) => power_law::run(&args),
    }
}
