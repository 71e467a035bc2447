use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::load_config;
use crate::report::execute;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML configuration describing the run.
    #[arg(long)]
    pub config: PathBuf,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    let report = execute(&config)?;
    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, json)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
