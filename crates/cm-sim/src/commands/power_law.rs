use std::error::Error;

use clap::Args;
use cm_graph::power_law_sequence;

#[derive(Args, Debug)]
pub struct PowerLawArgs {
    /// Number of vertices.
    #[arg(long, default_value_t = 1001)]
    pub vertices: usize,
    /// Power-law exponent; must exceed one.
    #[arg(long, default_value_t = 3.5)]
    pub tau: f64,
}

pub fn run(args: &PowerLawArgs) -> Result<(), Box<dyn Error>> {
    let sequence = power_law_sequence(args.vertices, args.tau)?;
    println!("{}", serde_json::to_string(&sequence)?);
    Ok(())
}
