use std::error::Error;

use clap::Args;
use cm_core::errors::CmError;
use cm_graph::DegreeSequence;
use serde_json::{json, Value};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Comma-separated degrees, e.g. `3,1,1,1`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub degrees: Vec<i64>,
}

pub fn run(args: &ValidateArgs) -> Result<(), Box<dyn Error>> {
    let checked = DegreeSequence::from_signed(&args.degrees);
    println!("{}", serde_json::to_string_pretty(&render(&checked))?);
    checked?;
    Ok(())
}

/// JSON verdict printed by `cm-sim validate`.
pub fn verdict(degrees: &[i64]) -> Value {
    render(&DegreeSequence::from_signed(degrees))
}

fn render(checked: &Result<DegreeSequence, CmError>) -> Value {
    match checked {
        Ok(sequence) => json!({
            "valid": true,
            "vertices": sequence.len(),
            "stubs": sequence.stub_count(),
        }),
        Err(err) => json!({ "valid": false, "error": err }),
    }
}
