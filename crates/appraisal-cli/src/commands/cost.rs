use clap::Args;
use serde_json::Value;

use appraisal_core::cost::{compute_cost_approach, CostApproachInput};

use crate::commands::ensure_as_of_year;
use crate::input;

/// Arguments for a cost approach run
#[derive(Args)]
pub struct CostArgs {
    /// Path to a JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Valuation-date year for effective-age derivation (defaults to the
    /// current year when the input omits it)
    #[arg(long)]
    pub as_of_year: Option<i32>,
}

pub fn run_cost(args: CostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut raw = input::load_value(args.input.as_deref(), "for the cost approach")?;
    ensure_as_of_year(&mut raw, args.as_of_year);

    let cost_input: CostApproachInput = serde_json::from_value(raw)?;
    let result = compute_cost_approach(&cost_input);
    Ok(serde_json::to_value(result)?)
}
