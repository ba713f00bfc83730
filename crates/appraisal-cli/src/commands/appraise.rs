use clap::Args;
use serde_json::Value;

use appraisal_core::conclusion::{appraise_scenario, ScenarioAppraisalInput};

use crate::commands::ensure_as_of_year;
use crate::input;

/// Arguments for a full scenario appraisal
#[derive(Args)]
pub struct AppraiseArgs {
    /// Path to a JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Valuation-date year for effective-age derivation (defaults to the
    /// current year when the input omits it)
    #[arg(long)]
    pub as_of_year: Option<i32>,
}

pub fn run_appraise(args: AppraiseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut raw = input::load_value(args.input.as_deref(), "for the scenario appraisal")?;
    ensure_as_of_year(&mut raw, args.as_of_year);

    let appraisal_input: ScenarioAppraisalInput = serde_json::from_value(raw)?;
    let result = appraise_scenario(&appraisal_input)?;
    Ok(serde_json::to_value(result)?)
}
