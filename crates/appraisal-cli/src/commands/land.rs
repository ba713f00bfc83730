use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use appraisal_core::land::{value_land, LandValuationInput};

use crate::input;

/// Default precision for the quick round action: nearest $1,000.
const DEFAULT_ROUND_PRECISION: Decimal = dec!(1000);

/// Arguments for a land grid valuation
#[derive(Args)]
pub struct LandArgs {
    /// Path to a JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Snap the indicated value to the nearest $1,000
    #[arg(long, conflicts_with = "round_to")]
    pub round: bool,

    /// Snap the indicated value to this precision (e.g. 5000)
    #[arg(long)]
    pub round_to: Option<Decimal>,
}

pub fn run_land(args: LandArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut land_input: LandValuationInput =
        input::load(args.input.as_deref(), "for the land grid")?;

    if let Some(precision) = args.round_to {
        land_input.round_to_nearest = Some(precision);
    } else if args.round {
        land_input.round_to_nearest = Some(DEFAULT_ROUND_PRECISION);
    }

    let result = value_land(&land_input)?;
    Ok(serde_json::to_value(result)?)
}
