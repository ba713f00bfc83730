use clap::Args;
use serde_json::{json, Value};

use appraisal_core::inventory::{
    compute_rollups, normalize_inventory, validate_inventory, ValidationOptions,
};

use crate::input;

/// Arguments for inventory normalization and rollups
#[derive(Args)]
pub struct InventoryArgs {
    /// Path to a raw inventory document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat an empty improvement tree as an error (off for land-only
    /// templates)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub require_improvements: bool,
}

pub fn run_inventory(args: InventoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = input::load_value(args.input.as_deref(), "for the inventory document")?;

    let inventory = normalize_inventory(&raw);
    let rollups = compute_rollups(&inventory);
    let validation = validate_inventory(
        &inventory,
        &ValidationOptions {
            require_improvements: args.require_improvements,
        },
    );

    Ok(json!({
        "inventory": inventory,
        "rollups": rollups,
        "validation": validation,
    }))
}
