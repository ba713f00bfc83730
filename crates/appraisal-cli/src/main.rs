mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::appraise::AppraiseArgs;
use commands::cost::CostArgs;
use commands::inventory::InventoryArgs;
use commands::land::LandArgs;

/// Valuation calculations for commercial real-estate appraisal
#[derive(Parser)]
#[command(
    name = "apv",
    version,
    about = "Valuation calculations for commercial real-estate appraisal",
    long_about = "A CLI for the appraisal valuation engine: inventory \
                  normalization and rollups, cost approach line items with \
                  composed depreciation, sales-comparison land valuation, and \
                  per-scenario value conclusions — all with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an inventory document, validate it, and compute rollups
    Inventory(InventoryArgs),
    /// Run the cost approach for a set of selected buildings
    Cost(CostArgs),
    /// Run the sales-comparison land valuation grid
    Land(LandArgs),
    /// Run a full scenario appraisal (cost + land + conclusion)
    Appraise(AppraiseArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Inventory(args) => commands::inventory::run_inventory(args),
        Commands::Cost(args) => commands::cost::run_cost(args),
        Commands::Land(args) => commands::land::run_land(args),
        Commands::Appraise(args) => commands::appraise::run_appraise(args),
        Commands::Version => {
            println!("apv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
