mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::mortgage::{AmortizeArgs, MortgageArgs};
use commands::rental::{AnalyzeArgs, DefaultsArgs, FlipArgs, QuickArgs};

/// Rental property investment analysis
#[derive(Parser)]
#[command(
    name = "rentcalc",
    version,
    about = "Rental property investment analysis",
    long_about = "A CLI for analysing rental property investments with decimal precision. \
                  Supports mortgage amortisation, cash flow, cap rate, cash-on-cash return, \
                  1%/2%/50%/70% rule checks and an overall investment score."
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
    /// Run the full rental analysis from a JSON input
    Analyze(AnalyzeArgs),
    /// Quick investment score from price and rent
    Quick(QuickArgs),
    /// Monthly payment for a fixed-rate mortgage
    Mortgage(MortgageArgs),
    /// Year-by-year amortisation schedule
    Amortize(AmortizeArgs),
    /// 70% rule check for a fix-and-flip
    Flip(FlipArgs),
    /// Print the default assumption table
    Defaults(DefaultsArgs),
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

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG`, defaults to `warn`, and writes to stderr so that
/// stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::rental::run_analyze(args),
        Commands::Quick(args) => commands::rental::run_quick(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::Flip(args) => commands::rental::run_flip(args),
        Commands::Defaults(args) => commands::rental::run_defaults(args),
        Commands::Version => {
            println!("rentcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!(format = ?cli.output, "writing output");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
