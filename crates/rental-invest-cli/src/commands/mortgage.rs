use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use rental_invest_core::rental::mortgage::{self, LoanTerms};

use crate::input;

/// Arguments for the mortgage payment calculation
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7 for 7%)
    #[arg(long, default_value = "7")]
    pub rate: Decimal,

    /// Term in years
    #[arg(long, default_value = "30")]
    pub term: u32,
}

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct AmortizeArgs {
    #[command(flatten)]
    pub loan: MortgageArgs,
}

fn loan_terms(args: MortgageArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    Ok(LoanTerms {
        principal,
        annual_rate_percent: args.rate,
        term_years: args.term,
    })
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = loan_terms(args)?;
    let result = mortgage::mortgage_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = loan_terms(args.loan)?;
    let schedule = mortgage::amortization_schedule(&terms)?;
    Ok(serde_json::to_value(schedule)?)
}
