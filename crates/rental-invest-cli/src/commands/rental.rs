use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use rental_invest_core::assumptions::{Assumptions, MarketData, UserInputs};
use rental_invest_core::rental::{
    self, CalculationResult, FlipInput, PropertyFinancialInputs, QuickInput,
};
use rental_invest_core::{ComputationOutput, RentalInvestResult};

use crate::input;

/// Body accepted by `analyze`: either fully resolved inputs, or user values
/// plus optional market data and assumption overrides.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzeRequest {
    Resolved(PropertyFinancialInputs),
    WithDefaults {
        user: UserInputs,
        #[serde(default)]
        market: MarketData,
        #[serde(default)]
        assumptions: Option<Assumptions>,
    },
}

/// Arguments for the full rental analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Assumption table override (JSON or YAML)
    #[arg(long)]
    pub assumptions: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: AnalyzeRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for rental analysis".into());
    };

    let table_override = match args.assumptions {
        Some(ref path) => Some(input::file::read_assumptions(path)?),
        None => None,
    };

    let result = analyze_request(request, table_override)?;
    Ok(serde_json::to_value(result)?)
}

fn analyze_request(
    request: AnalyzeRequest,
    table_override: Option<Assumptions>,
) -> RentalInvestResult<ComputationOutput<CalculationResult>> {
    match request {
        AnalyzeRequest::Resolved(inputs) => {
            let bands = table_override.unwrap_or_default().score_bands;
            rental::analyze_rental_with_bands(&inputs, &bands)
        }
        AnalyzeRequest::WithDefaults {
            user,
            market,
            assumptions,
        } => {
            // A file given on the command line beats one embedded in the body
            let table = table_override.or(assumptions).unwrap_or_default();
            rental::analyze_with_defaults(&user, &market, &table)
        }
    }
}

/// Arguments for the quick score
#[derive(Args)]
pub struct QuickArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Annual property tax
    #[arg(long)]
    pub tax: Option<Decimal>,

    /// Annual insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Annual mortgage rate in percent (e.g. 6.75)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Assumption table override (JSON or YAML)
    #[arg(long)]
    pub assumptions: Option<String>,
}

pub fn run_quick(args: QuickArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quick_input: QuickInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        let price = args
            .price
            .ok_or("--price is required (or provide --input)")?;
        QuickInput {
            purchase_price: price,
            monthly_rent: args.rent,
            property_tax_annual: args.tax,
            insurance_annual: args.insurance,
            interest_rate: args.rate,
        }
    };

    let table = match args.assumptions {
        Some(ref path) => input::file::read_assumptions(path)?,
        None => Assumptions::default(),
    };

    let result = rental::quick_score(&quick_input, &table)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the 70% rule
#[derive(Args)]
pub struct FlipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// After-repair value
    #[arg(long)]
    pub arv: Option<Decimal>,

    /// Estimated repair costs
    #[arg(long, default_value = "0")]
    pub repairs: Decimal,
}

pub fn run_flip(args: FlipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flip_input: FlipInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        FlipInput {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            after_repair_value: args.arv.ok_or("--arv is required (or provide --input)")?,
            repair_costs: args.repairs,
        }
    };

    let result = rental::seventy_percent_rule(&flip_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for printing the assumption table
#[derive(Args)]
pub struct DefaultsArgs {
    /// Show the table after applying this override file (JSON or YAML)
    #[arg(long)]
    pub assumptions: Option<String>,
}

pub fn run_defaults(args: DefaultsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = match args.assumptions {
        Some(ref path) => input::file::read_assumptions(path)?,
        None => Assumptions::default(),
    };
    debug!(?table, "assumption table");
    Ok(serde_json::to_value(table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rental_invest_core::rental::mortgage::{mortgage_payment, LoanTerms};
    use serde_json::json;

    fn resolved_body() -> Value {
        json!({
            "purchase_price": "300000",
            "closing_costs": "9000",
            "rehab_costs": "0",
            "down_payment_percent": "20",
            "interest_rate": "7",
            "loan_term_years": 30,
            "monthly_rent": "2500",
            "other_monthly_income": "0",
            "property_tax_annual": "3300",
            "insurance_annual": "2250",
            "hoa_monthly": "0",
            "utilities_monthly": "0",
            "vacancy_rate_percent": "5",
            "management_rate_percent": "10",
            "repairs_rate_percent": "5",
            "capex_rate_percent": "5",
            "appreciation_rate_percent": "3",
            "rent_growth_rate_percent": "3",
            "expense_growth_rate_percent": "2",
            "holding_period_years": 5
        })
    }

    fn payment_at(rate: Decimal) -> Decimal {
        mortgage_payment(&LoanTerms {
            principal: Decimal::from(240000),
            annual_rate_percent: rate,
            term_years: 30,
        })
        .unwrap()
        .monthly_payment
    }

    #[test]
    fn test_resolved_body_parses_as_resolved() {
        let request: AnalyzeRequest = serde_json::from_value(resolved_body()).unwrap();
        match request {
            AnalyzeRequest::Resolved(inputs) => {
                assert_eq!(inputs.purchase_price, Decimal::from(300000));
                assert_eq!(inputs.after_repair_value, None);
            }
            AnalyzeRequest::WithDefaults { .. } => panic!("resolved body read as user inputs"),
        }
    }

    #[test]
    fn test_user_body_parses_with_defaults() {
        let body = json!({
            "user": { "purchase_price": "300000", "monthly_rent": "2500" },
            "assumptions": { "interest_rate": "6" }
        });
        let request: AnalyzeRequest = serde_json::from_value(body).unwrap();
        match request {
            AnalyzeRequest::WithDefaults {
                user,
                market,
                assumptions,
            } => {
                assert_eq!(user.purchase_price, Decimal::from(300000));
                assert_eq!(market.interest_rate, None);
                let table = assumptions.unwrap();
                assert_eq!(table.interest_rate, Decimal::from(6));
                assert_eq!(table.loan_term_years, Assumptions::default().loan_term_years);
            }
            AnalyzeRequest::Resolved(_) => panic!("user body read as resolved inputs"),
        }
    }

    #[test]
    fn test_body_table_applies_without_override() {
        let body = json!({
            "user": { "purchase_price": "300000", "monthly_rent": "2500" },
            "assumptions": { "interest_rate": "6" }
        });
        let request: AnalyzeRequest = serde_json::from_value(body).unwrap();
        let out = analyze_request(request, None).unwrap();
        assert_eq!(out.result.mortgage.monthly_payment, payment_at(Decimal::from(6)));
    }

    #[test]
    fn test_override_file_beats_body_table() {
        let body = json!({
            "user": { "purchase_price": "300000", "monthly_rent": "2500" },
            "assumptions": { "interest_rate": "6" }
        });
        let request: AnalyzeRequest = serde_json::from_value(body).unwrap();
        let table_override = Assumptions {
            interest_rate: Decimal::from(8),
            ..Default::default()
        };
        let out = analyze_request(request, Some(table_override)).unwrap();
        assert_eq!(out.result.mortgage.monthly_payment, payment_at(Decimal::from(8)));
    }

    #[test]
    fn test_resolved_body_ignores_table_rates() {
        let request: AnalyzeRequest = serde_json::from_value(resolved_body()).unwrap();
        let table_override = Assumptions {
            interest_rate: Decimal::from(8),
            ..Default::default()
        };
        let out = analyze_request(request, Some(table_override)).unwrap();
        assert_eq!(out.result.mortgage.monthly_payment, payment_at(Decimal::from(7)));
    }
}
