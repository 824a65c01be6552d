use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::assumptions::{resolve_inputs, Assumptions, MarketData, UserInputs};
use crate::error::RentalInvestError;
use crate::rental::income::{compute_expenses, compute_income, ExpenseBreakdown, IncomeBreakdown};
use crate::rental::inputs::PropertyFinancialInputs;
use crate::rental::mortgage::{amortization_schedule, mortgage_payment, LoanTerms};
use crate::rental::projection::{project, ProjectionYear};
use crate::rental::returns::{
    compute_cash_flow, compute_returns, CashFlowMetrics, MortgageSummary, ReturnMetrics,
};
use crate::rental::rules::{
    debt_coverage_rule, fifty_percent_rule, one_percent_rule, seventy_percent_check,
    two_percent_rule, RuleCheck, RuleChecks,
};
use crate::rental::score::{score_investment, Rating, ScoreBands, ScoreInputs, ScoreSummary};
use crate::types::{fraction, with_metadata, ComputationOutput, Money, Percent};
use crate::RentalInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Every metric derived from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub mortgage: MortgageSummary,
    pub income: IncomeBreakdown,
    pub expenses: ExpenseBreakdown,
    pub cash_flow: CashFlowMetrics,
    pub returns: ReturnMetrics,
    pub rules: RuleChecks,
    pub summary: ScoreSummary,
    pub projections: Vec<ProjectionYear>,
}

/// Minimal inputs for a fast screen of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickInput {
    pub purchase_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax_annual: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_annual: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Percent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAssessment {
    pub score: u32,
    pub max_score: u32,
    pub rating: Rating,
    pub cap_rate: Percent,
    pub cash_on_cash_return: Percent,
    pub monthly_cash_flow: Money,
    pub passes_one_percent: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full rental analysis with the default score bands.
pub fn analyze_rental(
    input: &PropertyFinancialInputs,
) -> RentalInvestResult<ComputationOutput<CalculationResult>> {
    analyze_rental_with_bands(input, &ScoreBands::default())
}

/// Full rental analysis: mortgage, income, expenses, cash flow, returns,
/// rule checks, score and projection.
pub fn analyze_rental_with_bands(
    input: &PropertyFinancialInputs,
    bands: &ScoreBands,
) -> RentalInvestResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;
    debug!(
        purchase_price = %input.purchase_price,
        monthly_rent = %input.monthly_rent,
        "analyzing rental"
    );

    let result = calculate(input, bands)?;
    collect_warnings(input, &result, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rental Property Analysis (NOI, cash flow, cap rate, cash-on-cash)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Resolve missing fields from market data and the assumption table, then
/// run the full analysis.
pub fn analyze_with_defaults(
    user: &UserInputs,
    market: &MarketData,
    assumptions: &Assumptions,
) -> RentalInvestResult<ComputationOutput<CalculationResult>> {
    let resolved = resolve_inputs(user, market, assumptions)?;
    let mut output = analyze_rental_with_bands(&resolved.inputs, &assumptions.score_bands)?;

    let mut warnings = resolved.warnings;
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    let inputs = serde_json::to_value(&resolved.inputs)?;
    let sources = serde_json::to_value(&resolved.sources)?;
    let table = serde_json::to_value(assumptions)?;
    output.assumptions = serde_json::json!({
        "inputs": inputs,
        "sources": sources,
        "table": table,
    });

    Ok(output)
}

/// Fast screen from price and whatever else is known; everything else comes
/// from the assumption table.
pub fn quick_score(
    input: &QuickInput,
    assumptions: &Assumptions,
) -> RentalInvestResult<ComputationOutput<QuickAssessment>> {
    let start = Instant::now();

    if input.purchase_price <= Decimal::ZERO {
        return Err(RentalInvestError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }

    let user = UserInputs {
        purchase_price: input.purchase_price,
        monthly_rent: input.monthly_rent,
        property_tax_annual: input.property_tax_annual,
        insurance_annual: input.insurance_annual,
        interest_rate: input.interest_rate,
        holding_period_years: Some(0),
        ..Default::default()
    };
    let resolved = resolve_inputs(&user, &MarketData::default(), assumptions)?;
    let full = calculate(&resolved.inputs, &assumptions.score_bands)?;

    let output = QuickAssessment {
        score: full.summary.score,
        max_score: full.summary.max_score,
        rating: full.summary.rating,
        cap_rate: full.returns.cap_rate,
        cash_on_cash_return: full.returns.cash_on_cash_return,
        monthly_cash_flow: full.cash_flow.monthly_cash_flow,
        passes_one_percent: full.rules.one_percent.passes,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Quick Investment Score",
        &resolved.inputs,
        resolved.warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

fn calculate(
    input: &PropertyFinancialInputs,
    bands: &ScoreBands,
) -> RentalInvestResult<CalculationResult> {
    let down_payment_amount = input.purchase_price * fraction(input.down_payment_percent);
    let loan = LoanTerms {
        principal: input.purchase_price - down_payment_amount,
        annual_rate_percent: input.interest_rate,
        term_years: input.loan_term_years,
    };
    let payment = mortgage_payment(&loan)?;
    let year_one_principal = amortization_schedule(&loan)?
        .first()
        .map(|y| y.principal_paid)
        .unwrap_or(Decimal::ZERO);

    let mortgage = MortgageSummary {
        loan_amount: loan.principal,
        down_payment_amount,
        monthly_payment: payment.monthly_payment,
        total_payments: payment.total_payments,
        total_interest: payment.total_interest,
        first_month_interest: payment.first_month_interest,
        first_month_principal: payment.first_month_principal,
    };

    let income = compute_income(input);
    let expenses = compute_expenses(input);
    let cash_flow = compute_cash_flow(&income, &expenses, &mortgage);
    let returns = compute_returns(input, &income, &mortgage, &cash_flow, year_one_principal);
    let rules = check_rules(input, &income, &expenses, &returns);

    let summary = score_investment(
        &ScoreInputs {
            cap_rate: returns.cap_rate,
            cash_on_cash_return: returns.cash_on_cash_return,
            passes_one_percent: rules.one_percent.passes,
            passes_debt_coverage: rules.debt_coverage.passes,
        },
        bands,
    );

    let projections = project(
        input,
        &loan,
        mortgage.monthly_payment,
        returns.total_cash_invested,
    )?;

    Ok(CalculationResult {
        mortgage,
        income,
        expenses,
        cash_flow,
        returns,
        rules,
        summary,
        projections,
    })
}

fn check_rules(
    input: &PropertyFinancialInputs,
    income: &IncomeBreakdown,
    expenses: &ExpenseBreakdown,
    returns: &ReturnMetrics,
) -> RuleChecks {
    let seventy_percent: Option<RuleCheck> = input
        .after_repair_value
        .map(|arv| seventy_percent_check(input.purchase_price, arv, input.rehab_costs));

    RuleChecks {
        one_percent: one_percent_rule(input.monthly_rent, input.purchase_price),
        two_percent: two_percent_rule(input.monthly_rent, input.purchase_price),
        fifty_percent: fifty_percent_rule(
            expenses.total_monthly_expenses,
            income.gross_monthly_income,
        ),
        debt_coverage: debt_coverage_rule(returns.debt_coverage_ratio),
        seventy_percent,
    }
}

fn collect_warnings(
    input: &PropertyFinancialInputs,
    result: &CalculationResult,
    warnings: &mut Vec<String>,
) {
    if result.cash_flow.monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow of ${:.2}/month — property does not cover its costs",
            result.cash_flow.monthly_cash_flow
        ));
    }

    let dcr = result.returns.debt_coverage_ratio;
    if dcr > Decimal::ZERO && !result.rules.debt_coverage.passes {
        warnings.push(format!(
            "DCR of {dcr:.2}x is below 1.25x — lenders may decline financing"
        ));
    }

    if input.vacancy_rate_percent > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            input.vacancy_rate_percent
        ));
    }

    if input.interest_rate > dec!(15) {
        warnings.push(format!(
            "Interest rate {:.2}% exceeds 15% — verify the rate is annual and in percent",
            input.interest_rate
        ));
    }

    if input.monthly_rent.is_zero() {
        warn!("monthly rent is zero; income-based metrics collapse to zero");
    }
}
