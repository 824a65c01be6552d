use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RentalInvestError;
use crate::rental::income::{expenses_for, income_for};
use crate::rental::inputs::PropertyFinancialInputs;
use crate::rental::mortgage::{remaining_balance, LoanTerms};
use crate::types::{fraction, percent_of, Money, Percent};
use crate::RentalInvestResult;

/// One year of a buy-and-hold projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: u32,
    /// Price compounded by the appreciation rate
    pub property_value: Money,
    pub monthly_rent: Money,
    pub annual_gross_income: Money,
    pub annual_operating_expenses: Money,
    pub annual_noi: Money,
    pub annual_debt_service: Money,
    pub annual_cash_flow: Money,
    pub loan_balance: Money,
    pub equity: Money,
    pub cumulative_cash_flow: Money,
    /// (cumulative cash flow + equity - cash invested) / cash invested
    pub total_return_percent: Percent,
}

/// Project `holding_period_years` of operations.
///
/// Rent and other income grow by the rent growth rate, fixed expenses by the
/// expense growth rate, and percentage expenses follow rent. Debt service
/// stops once the loan term has run out.
pub fn project(
    input: &PropertyFinancialInputs,
    loan: &LoanTerms,
    monthly_payment: Money,
    total_cash_invested: Money,
) -> RentalInvestResult<Vec<ProjectionYear>> {
    let n = input.holding_period_years;
    let mut years = Vec::with_capacity(n as usize);

    let appreciation = Decimal::ONE + fraction(input.appreciation_rate_percent);
    let rent_growth = Decimal::ONE + fraction(input.rent_growth_rate_percent);
    let expense_growth = Decimal::ONE + fraction(input.expense_growth_rate_percent);

    let mut property_value = input.purchase_price;
    let mut rent = input.monthly_rent;
    let mut other_income = input.other_monthly_income;
    let mut fixed_growth = Decimal::ONE;
    let mut cumulative_cash_flow = Decimal::ZERO;

    for year in 1..=n {
        if year > 1 {
            rent = grow(rent, rent_growth, "rent_growth_rate_percent")?;
            other_income = grow(other_income, rent_growth, "rent_growth_rate_percent")?;
            fixed_growth = grow(fixed_growth, expense_growth, "expense_growth_rate_percent")?;
        }
        property_value = grow(property_value, appreciation, "appreciation_rate_percent")?;

        let income = income_for(rent, other_income, input.vacancy_rate_percent);
        let expenses = expenses_for(input, rent, fixed_growth);
        let twelve = Decimal::from(12);

        let annual_gross_income = income.gross_monthly_income * twelve;
        let annual_operating_expenses = expenses.total_monthly_expenses * twelve;
        let annual_noi =
            (income.effective_monthly_income - expenses.total_monthly_expenses) * twelve;

        let payments_this_year = payments_in_year(year, loan.term_years);
        let annual_debt_service = monthly_payment * Decimal::from(payments_this_year);
        let annual_cash_flow = annual_noi - annual_debt_service;
        cumulative_cash_flow += annual_cash_flow;

        let loan_balance = remaining_balance(loan, year.saturating_mul(12))?;
        let equity = property_value - loan_balance;
        let total_return_percent = percent_of(
            cumulative_cash_flow + equity - total_cash_invested,
            total_cash_invested,
        );

        years.push(ProjectionYear {
            year,
            property_value,
            monthly_rent: rent,
            annual_gross_income,
            annual_operating_expenses,
            annual_noi,
            annual_debt_service,
            annual_cash_flow,
            loan_balance,
            equity,
            cumulative_cash_flow,
            total_return_percent,
        });
    }

    Ok(years)
}

fn grow(value: Decimal, factor: Decimal, field: &str) -> RentalInvestResult<Decimal> {
    value.checked_mul(factor).ok_or_else(|| {
        RentalInvestError::invalid(field, "Growth compounds out of range over the holding period")
    })
}

fn payments_in_year(year: u32, term_years: u32) -> u32 {
    if year <= term_years {
        12
    } else {
        0
    }
}
