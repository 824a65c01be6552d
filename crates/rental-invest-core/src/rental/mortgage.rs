use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalInvestError;
use crate::types::{fraction, Money, Percent};
use crate::RentalInvestResult;

/// Longest amortisation term accepted.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed-rate loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Money,
    /// Annual interest rate, 0–100 scale (7 = 7%)
    pub annual_rate_percent: Percent,
    /// Amortisation term in years
    pub term_years: u32,
}

/// Payment summary for a fixed-rate, fully amortising loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgagePayment {
    /// Level monthly payment (principal + interest)
    pub monthly_payment: Money,
    /// Number of monthly payments over the term
    pub total_payments: u32,
    /// payment * n - principal
    pub total_interest: Money,
    /// Interest portion of the first payment
    pub first_month_interest: Money,
    /// Principal portion of the first payment
    pub first_month_principal: Money,
}

/// One year of an amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub payments: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub ending_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1)
///
/// A zero rate amortises straight-line (`P / n`); a non-positive principal
/// yields a zero payment.
pub fn mortgage_payment(terms: &LoanTerms) -> RentalInvestResult<MortgagePayment> {
    validate_terms(terms)?;

    let total_payments = terms.term_years * 12;
    if terms.principal <= Decimal::ZERO {
        return Ok(MortgagePayment {
            monthly_payment: Decimal::ZERO,
            total_payments,
            total_interest: Decimal::ZERO,
            first_month_interest: Decimal::ZERO,
            first_month_principal: Decimal::ZERO,
        });
    }

    let monthly_rate = monthly_rate(terms.annual_rate_percent);
    let monthly_payment = level_payment(terms.principal, monthly_rate, total_payments)?;
    let first_month_interest = terms.principal * monthly_rate;

    Ok(MortgagePayment {
        monthly_payment,
        total_payments,
        total_interest: monthly_payment * Decimal::from(total_payments) - terms.principal,
        first_month_interest,
        first_month_principal: monthly_payment - first_month_interest,
    })
}

/// Year-by-year amortisation schedule over the full term.
pub fn amortization_schedule(terms: &LoanTerms) -> RentalInvestResult<Vec<AmortizationYear>> {
    let payment = mortgage_payment(terms)?.monthly_payment;
    let monthly_rate = monthly_rate(terms.annual_rate_percent);

    let mut balance = terms.principal.max(Decimal::ZERO);
    let mut schedule = Vec::with_capacity(terms.term_years as usize);

    for year in 1..=terms.term_years {
        let mut interest_paid = Decimal::ZERO;
        let mut principal_paid = Decimal::ZERO;
        let mut payments = Decimal::ZERO;

        for _ in 0..12 {
            if balance.is_zero() {
                break;
            }
            let interest = balance * monthly_rate;
            // Final payment clears whatever rounding residue is left
            let principal_part = (payment - interest).min(balance);
            balance -= principal_part;
            interest_paid += interest;
            principal_paid += principal_part;
            payments += interest + principal_part;
        }

        if year == terms.term_years && balance < dec!(0.01) {
            balance = Decimal::ZERO;
        }

        schedule.push(AmortizationYear {
            year,
            payments,
            interest_paid,
            principal_paid,
            ending_balance: balance,
        });
    }

    Ok(schedule)
}

/// Outstanding balance after `months_paid` level payments.
pub fn remaining_balance(terms: &LoanTerms, months_paid: u32) -> RentalInvestResult<Money> {
    validate_terms(terms)?;

    let principal = terms.principal.max(Decimal::ZERO);
    let total_months = terms.term_years * 12;
    if months_paid >= total_months || principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = monthly_rate(terms.annual_rate_percent);
    if monthly_rate.is_zero() {
        let paid = principal * Decimal::from(months_paid) / Decimal::from(total_months);
        return Ok(principal - paid);
    }

    let payment = level_payment(principal, monthly_rate, total_months)?;
    let mut balance = principal;
    for _ in 0..months_paid {
        balance -= payment - balance * monthly_rate;
        if balance < Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
    }

    Ok(balance)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_terms(terms: &LoanTerms) -> RentalInvestResult<()> {
    if terms.term_years == 0 {
        return Err(RentalInvestError::invalid(
            "loan_term_years",
            "Loan term must be at least 1 year",
        ));
    }
    if terms.term_years > MAX_LOAN_TERM_YEARS {
        return Err(RentalInvestError::invalid(
            "loan_term_years",
            format!("Loan term cannot exceed {MAX_LOAN_TERM_YEARS} years"),
        ));
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(RentalInvestError::invalid(
            "interest_rate",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    fraction(annual_rate_percent) / dec!(12)
}

fn level_payment(
    principal: Money,
    monthly_rate: Decimal,
    total_months: u32,
) -> RentalInvestResult<Money> {
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(total_months));
    }

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = compound
            .checked_mul(Decimal::ONE + monthly_rate)
            .ok_or_else(rate_out_of_range)?;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(RentalInvestError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(rate_out_of_range)
}

fn rate_out_of_range() -> RentalInvestError {
    RentalInvestError::invalid(
        "interest_rate",
        "Interest rate is too high to amortise over the loan term",
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
