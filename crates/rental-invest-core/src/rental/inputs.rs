use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RentalInvestError;
use crate::rental::mortgage::MAX_LOAN_TERM_YEARS;
use crate::types::{Money, Percent};
use crate::RentalInvestResult;

/// Largest single amount accepted (one trillion).
pub const MAX_AMOUNT: Money = dec!(1000000000000);

/// Highest annual appreciation or growth rate accepted.
pub const MAX_GROWTH_RATE: Percent = dec!(100);

/// Longest projection horizon.
pub const MAX_HOLDING_PERIOD_YEARS: u32 = 50;

/// Fully resolved inputs for one calculation run.
///
/// Every field carries a concrete value; defaults are applied beforehand by
/// [`crate::assumptions::resolve_inputs`]. Percentages use the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFinancialInputs {
    /// Acquisition price
    pub purchase_price: Money,
    /// Closing costs paid in cash at purchase
    pub closing_costs: Money,
    /// Renovation budget paid in cash
    pub rehab_costs: Money,
    /// Down payment as a percentage of price
    pub down_payment_percent: Percent,
    /// Annual mortgage interest rate
    pub interest_rate: Percent,
    /// Mortgage amortisation term
    pub loan_term_years: u32,
    /// Scheduled monthly rent
    pub monthly_rent: Money,
    /// Parking, laundry, storage and similar monthly income
    pub other_monthly_income: Money,
    pub property_tax_annual: Money,
    pub insurance_annual: Money,
    pub hoa_monthly: Money,
    pub utilities_monthly: Money,
    /// Vacancy allowance, applied to gross income
    pub vacancy_rate_percent: Percent,
    /// Property management, applied to rent
    pub management_rate_percent: Percent,
    /// Repairs and maintenance, applied to rent
    pub repairs_rate_percent: Percent,
    /// Capital expenditure reserve, applied to rent
    pub capex_rate_percent: Percent,
    pub appreciation_rate_percent: Percent,
    pub rent_growth_rate_percent: Percent,
    pub expense_growth_rate_percent: Percent,
    /// After-repair value; enables the 70% rule check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_repair_value: Option<Money>,
    /// Years to project forward (0 disables the projection)
    #[serde(default)]
    pub holding_period_years: u32,
}

impl PropertyFinancialInputs {
    /// Reject inputs that violate the caller contract.
    ///
    /// A non-positive purchase price is always an error; zero rent or zero
    /// cash invested are legitimate and handled by the metric guards.
    pub fn validate(&self) -> RentalInvestResult<()> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(RentalInvestError::invalid(
                "purchase_price",
                "Purchase price must be positive",
            ));
        }
        if self.loan_term_years == 0 {
            return Err(RentalInvestError::invalid(
                "loan_term_years",
                "Loan term must be at least 1 year",
            ));
        }
        if self.loan_term_years > MAX_LOAN_TERM_YEARS {
            return Err(RentalInvestError::invalid(
                "loan_term_years",
                format!("Loan term cannot exceed {MAX_LOAN_TERM_YEARS} years"),
            ));
        }
        if self.holding_period_years > MAX_HOLDING_PERIOD_YEARS {
            return Err(RentalInvestError::invalid(
                "holding_period_years",
                format!("Holding period cannot exceed {MAX_HOLDING_PERIOD_YEARS} years"),
            ));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(RentalInvestError::invalid(
                "interest_rate",
                "Interest rate cannot be negative",
            ));
        }

        let amounts = [
            ("purchase_price", self.purchase_price),
            ("closing_costs", self.closing_costs),
            ("rehab_costs", self.rehab_costs),
            ("monthly_rent", self.monthly_rent),
            ("other_monthly_income", self.other_monthly_income),
            ("property_tax_annual", self.property_tax_annual),
            ("insurance_annual", self.insurance_annual),
            ("hoa_monthly", self.hoa_monthly),
            ("utilities_monthly", self.utilities_monthly),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RentalInvestError::invalid(field, "Amount cannot be negative"));
            }
            if value > MAX_AMOUNT {
                return Err(RentalInvestError::invalid(
                    field,
                    format!("Amount cannot exceed {MAX_AMOUNT}"),
                ));
            }
        }
        if let Some(arv) = self.after_repair_value {
            if arv < Decimal::ZERO || arv > MAX_AMOUNT {
                return Err(RentalInvestError::invalid(
                    "after_repair_value",
                    format!("After-repair value must be between 0 and {MAX_AMOUNT}"),
                ));
            }
        }

        let rates = [
            ("down_payment_percent", self.down_payment_percent),
            ("vacancy_rate_percent", self.vacancy_rate_percent),
            ("management_rate_percent", self.management_rate_percent),
            ("repairs_rate_percent", self.repairs_rate_percent),
            ("capex_rate_percent", self.capex_rate_percent),
        ];
        for (field, value) in rates {
            validate_percent(field, value)?;
        }

        let growth = [
            ("appreciation_rate_percent", self.appreciation_rate_percent),
            ("rent_growth_rate_percent", self.rent_growth_rate_percent),
            ("expense_growth_rate_percent", self.expense_growth_rate_percent),
        ];
        for (field, value) in growth {
            if value <= -Decimal::ONE_HUNDRED || value > MAX_GROWTH_RATE {
                return Err(RentalInvestError::invalid(
                    field,
                    format!("Growth rate must be above -100% and at most {MAX_GROWTH_RATE}%"),
                ));
            }
        }

        Ok(())
    }
}

/// Percentages bounded to the 0–100 range.
pub(crate) fn validate_percent(field: &str, value: Percent) -> RentalInvestResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(RentalInvestError::invalid(
            field,
            format!("{value} is outside 0–100"),
        ));
    }
    Ok(())
}
