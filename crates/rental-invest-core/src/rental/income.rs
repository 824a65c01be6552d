use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rental::inputs::PropertyFinancialInputs;
use crate::types::{fraction, Money};

/// Monthly income after the vacancy allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    /// Rent plus other income
    pub gross_monthly_income: Money,
    pub vacancy_loss: Money,
    /// Gross income less vacancy loss
    pub effective_monthly_income: Money,
}

/// Monthly operating expenses by category. Debt service is not an
/// operating expense and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub property_tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    pub utilities: Money,
    pub management: Money,
    pub repairs: Money,
    pub capex: Money,
    pub total_monthly_expenses: Money,
}

impl ExpenseBreakdown {
    /// Categories as (label, amount) pairs, in display order.
    pub fn categories(&self) -> [(&'static str, Money); 7] {
        [
            ("property_tax", self.property_tax),
            ("insurance", self.insurance),
            ("hoa", self.hoa),
            ("utilities", self.utilities),
            ("management", self.management),
            ("repairs", self.repairs),
            ("capex", self.capex),
        ]
    }
}

pub fn compute_income(input: &PropertyFinancialInputs) -> IncomeBreakdown {
    income_for(
        input.monthly_rent,
        input.other_monthly_income,
        input.vacancy_rate_percent,
    )
}

/// Income for arbitrary rent levels; projections reuse this with grown rents.
pub(crate) fn income_for(
    monthly_rent: Money,
    other_monthly_income: Money,
    vacancy_rate_percent: Decimal,
) -> IncomeBreakdown {
    let gross_monthly_income = monthly_rent + other_monthly_income;
    let vacancy_loss = gross_monthly_income * fraction(vacancy_rate_percent);

    IncomeBreakdown {
        gross_monthly_income,
        vacancy_loss,
        effective_monthly_income: gross_monthly_income - vacancy_loss,
    }
}

pub fn compute_expenses(input: &PropertyFinancialInputs) -> ExpenseBreakdown {
    expenses_for(input, input.monthly_rent, Decimal::ONE)
}

/// Expenses with fixed categories scaled by `fixed_growth` and percentage
/// categories applied to `monthly_rent`.
pub(crate) fn expenses_for(
    input: &PropertyFinancialInputs,
    monthly_rent: Money,
    fixed_growth: Decimal,
) -> ExpenseBreakdown {
    let twelve = Decimal::from(12);

    let property_tax = input.property_tax_annual / twelve * fixed_growth;
    let insurance = input.insurance_annual / twelve * fixed_growth;
    let hoa = input.hoa_monthly * fixed_growth;
    let utilities = input.utilities_monthly * fixed_growth;
    let management = monthly_rent * fraction(input.management_rate_percent);
    let repairs = monthly_rent * fraction(input.repairs_rate_percent);
    let capex = monthly_rent * fraction(input.capex_rate_percent);

    let mut breakdown = ExpenseBreakdown {
        property_tax,
        insurance,
        hoa,
        utilities,
        management,
        repairs,
        capex,
        total_monthly_expenses: Decimal::ZERO,
    };
    breakdown.total_monthly_expenses = breakdown.categories().iter().map(|(_, v)| *v).sum();
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::test_support::sample_inputs;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_with_vacancy() {
        let mut input = sample_inputs();
        input.other_monthly_income = dec!(100);
        let income = compute_income(&input);

        // (2500 + 100) * 5% = 130
        assert_eq!(income.gross_monthly_income, dec!(2600));
        assert_eq!(income.vacancy_loss, dec!(130));
        assert_eq!(income.effective_monthly_income, dec!(2470));
    }

    #[test]
    fn test_zero_vacancy() {
        let mut input = sample_inputs();
        input.vacancy_rate_percent = Decimal::ZERO;
        let income = compute_income(&input);
        assert_eq!(income.vacancy_loss, Decimal::ZERO);
        assert_eq!(income.effective_monthly_income, income.gross_monthly_income);
    }

    #[test]
    fn test_expense_categories() {
        let mut input = sample_inputs();
        input.hoa_monthly = dec!(50);
        input.utilities_monthly = dec!(80);
        let exp = compute_expenses(&input);

        assert_eq!(exp.property_tax, dec!(275));
        assert_eq!(exp.insurance, dec!(187.5));
        assert_eq!(exp.hoa, dec!(50));
        assert_eq!(exp.utilities, dec!(80));
        assert_eq!(exp.management, dec!(250));
        assert_eq!(exp.repairs, dec!(125));
        assert_eq!(exp.capex, dec!(125));
        assert_eq!(exp.total_monthly_expenses, dec!(1092.5));
    }

    #[test]
    fn test_categories_sum_to_total() {
        let exp = compute_expenses(&sample_inputs());
        let labels: Vec<&str> = exp.categories().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            labels,
            ["property_tax", "insurance", "hoa", "utilities", "management", "repairs", "capex"]
        );
        let sum: Decimal = exp.categories().iter().map(|(_, v)| *v).sum();
        assert_eq!(sum, exp.total_monthly_expenses);
    }

    #[test]
    fn test_percentage_expenses_use_rent_not_other_income() {
        let mut input = sample_inputs();
        let base = compute_expenses(&input);
        input.other_monthly_income = dec!(500);
        let with_other = compute_expenses(&input);
        assert_eq!(base, with_other);
    }
}
