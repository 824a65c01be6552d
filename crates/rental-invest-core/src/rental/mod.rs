pub mod calculator;
pub mod income;
pub mod inputs;
pub mod mortgage;
pub mod projection;
pub mod returns;
pub mod rules;
pub mod score;

pub use calculator::{
    analyze_rental, analyze_rental_with_bands, analyze_with_defaults, quick_score,
    CalculationResult, QuickAssessment, QuickInput,
};
pub use inputs::PropertyFinancialInputs;
pub use rules::{seventy_percent_rule, FlipInput, FlipOutput, RuleCheck};

#[cfg(test)]
pub(crate) mod test_support {
    use super::inputs::PropertyFinancialInputs;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// $300k single-family rental, 20% down at 7% over 30 years, $2,500
    /// rent, default expense rates, tax and insurance from the price-based
    /// estimates.
    pub(crate) fn sample_inputs() -> PropertyFinancialInputs {
        PropertyFinancialInputs {
            purchase_price: dec!(300000),
            closing_costs: dec!(9000),
            rehab_costs: Decimal::ZERO,
            down_payment_percent: dec!(20),
            interest_rate: dec!(7),
            loan_term_years: 30,
            monthly_rent: dec!(2500),
            other_monthly_income: Decimal::ZERO,
            property_tax_annual: dec!(3300),
            insurance_annual: dec!(2250),
            hoa_monthly: Decimal::ZERO,
            utilities_monthly: Decimal::ZERO,
            vacancy_rate_percent: dec!(5),
            management_rate_percent: dec!(10),
            repairs_rate_percent: dec!(5),
            capex_rate_percent: dec!(5),
            appreciation_rate_percent: dec!(3),
            rent_growth_rate_percent: dec!(3),
            expense_growth_rate_percent: dec!(2),
            after_repair_value: None,
            holding_period_years: 5,
        }
    }
}
