use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rental::income::{ExpenseBreakdown, IncomeBreakdown};
use crate::rental::inputs::PropertyFinancialInputs;
use crate::types::{fraction, percent_of, ratio_or_zero, Money, Multiple, Percent};

/// Financing figures derived from price, down payment and loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub loan_amount: Money,
    pub down_payment_amount: Money,
    pub monthly_payment: Money,
    pub total_payments: u32,
    pub total_interest: Money,
    pub first_month_interest: Money,
    pub first_month_principal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowMetrics {
    /// Effective income less operating expenses, before debt service
    pub monthly_noi: Money,
    pub annual_noi: Money,
    /// NOI less the mortgage payment
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Down payment + closing costs + rehab
    pub total_cash_invested: Money,
    pub cap_rate: Percent,
    pub cash_on_cash_return: Percent,
    pub gross_rent_multiplier: Multiple,
    pub debt_coverage_ratio: Multiple,
    /// Year-one cash flow, principal paydown and appreciation over cash invested
    pub total_roi: Percent,
}

pub fn compute_cash_flow(
    income: &IncomeBreakdown,
    expenses: &ExpenseBreakdown,
    mortgage: &MortgageSummary,
) -> CashFlowMetrics {
    let twelve = Decimal::from(12);
    let monthly_noi = income.effective_monthly_income - expenses.total_monthly_expenses;
    let monthly_cash_flow = monthly_noi - mortgage.monthly_payment;

    CashFlowMetrics {
        monthly_noi,
        annual_noi: monthly_noi * twelve,
        monthly_cash_flow,
        annual_cash_flow: monthly_cash_flow * twelve,
    }
}

/// Return metrics. `year_one_principal` is the loan principal repaid over
/// the first twelve payments.
pub fn compute_returns(
    input: &PropertyFinancialInputs,
    income: &IncomeBreakdown,
    mortgage: &MortgageSummary,
    cash_flow: &CashFlowMetrics,
    year_one_principal: Money,
) -> ReturnMetrics {
    let twelve = Decimal::from(12);

    let total_cash_invested =
        mortgage.down_payment_amount + input.closing_costs + input.rehab_costs;

    // Cap rate is unleveraged: NOI and price only
    let cap_rate = percent_of(cash_flow.annual_noi, input.purchase_price);
    let cash_on_cash_return = percent_of(cash_flow.annual_cash_flow, total_cash_invested);
    let gross_rent_multiplier =
        ratio_or_zero(input.purchase_price, income.gross_monthly_income * twelve);
    let debt_coverage_ratio =
        ratio_or_zero(cash_flow.annual_noi, mortgage.monthly_payment * twelve);

    let year_one_appreciation = input.purchase_price * fraction(input.appreciation_rate_percent);
    let total_roi = percent_of(
        cash_flow.annual_cash_flow + year_one_principal + year_one_appreciation,
        total_cash_invested,
    );

    ReturnMetrics {
        total_cash_invested,
        cap_rate,
        cash_on_cash_return,
        gross_rent_multiplier,
        debt_coverage_ratio,
        total_roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::income::{compute_expenses, compute_income};
    use crate::rental::test_support::sample_inputs;
    use rust_decimal_macros::dec;

    fn mortgage(payment: Decimal, down: Decimal) -> MortgageSummary {
        MortgageSummary {
            loan_amount: dec!(240000),
            down_payment_amount: down,
            monthly_payment: payment,
            total_payments: 360,
            total_interest: Decimal::ZERO,
            first_month_interest: Decimal::ZERO,
            first_month_principal: Decimal::ZERO,
        }
    }

    #[test]
    fn test_noi_excludes_debt_service() {
        let input = sample_inputs();
        let income = compute_income(&input);
        let expenses = compute_expenses(&input);

        let low = compute_cash_flow(&income, &expenses, &mortgage(dec!(1000), dec!(60000)));
        let high = compute_cash_flow(&income, &expenses, &mortgage(dec!(2000), dec!(60000)));

        // 2375 - 962.5 = 1412.5
        assert_eq!(low.monthly_noi, dec!(1412.5));
        assert_eq!(low.monthly_noi, high.monthly_noi);
        assert_eq!(low.monthly_cash_flow, dec!(412.5));
        assert_eq!(high.annual_cash_flow, dec!(-7050));
    }

    #[test]
    fn test_cap_rate_and_grm() {
        let input = sample_inputs();
        let income = compute_income(&input);
        let expenses = compute_expenses(&input);
        let m = mortgage(dec!(1000), dec!(60000));
        let cf = compute_cash_flow(&income, &expenses, &m);
        let r = compute_returns(&input, &income, &m, &cf, Decimal::ZERO);

        // 16950 / 300000 = 5.65%
        assert_eq!(r.cap_rate, dec!(5.65));
        // 300000 / 30000 = 10
        assert_eq!(r.gross_rent_multiplier, dec!(10));
        // 16950 / 12000
        assert_eq!(r.debt_coverage_ratio, dec!(1.4125));
        assert_eq!(r.total_cash_invested, dec!(69000));
    }

    #[test]
    fn test_zero_denominators_yield_zero() {
        let mut input = sample_inputs();
        input.monthly_rent = Decimal::ZERO;
        input.closing_costs = Decimal::ZERO;
        let income = compute_income(&input);
        let expenses = compute_expenses(&input);
        let m = mortgage(Decimal::ZERO, Decimal::ZERO);
        let cf = compute_cash_flow(&income, &expenses, &m);
        let r = compute_returns(&input, &income, &m, &cf, Decimal::ZERO);

        assert_eq!(r.total_cash_invested, Decimal::ZERO);
        assert_eq!(r.cash_on_cash_return, Decimal::ZERO);
        assert_eq!(r.gross_rent_multiplier, Decimal::ZERO);
        assert_eq!(r.debt_coverage_ratio, Decimal::ZERO);
        assert_eq!(r.total_roi, Decimal::ZERO);
    }

    #[test]
    fn test_total_roi_components() {
        let input = sample_inputs();
        let income = compute_income(&input);
        let expenses = compute_expenses(&input);
        let m = mortgage(dec!(1412.5), dec!(60000));
        let cf = compute_cash_flow(&income, &expenses, &m);
        assert_eq!(cf.annual_cash_flow, Decimal::ZERO);

        let r = compute_returns(&input, &income, &m, &cf, dec!(2400));
        // (0 + 2400 + 300000 * 3%) / 69000 = 11400 / 69000
        assert_eq!(r.total_roi, dec!(11400) / dec!(69000) * dec!(100));
    }
}
