use pretty_assertions::assert_eq;
use rental_invest_core::assumptions::{Assumptions, MarketData, UserInputs};
use rental_invest_core::rental::mortgage::{mortgage_payment, LoanTerms};
use rental_invest_core::rental::score::Rating;
use rental_invest_core::rental::{self, PropertyFinancialInputs};
use rental_invest_core::RentalInvestError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// $300k rental at default expense rates; tax and insurance from the
/// price-based estimates, 3% closing costs.
fn scenario() -> PropertyFinancialInputs {
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

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn test_identical_inputs_identical_results() {
    let a = rental::analyze_rental(&scenario()).unwrap();
    let b = rental::analyze_rental(&scenario()).unwrap();

    assert_eq!(a.result, b.result);
    assert_eq!(
        serde_json::to_string(&a.result).unwrap(),
        serde_json::to_string(&b.result).unwrap()
    );
}

// ===========================================================================
// Mortgage
// ===========================================================================

#[test]
fn test_mortgage_400k_reference_payment() {
    let pmt = mortgage_payment(&LoanTerms {
        principal: dec!(400000),
        annual_rate_percent: dec!(7.0),
        term_years: 30,
    })
    .unwrap();
    assert!(
        (pmt.monthly_payment - dec!(2661.21)).abs() < dec!(1),
        "Expected ~$2,661.21, got {}",
        pmt.monthly_payment
    );
}

#[test]
fn test_mortgage_zero_rate_exact() {
    let pmt = mortgage_payment(&LoanTerms {
        principal: dec!(400000),
        annual_rate_percent: Decimal::ZERO,
        term_years: 30,
    })
    .unwrap();
    assert_eq!(pmt.monthly_payment, dec!(400000) / dec!(360));
}

// ===========================================================================
// Rule checks
// ===========================================================================

#[test]
fn test_one_percent_rule_boundary() {
    let mut input = scenario();
    input.purchase_price = dec!(200000);
    input.monthly_rent = dec!(2000);
    let out = rental::analyze_rental(&input).unwrap();
    assert!(out.result.rules.one_percent.passes);

    input.monthly_rent = dec!(1999.99);
    let out = rental::analyze_rental(&input).unwrap();
    assert!(!out.result.rules.one_percent.passes);
}

#[test]
fn test_fifty_percent_rule_ignores_debt_service() {
    let mut low = scenario();
    low.interest_rate = dec!(4);
    let mut high = scenario();
    high.interest_rate = dec!(9);

    let low = rental::analyze_rental(&low).unwrap().result;
    let high = rental::analyze_rental(&high).unwrap().result;

    assert!(high.cash_flow.monthly_cash_flow < low.cash_flow.monthly_cash_flow);
    assert!(high.returns.debt_coverage_ratio < low.returns.debt_coverage_ratio);
    assert_eq!(low.rules.fifty_percent.passes, high.rules.fifty_percent.passes);
    assert_eq!(low.rules.fifty_percent.actual, high.rules.fifty_percent.actual);
}

// ===========================================================================
// Divide-by-zero guards
// ===========================================================================

#[test]
fn test_nothing_invested_cash_on_cash_is_zero() {
    let mut input = scenario();
    input.purchase_price = dec!(100000);
    input.down_payment_percent = Decimal::ZERO;
    input.closing_costs = Decimal::ZERO;
    input.rehab_costs = Decimal::ZERO;

    let out = rental::analyze_rental(&input).unwrap();
    assert_eq!(out.result.returns.total_cash_invested, Decimal::ZERO);
    assert_eq!(out.result.returns.cash_on_cash_return, Decimal::ZERO);
    assert_eq!(out.result.returns.total_roi, Decimal::ZERO);
}

#[test]
fn test_zero_rent_is_not_an_error() {
    let mut input = scenario();
    input.monthly_rent = Decimal::ZERO;
    let out = rental::analyze_rental(&input).unwrap();
    assert_eq!(out.result.returns.gross_rent_multiplier, Decimal::ZERO);
    assert!(!out.result.rules.one_percent.passes);
}

#[test]
fn test_non_positive_price_is_rejected() {
    let mut input = scenario();
    input.purchase_price = dec!(-100);
    match rental::analyze_rental(&input) {
        Err(RentalInvestError::InvalidInput { field, .. }) => assert_eq!(field, "purchase_price"),
        other => panic!("expected invalid purchase_price, got {other:?}"),
    }
}

#[test]
fn test_extreme_interest_rate_returns_error() {
    let user = UserInputs {
        purchase_price: dec!(300000),
        monthly_rent: Some(dec!(2500)),
        interest_rate: Some(dec!(300)),
        ..Default::default()
    };
    match rental::analyze_with_defaults(&user, &MarketData::default(), &Assumptions::default()) {
        Err(RentalInvestError::InvalidInput { field, .. }) => assert_eq!(field, "interest_rate"),
        other => panic!("expected invalid interest_rate, got {other:?}"),
    }

    let mut input = scenario();
    input.interest_rate = dec!(300);
    assert!(rental::analyze_rental(&input).is_err());
}

#[test]
fn test_huge_loan_term_returns_error() {
    let mut input = scenario();
    input.loan_term_years = u32::MAX;
    match rental::analyze_rental(&input) {
        Err(RentalInvestError::InvalidInput { field, .. }) => assert_eq!(field, "loan_term_years"),
        other => panic!("expected invalid loan_term_years, got {other:?}"),
    }
}

// ===========================================================================
// Cap rate independence
// ===========================================================================

#[test]
fn test_cap_rate_independent_of_financing() {
    let base = rental::analyze_rental(&scenario()).unwrap().result.returns.cap_rate;

    for (down, rate) in [(dec!(0), dec!(3)), (dec!(50), dec!(9.5)), (dec!(100), dec!(0))] {
        let mut input = scenario();
        input.down_payment_percent = down;
        input.interest_rate = rate;
        let cap = rental::analyze_rental(&input).unwrap().result.returns.cap_rate;
        assert_eq!(cap, base, "cap rate moved with down={down} rate={rate}");
    }
}

// ===========================================================================
// End-to-end regression
// ===========================================================================

#[test]
fn test_end_to_end_300k_scenario() {
    let out = rental::analyze_rental(&scenario()).unwrap();
    let r = &out.result;

    assert!(
        (r.mortgage.monthly_payment - dec!(1597.33)).abs() < dec!(1),
        "Expected ~$1,597, got {}",
        r.mortgage.monthly_payment
    );
    assert_eq!(
        r.returns.total_cash_invested,
        dec!(60000) + dec!(9000) + Decimal::ZERO
    );

    // Income 2500, vacancy 125, expenses 275 + 187.5 + 250 + 125 + 125
    assert_eq!(r.income.vacancy_loss, dec!(125));
    assert_eq!(r.expenses.total_monthly_expenses, dec!(962.5));
    assert_eq!(r.cash_flow.monthly_noi, dec!(1412.5));
    assert_eq!(r.returns.cap_rate, dec!(5.65));
    assert_eq!(r.returns.gross_rent_multiplier, dec!(10));

    let expected_cf = dec!(1412.5) - r.mortgage.monthly_payment;
    assert_eq!(r.cash_flow.monthly_cash_flow, expected_cf);
    assert_eq!(
        r.returns.cash_on_cash_return,
        expected_cf * dec!(12) / dec!(69000) * dec!(100)
    );
    assert!((r.returns.cash_on_cash_return - dec!(-3.20)).abs() < dec!(0.01));

    assert!(!r.rules.one_percent.passes);
    assert!(!r.rules.two_percent.passes);
    assert!(r.rules.fifty_percent.passes);
    assert!(!r.rules.debt_coverage.passes);

    assert_eq!(r.summary.score, 0);
    assert_eq!(r.summary.rating, Rating::Poor);
}

#[test]
fn test_strong_deal_scores_excellent() {
    let mut input = scenario();
    input.purchase_price = dec!(150000);
    input.closing_costs = dec!(4500);
    input.property_tax_annual = dec!(1650);
    input.insurance_annual = dec!(1725);
    input.monthly_rent = dec!(2500);

    let r = rental::analyze_rental(&input).unwrap().result;
    assert!(r.rules.one_percent.passes);
    assert!(r.rules.debt_coverage.passes);
    assert!(r.returns.cap_rate >= dec!(10));
    assert!(r.returns.cash_on_cash_return >= dec!(12));
    assert_eq!(r.summary.score, 10);
    assert_eq!(r.summary.rating, Rating::Excellent);
}

// ===========================================================================
// Default resolution
// ===========================================================================

#[test]
fn test_defaults_reproduce_scenario() {
    let user = UserInputs {
        purchase_price: dec!(300000),
        monthly_rent: Some(dec!(2500)),
        ..Default::default()
    };
    let resolved =
        rental::analyze_with_defaults(&user, &MarketData::default(), &Assumptions::default())
            .unwrap();
    let direct = rental::analyze_rental(&scenario()).unwrap();
    assert_eq!(resolved.result, direct.result);
}

#[test]
fn test_market_rate_feeds_mortgage() {
    let user = UserInputs {
        purchase_price: dec!(300000),
        monthly_rent: Some(dec!(2500)),
        ..Default::default()
    };
    let market = MarketData {
        interest_rate: Some(dec!(6)),
        ..Default::default()
    };
    let out = rental::analyze_with_defaults(&user, &market, &Assumptions::default()).unwrap();
    let expected = mortgage_payment(&LoanTerms {
        principal: dec!(240000),
        annual_rate_percent: dec!(6),
        term_years: 30,
    })
    .unwrap();
    assert_eq!(out.result.mortgage.monthly_payment, expected.monthly_payment);
}
