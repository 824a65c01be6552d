use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RentalInvestError;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple};
use crate::RentalInvestResult;

/// Minimum debt coverage ratio lenders typically require.
pub const MIN_DEBT_COVERAGE: Multiple = dec!(1.25);

/// Outcome of a single rule-of-thumb screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub name: String,
    pub passes: bool,
    /// Observed value being tested
    pub actual: Decimal,
    /// Threshold the observed value is compared against
    pub target: Decimal,
    pub message: String,
}

/// All screens applied to a rental analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleChecks {
    pub one_percent: RuleCheck,
    pub two_percent: RuleCheck,
    pub fifty_percent: RuleCheck,
    pub debt_coverage: RuleCheck,
    /// Present only when an after-repair value is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seventy_percent: Option<RuleCheck>,
}

/// Inputs for the 70% rule on a fix-and-flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipInput {
    pub purchase_price: Money,
    /// Expected value after renovation
    pub after_repair_value: Money,
    pub repair_costs: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipOutput {
    /// ARV * 70% - repairs
    pub max_offer_price: Money,
    /// max_offer_price - purchase_price (negative when overpaying)
    pub margin: Money,
    pub rule: RuleCheck,
}

// ---------------------------------------------------------------------------
// Rule predicates
// ---------------------------------------------------------------------------

/// Monthly rent must be at least 1% of the purchase price.
pub fn one_percent_rule(monthly_rent: Money, purchase_price: Money) -> RuleCheck {
    rent_to_price_rule("1% Rule", dec!(0.01), monthly_rent, purchase_price)
}

/// Monthly rent must be at least 2% of the purchase price.
pub fn two_percent_rule(monthly_rent: Money, purchase_price: Money) -> RuleCheck {
    rent_to_price_rule("2% Rule", dec!(0.02), monthly_rent, purchase_price)
}

fn rent_to_price_rule(
    name: &str,
    share: Decimal,
    monthly_rent: Money,
    purchase_price: Money,
) -> RuleCheck {
    let target = purchase_price * share;
    let passes = monthly_rent >= target;
    let message = if passes {
        format!("Rent of ${monthly_rent:.2} meets the ${target:.2} minimum")
    } else {
        format!(
            "Rent of ${monthly_rent:.2} is ${:.2} short of the ${target:.2} minimum",
            target - monthly_rent
        )
    };

    RuleCheck {
        name: name.to_string(),
        passes,
        actual: monthly_rent,
        target,
        message,
    }
}

/// Operating expenses (debt service excluded) must not exceed half of gross
/// income.
pub fn fifty_percent_rule(
    total_monthly_expenses: Money,
    gross_monthly_income: Money,
) -> RuleCheck {
    let target = gross_monthly_income * dec!(0.50);
    let passes = total_monthly_expenses <= target;
    let message = if passes {
        format!(
            "Operating expenses of ${total_monthly_expenses:.2} are within half of gross income (${target:.2})"
        )
    } else {
        format!(
            "Operating expenses of ${total_monthly_expenses:.2} exceed half of gross income (${target:.2})"
        )
    };

    RuleCheck {
        name: "50% Rule".into(),
        passes,
        actual: total_monthly_expenses,
        target,
        message,
    }
}

pub fn debt_coverage_rule(debt_coverage_ratio: Multiple) -> RuleCheck {
    let passes = debt_coverage_ratio >= MIN_DEBT_COVERAGE;
    let message = if debt_coverage_ratio.is_zero() {
        "No debt coverage: NOI is non-positive or there is no debt service".to_string()
    } else if passes {
        format!("DCR of {debt_coverage_ratio:.2}x meets the {MIN_DEBT_COVERAGE}x lender minimum")
    } else {
        format!("DCR of {debt_coverage_ratio:.2}x is below the {MIN_DEBT_COVERAGE}x lender minimum")
    };

    RuleCheck {
        name: "Debt Coverage".into(),
        passes,
        actual: debt_coverage_ratio,
        target: MIN_DEBT_COVERAGE,
        message,
    }
}

/// Purchase price must not exceed 70% of ARV less repair costs.
pub fn seventy_percent_check(
    purchase_price: Money,
    after_repair_value: Money,
    repair_costs: Money,
) -> RuleCheck {
    let max_offer = max_offer_price(after_repair_value, repair_costs);
    let passes = purchase_price <= max_offer;
    let message = if passes {
        format!("Price of ${purchase_price:.2} is at or under the ${max_offer:.2} maximum offer")
    } else {
        format!(
            "Price of ${purchase_price:.2} is ${:.2} over the ${max_offer:.2} maximum offer",
            purchase_price - max_offer
        )
    };

    RuleCheck {
        name: "70% Rule".into(),
        passes,
        actual: purchase_price,
        target: max_offer,
        message,
    }
}

fn max_offer_price(after_repair_value: Money, repair_costs: Money) -> Money {
    after_repair_value * dec!(0.70) - repair_costs
}

// ---------------------------------------------------------------------------
// Standalone flip analysis
// ---------------------------------------------------------------------------

/// Evaluate a fix-and-flip purchase against the 70% rule.
pub fn seventy_percent_rule(
    input: &FlipInput,
) -> RentalInvestResult<ComputationOutput<FlipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.purchase_price <= Decimal::ZERO {
        return Err(RentalInvestError::invalid(
            "purchase_price",
            "Purchase price must be positive",
        ));
    }
    if input.after_repair_value < Decimal::ZERO {
        return Err(RentalInvestError::invalid(
            "after_repair_value",
            "After-repair value cannot be negative",
        ));
    }
    if input.repair_costs < Decimal::ZERO {
        return Err(RentalInvestError::invalid(
            "repair_costs",
            "Repair costs cannot be negative",
        ));
    }

    if input.after_repair_value < input.purchase_price {
        warnings.push("After-repair value is below the purchase price".into());
    }

    let rule = seventy_percent_check(
        input.purchase_price,
        input.after_repair_value,
        input.repair_costs,
    );
    let max_offer_price = rule.target;
    let output = FlipOutput {
        max_offer_price,
        margin: max_offer_price - input.purchase_price,
        rule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "70% Rule (ARV x 70% - repairs)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
