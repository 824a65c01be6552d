//! Default-assumption table and input resolution.
//!
//! A field left blank by the caller is filled from, in order: external
//! market data, a formula estimate based on price, then a fixed
//! industry-standard constant from [`Assumptions`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::rental::inputs::PropertyFinancialInputs;
use crate::rental::score::ScoreBands;
use crate::types::{fraction, Money, Percent};
use crate::RentalInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The single table of fallback assumptions. Every field has a default, so a
/// partial JSON or YAML document overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub down_payment_percent: Percent,
    pub interest_rate: Percent,
    pub loan_term_years: u32,
    /// Closing costs as a share of price when no amount is given
    pub closing_costs_rate: Percent,
    pub vacancy_rate_percent: Percent,
    pub management_rate_percent: Percent,
    pub repairs_rate_percent: Percent,
    pub capex_rate_percent: Percent,
    /// Annual property tax estimate as a share of price
    pub property_tax_rate: Percent,
    /// Flat component of the annual insurance estimate
    pub insurance_base: Money,
    /// Annual insurance per $1,000 of price
    pub insurance_per_thousand: Money,
    pub appreciation_rate_percent: Percent,
    pub rent_growth_rate_percent: Percent,
    pub expense_growth_rate_percent: Percent,
    pub holding_period_years: u32,
    pub score_bands: ScoreBands,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            down_payment_percent: dec!(20),
            interest_rate: dec!(7),
            loan_term_years: 30,
            closing_costs_rate: dec!(3),
            vacancy_rate_percent: dec!(5),
            management_rate_percent: dec!(10),
            repairs_rate_percent: dec!(5),
            capex_rate_percent: dec!(5),
            property_tax_rate: dec!(1.1),
            insurance_base: dec!(1200),
            insurance_per_thousand: dec!(3.50),
            appreciation_rate_percent: dec!(3),
            rent_growth_rate_percent: dec!(3),
            expense_growth_rate_percent: dec!(2),
            holding_period_years: 5,
            score_bands: ScoreBands::default(),
        }
    }
}

impl Assumptions {
    /// Annual property tax estimate: 1.1% of price by default.
    pub fn estimate_property_tax(&self, purchase_price: Money) -> Money {
        purchase_price * fraction(self.property_tax_rate)
    }

    /// Annual insurance estimate: $1,200 + $3.50 per $1,000 of price by default.
    pub fn estimate_insurance(&self, purchase_price: Money) -> Money {
        self.insurance_base + purchase_price / dec!(1000) * self.insurance_per_thousand
    }
}

/// Values the caller (or a user editing a form) has supplied. `None` means
/// "not provided".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInputs {
    pub purchase_price: Money,
    pub closing_costs: Option<Money>,
    pub closing_costs_rate: Option<Percent>,
    pub rehab_costs: Option<Money>,
    pub down_payment_percent: Option<Percent>,
    pub interest_rate: Option<Percent>,
    pub loan_term_years: Option<u32>,
    pub monthly_rent: Option<Money>,
    pub other_monthly_income: Option<Money>,
    pub property_tax_annual: Option<Money>,
    pub insurance_annual: Option<Money>,
    pub hoa_monthly: Option<Money>,
    pub utilities_monthly: Option<Money>,
    pub vacancy_rate_percent: Option<Percent>,
    pub management_rate_percent: Option<Percent>,
    pub repairs_rate_percent: Option<Percent>,
    pub capex_rate_percent: Option<Percent>,
    pub appreciation_rate_percent: Option<Percent>,
    pub rent_growth_rate_percent: Option<Percent>,
    pub expense_growth_rate_percent: Option<Percent>,
    pub after_repair_value: Option<Money>,
    pub holding_period_years: Option<u32>,
}

/// Figures obtained from listing and market-data services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketData {
    /// Most recent annual tax from the listing's tax history
    pub property_tax_annual: Option<Money>,
    /// Market rent estimate
    pub monthly_rent: Option<Money>,
    /// Annual insurance quote or estimate
    pub insurance_annual: Option<Money>,
    /// Current average mortgage rate
    pub interest_rate: Option<Percent>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    User,
    MarketData,
    Estimate,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedInputs {
    pub inputs: PropertyFinancialInputs,
    /// Provenance of each field that had a fallback
    pub sources: BTreeMap<String, InputSource>,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

struct Resolver {
    sources: BTreeMap<String, InputSource>,
}

impl Resolver {
    fn pick<T: Copy>(
        &mut self,
        field: &str,
        candidates: &[(Option<T>, InputSource)],
        fallback: T,
    ) -> T {
        for (value, source) in candidates {
            if let Some(v) = value {
                self.sources.insert(field.to_string(), *source);
                return *v;
            }
        }
        self.sources.insert(field.to_string(), InputSource::Default);
        fallback
    }
}

/// Fill every missing field and validate the result.
pub fn resolve_inputs(
    user: &UserInputs,
    market: &MarketData,
    assumptions: &Assumptions,
) -> RentalInvestResult<ResolvedInputs> {
    use InputSource::{Estimate, MarketData as Market, User};

    let mut r = Resolver {
        sources: BTreeMap::new(),
    };
    let mut warnings = Vec::new();
    let price = user.purchase_price;

    let closing_rate = user.closing_costs_rate.unwrap_or(assumptions.closing_costs_rate);
    let closing_costs = r.pick(
        "closing_costs",
        &[
            (user.closing_costs, User),
            (user.closing_costs_rate.map(|_| price * fraction(closing_rate)), User),
        ],
        price * fraction(closing_rate),
    );

    let monthly_rent = r.pick(
        "monthly_rent",
        &[(user.monthly_rent, User), (market.monthly_rent, Market)],
        Decimal::ZERO,
    );
    if user.monthly_rent.is_none() && market.monthly_rent.is_none() {
        warnings.push("No rent supplied or estimated — income assumed to be zero".into());
    }

    let property_tax_annual = r.pick(
        "property_tax_annual",
        &[
            (user.property_tax_annual, User),
            (market.property_tax_annual, Market),
            (Some(assumptions.estimate_property_tax(price)), Estimate),
        ],
        Decimal::ZERO,
    );
    let insurance_annual = r.pick(
        "insurance_annual",
        &[
            (user.insurance_annual, User),
            (market.insurance_annual, Market),
            (Some(assumptions.estimate_insurance(price)), Estimate),
        ],
        Decimal::ZERO,
    );
    let interest_rate = r.pick(
        "interest_rate",
        &[(user.interest_rate, User), (market.interest_rate, Market)],
        assumptions.interest_rate,
    );

    let inputs = PropertyFinancialInputs {
        purchase_price: price,
        closing_costs,
        rehab_costs: r.pick("rehab_costs", &[(user.rehab_costs, User)], Decimal::ZERO),
        down_payment_percent: r.pick(
            "down_payment_percent",
            &[(user.down_payment_percent, User)],
            assumptions.down_payment_percent,
        ),
        interest_rate,
        loan_term_years: r.pick(
            "loan_term_years",
            &[(user.loan_term_years, User)],
            assumptions.loan_term_years,
        ),
        monthly_rent,
        other_monthly_income: r.pick(
            "other_monthly_income",
            &[(user.other_monthly_income, User)],
            Decimal::ZERO,
        ),
        property_tax_annual,
        insurance_annual,
        hoa_monthly: r.pick("hoa_monthly", &[(user.hoa_monthly, User)], Decimal::ZERO),
        utilities_monthly: r.pick(
            "utilities_monthly",
            &[(user.utilities_monthly, User)],
            Decimal::ZERO,
        ),
        vacancy_rate_percent: r.pick(
            "vacancy_rate_percent",
            &[(user.vacancy_rate_percent, User)],
            assumptions.vacancy_rate_percent,
        ),
        management_rate_percent: r.pick(
            "management_rate_percent",
            &[(user.management_rate_percent, User)],
            assumptions.management_rate_percent,
        ),
        repairs_rate_percent: r.pick(
            "repairs_rate_percent",
            &[(user.repairs_rate_percent, User)],
            assumptions.repairs_rate_percent,
        ),
        capex_rate_percent: r.pick(
            "capex_rate_percent",
            &[(user.capex_rate_percent, User)],
            assumptions.capex_rate_percent,
        ),
        appreciation_rate_percent: r.pick(
            "appreciation_rate_percent",
            &[(user.appreciation_rate_percent, User)],
            assumptions.appreciation_rate_percent,
        ),
        rent_growth_rate_percent: r.pick(
            "rent_growth_rate_percent",
            &[(user.rent_growth_rate_percent, User)],
            assumptions.rent_growth_rate_percent,
        ),
        expense_growth_rate_percent: r.pick(
            "expense_growth_rate_percent",
            &[(user.expense_growth_rate_percent, User)],
            assumptions.expense_growth_rate_percent,
        ),
        after_repair_value: user.after_repair_value,
        holding_period_years: r.pick(
            "holding_period_years",
            &[(user.holding_period_years, User)],
            assumptions.holding_period_years,
        ),
    };

    inputs.validate()?;

    debug!(
        defaulted = r
            .sources
            .values()
            .filter(|s| **s != InputSource::User)
            .count(),
        "resolved calculator inputs"
    );

    Ok(ResolvedInputs {
        inputs,
        sources: r.sources,
        warnings,
    })
}
