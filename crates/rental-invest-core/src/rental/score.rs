use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{percent_of, Percent};

/// Highest attainable score: 3 (cap rate) + 3 (cash-on-cash) + 2 + 2.
pub const MAX_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Minimum score percentage for each rating above Poor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBands {
    pub excellent: Percent,
    pub good: Percent,
    pub fair: Percent,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            excellent: dec!(80),
            good: dec!(60),
            fair: dec!(40),
        }
    }
}

impl ScoreBands {
    pub fn rate(&self, percentage: Percent) -> Rating {
        if percentage >= self.excellent {
            Rating::Excellent
        } else if percentage >= self.good {
            Rating::Good
        } else if percentage >= self.fair {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub max_score: u32,
    pub percentage: Percent,
    pub rating: Rating,
}

/// The metrics the score is built from.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub cap_rate: Percent,
    pub cash_on_cash_return: Percent,
    pub passes_one_percent: bool,
    pub passes_debt_coverage: bool,
}

pub fn cap_rate_points(cap_rate: Percent) -> u32 {
    if cap_rate >= dec!(10) {
        3
    } else if cap_rate >= dec!(8) {
        2
    } else if cap_rate >= dec!(6) {
        1
    } else {
        0
    }
}

pub fn cash_on_cash_points(cash_on_cash: Percent) -> u32 {
    if cash_on_cash >= dec!(12) {
        3
    } else if cash_on_cash >= dec!(8) {
        2
    } else if cash_on_cash >= dec!(5) {
        1
    } else {
        0
    }
}

pub fn score_investment(inputs: &ScoreInputs, bands: &ScoreBands) -> ScoreSummary {
    let mut score =
        cap_rate_points(inputs.cap_rate) + cash_on_cash_points(inputs.cash_on_cash_return);
    if inputs.passes_one_percent {
        score += 2;
    }
    if inputs.passes_debt_coverage {
        score += 2;
    }

    let percentage = percent_of(Decimal::from(score), Decimal::from(MAX_SCORE));

    ScoreSummary {
        score,
        max_score: MAX_SCORE,
        percentage,
        rating: bands.rate(percentage),
    }
}
