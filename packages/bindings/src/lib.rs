use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use rental_invest_core::assumptions::{Assumptions, MarketData, UserInputs};
use rental_invest_core::rental;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Request body for `analyzeWithDefaults`.
#[derive(Deserialize)]
struct DefaultsRequest {
    user: UserInputs,
    #[serde(default)]
    market: MarketData,
    #[serde(default)]
    assumptions: Assumptions,
}

/// Request body for `quickScore`; the table is optional.
#[derive(Deserialize)]
struct QuickRequest {
    #[serde(flatten)]
    input: rental::QuickInput,
    #[serde(default)]
    assumptions: Assumptions,
}

// ---------------------------------------------------------------------------
// Rental analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_rental(input_json: String) -> NapiResult<String> {
    let input: rental::PropertyFinancialInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::analyze_rental(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_with_defaults(input_json: String) -> NapiResult<String> {
    let req: DefaultsRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::analyze_with_defaults(&req.user, &req.market, &req.assumptions)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quick_score(input_json: String) -> NapiResult<String> {
    let req: QuickRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::quick_score(&req.input, &req.assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn seventy_percent_rule(input_json: String) -> NapiResult<String> {
    let input: rental::FlipInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::seventy_percent_rule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn mortgage_payment(input_json: String) -> NapiResult<String> {
    let terms: rental::mortgage::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::mortgage::mortgage_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms: rental::mortgage::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::mortgage::amortization_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assumptions
// ---------------------------------------------------------------------------

#[napi]
pub fn default_assumptions() -> NapiResult<String> {
    serde_json::to_string(&Assumptions::default()).map_err(to_napi_error)
}
