use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::prelude::ToPrimitive;

use emi_core::amortization::{emi, schedule};
use emi_core::lenders::{catalog, comparison};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Single loan
// ---------------------------------------------------------------------------

/// EMI for plain JS numbers. NaN and infinities are rejected.
#[napi]
pub fn monthly_installment(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> NapiResult<f64> {
    let terms = emi::LoanTerms::from_f64(principal, annual_rate_percent, tenure_years)
        .map_err(to_napi_error)?;
    let installment = emi::compute_monthly_installment(
        terms.principal,
        terms.annual_rate_percent,
        terms.tenure_years,
    )
    .map_err(to_napi_error)?;
    installment
        .to_f64()
        .ok_or_else(|| to_napi_error("installment not representable as f64"))
}

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let input: emi::LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lenders
// ---------------------------------------------------------------------------

#[napi]
pub fn default_catalog() -> NapiResult<String> {
    serde_json::to_string(&catalog::default_catalog()).map_err(to_napi_error)
}

#[napi]
pub fn compare_lenders(input_json: String) -> NapiResult<String> {
    let input: comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::compare_across_lenders(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Input for a single-lender quote
#[derive(serde::Deserialize)]
struct QuoteInput {
    principal: rust_decimal::Decimal,
    tenure_years: rust_decimal::Decimal,
    lender: catalog::Lender,
}

#[napi]
pub fn quote_lender(input_json: String) -> NapiResult<String> {
    let input: QuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = comparison::quote_lender(input.principal, input.tenure_years, &input.lender)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
