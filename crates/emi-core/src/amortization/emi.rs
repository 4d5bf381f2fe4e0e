//! Equated monthly installment (EMI) for fixed-rate, fully amortising loans.
//!
//! EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), where r is the monthly rate
//! (annual percent / 12 / 100) and n the number of months. Every figure is
//! returned unrounded; rounding belongs to the display layer. All math in
//! `rust_decimal::Decimal`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, Money, Months, Percent, Rate, Years};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Lower bound of the principal range offered to borrowers (1 lakh).
pub const MIN_RECOMMENDED_PRINCIPAL: Money = dec!(100_000);
/// Upper bound of the principal range offered to borrowers (5 crore).
pub const MAX_RECOMMENDED_PRINCIPAL: Money = dec!(50_000_000);
pub const MIN_RECOMMENDED_TENURE: Years = dec!(1);
pub const MAX_RECOMMENDED_TENURE: Years = dec!(30);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms of a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed, in currency units.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 8.5 = 8.5% p.a.).
    pub annual_rate_percent: Percent,
    /// Repayment period in years; may be fractional.
    pub tenure_years: Years,
    /// One-off fee charged on the principal at disbursal, as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_fee_percent: Option<Percent>,
}

impl LoanTerms {
    /// Validated terms without a processing fee.
    pub fn new(principal: Money, annual_rate_percent: Percent, tenure_years: Years) -> LoanResult<Self> {
        let terms = LoanTerms {
            principal,
            annual_rate_percent,
            tenure_years,
            processing_fee_percent: None,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Build terms from binary floats, rejecting NaN and infinities.
    pub fn from_f64(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> LoanResult<Self> {
        Self::new(
            finite_decimal("principal", principal)?,
            finite_decimal("annual_rate_percent", annual_rate_percent)?,
            finite_decimal("tenure_years", tenure_years)?,
        )
    }

    pub fn with_processing_fee(mut self, fee_percent: Percent) -> LoanResult<Self> {
        validate_fee_percent(fee_percent)?;
        self.processing_fee_percent = Some(fee_percent);
        Ok(self)
    }

    pub fn validate(&self) -> LoanResult<()> {
        validate_positive("principal", self.principal)?;
        validate_positive("annual_rate_percent", self.annual_rate_percent)?;
        validate_positive("tenure_years", self.tenure_years)?;
        if let Some(fee) = self.processing_fee_percent {
            validate_fee_percent(fee)?;
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }

    /// Tenure in months; fails when the tenure is too large to scale.
    pub fn months(&self) -> LoanResult<Months> {
        months_for(self.tenure_years)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Everything the calculator shows for one set of terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub number_of_months: Months,
    pub monthly_installment: Money,
    /// `monthly_installment * number_of_months`.
    pub total_payment: Money,
    /// `total_payment - principal`.
    pub total_interest: Money,
    pub processing_fee: Money,
    /// Interest plus processing fee.
    pub total_cost_of_borrowing: Money,
}

impl AmortizationResult {
    /// Principal/interest split of this result.
    pub fn breakdown(&self) -> LoanResult<LoanBreakdown> {
        breakdown(self.principal, self.total_interest)
    }
}

/// Principal versus interest proportions, for pie-chart style display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanBreakdown {
    pub principal_share: Money,
    pub interest_share: Money,
    pub principal_share_percent: Percent,
    pub interest_share_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly installment for the given principal, annual rate and tenure.
///
/// Fails with `InvalidInput` when any argument is not strictly positive.
pub fn compute_monthly_installment(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: Years,
) -> LoanResult<Money> {
    validate_positive("principal", principal)?;
    validate_positive("annual_rate_percent", annual_rate_percent)?;
    validate_positive("tenure_years", tenure_years)?;

    let rate = monthly_rate(annual_rate_percent);
    let months = months_for(tenure_years)?;
    installment(principal, rate, months)
}

/// Full amortization figures for one set of terms, without the envelope.
pub fn compute_amortization(terms: &LoanTerms) -> LoanResult<AmortizationResult> {
    terms.validate()?;

    let monthly_rate = terms.monthly_rate();
    let number_of_months = terms.months()?;
    let monthly_installment = installment(terms.principal, monthly_rate, number_of_months)?;

    let total_payment = monthly_installment
        .checked_mul(number_of_months)
        .ok_or_else(|| LoanError::invalid("principal", "Total payment exceeds decimal range"))?;
    let total_interest = total_payment
        .checked_sub(terms.principal)
        .ok_or_else(|| LoanError::invalid("principal", "Total interest exceeds decimal range"))?;
    let processing_fee = match terms.processing_fee_percent {
        Some(fee) => terms
            .principal
            .checked_mul(fee)
            .and_then(|v| v.checked_div(PERCENT))
            .ok_or_else(|| LoanError::invalid("processing_fee_percent", "Processing fee exceeds decimal range"))?,
        None => Decimal::ZERO,
    };
    let total_cost_of_borrowing = total_interest
        .checked_add(processing_fee)
        .ok_or_else(|| LoanError::invalid("processing_fee_percent", "Cost of borrowing exceeds decimal range"))?;

    Ok(AmortizationResult {
        principal: terms.principal,
        monthly_rate,
        number_of_months,
        monthly_installment,
        total_payment,
        total_interest,
        processing_fee,
        total_cost_of_borrowing,
    })
}

/// Amortize a loan and wrap the result with methodology and range warnings.
pub fn amortize(terms: &LoanTerms) -> LoanResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let result = compute_amortization(terms)?;
    let warnings = recommended_range_warnings(terms.principal, terms.tenure_years);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate EMI amortization (monthly compounding)",
        terms,
        warnings,
        elapsed,
        result,
    ))
}

/// Split a loan into its principal and interest parts.
///
/// `total_interest` should come from an `AmortizationResult`; see
/// [`AmortizationResult::breakdown`].
pub fn breakdown(principal: Money, total_interest: Money) -> LoanResult<LoanBreakdown> {
    let total = principal
        .checked_add(total_interest)
        .ok_or_else(|| LoanError::invalid("principal", "Total repayment exceeds decimal range"))?;
    let (principal_share_percent, interest_share_percent) = if total > Decimal::ZERO {
        let p = principal
            .checked_div(total)
            .and_then(|v| v.checked_mul(PERCENT))
            .ok_or_else(|| LoanError::invalid("principal", "Principal share exceeds decimal range"))?;
        let i = PERCENT
            .checked_sub(p)
            .ok_or_else(|| LoanError::invalid("principal", "Interest share exceeds decimal range"))?;
        (p, i)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    Ok(LoanBreakdown {
        principal_share: principal,
        interest_share: total_interest,
        principal_share_percent,
        interest_share_percent,
    })
}

/// Advisories for inputs outside the range a borrower-facing form offers.
pub fn recommended_range_warnings(principal: Money, tenure_years: Years) -> Vec<String> {
    let mut warnings = Vec::new();
    if principal < MIN_RECOMMENDED_PRINCIPAL || principal > MAX_RECOMMENDED_PRINCIPAL {
        warnings.push(format!(
            "Principal {} is outside the recommended range [{}, {}]",
            principal, MIN_RECOMMENDED_PRINCIPAL, MAX_RECOMMENDED_PRINCIPAL
        ));
    }
    if tenure_years < MIN_RECOMMENDED_TENURE || tenure_years > MAX_RECOMMENDED_TENURE {
        warnings.push(format!(
            "Tenure of {} years is outside the recommended range [{}, {}]",
            tenure_years, MIN_RECOMMENDED_TENURE, MAX_RECOMMENDED_TENURE
        ));
    }
    warnings
}

/// Convert an annual percentage to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn months_for(tenure_years: Years) -> LoanResult<Months> {
    tenure_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| LoanError::invalid("tenure_years", "Tenure in months exceeds decimal range"))
}

fn installment(principal: Money, rate: Rate, months: Months) -> LoanResult<Money> {
    // An annual rate below the decimal resolution collapses to zero per month.
    if rate <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            "Rate is too small to amortize at decimal precision",
        ));
    }

    let growth = compound_factor(rate, months)?;
    let denominator = growth - Decimal::ONE;
    if denominator <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            "Rate is too small to amortize at decimal precision",
        ));
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanError::invalid("principal", "Installment exceeds decimal range"))
}

/// (1 + rate)^months, exact repeated squaring for whole months.
fn compound_factor(rate: Rate, months: Months) -> LoanResult<Decimal> {
    let base = Decimal::ONE + rate;
    let factor = if months.fract().is_zero() {
        months.to_i64().and_then(|n| base.checked_powi(n))
    } else {
        base.checked_powd(months)
    };
    factor.ok_or_else(|| LoanError::invalid("tenure_years", "Compounding exceeds decimal range"))
}

pub(crate) fn validate_positive(field: &str, value: Decimal) -> LoanResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanError::invalid(field, "Must be greater than zero"));
    }
    Ok(())
}

fn validate_fee_percent(fee: Percent) -> LoanResult<()> {
    if fee < Decimal::ZERO || fee > PERCENT {
        return Err(LoanError::invalid(
            "processing_fee_percent",
            "Processing fee must be between 0% and 100%",
        ));
    }
    Ok(())
}

fn finite_decimal(field: &str, value: f64) -> LoanResult<Decimal> {
    if !value.is_finite() {
        return Err(LoanError::invalid(field, "Must be a finite number"));
    }
    Decimal::from_f64(value).ok_or_else(|| LoanError::invalid(field, "Not representable as a decimal"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
