//! Side-by-side EMI quotes across a list of lenders.
//!
//! Quotes come back in the order the lenders were given. A lender whose
//! terms cannot be quoted is reported in `failures` without hiding the
//! quotes that did succeed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::amortization::emi::{
    compute_amortization, recommended_range_warnings, validate_positive, AmortizationResult,
    LoanTerms,
};
use crate::error::{LenderFailure, LoanError};
use crate::lenders::catalog::{default_catalog, Lender};
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub principal: Money,
    pub tenure_years: Years,
    /// Lenders to compare. Defaults to the built-in catalog.
    #[serde(default = "default_catalog")]
    pub lenders: Vec<Lender>,
}

/// One lender's figures for the requested principal and tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderQuote {
    pub lender: Lender,
    pub monthly_installment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub processing_fee: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderComparison {
    pub quotes: Vec<LenderQuote>,
    pub failures: Vec<LenderFailure>,
}

impl LenderComparison {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All quotes, or `PartialComparisonFailure` if any lender failed.
    pub fn require_complete(self) -> LoanResult<Vec<LenderQuote>> {
        if self.failures.is_empty() {
            Ok(self.quotes)
        } else {
            Err(LoanError::PartialComparisonFailure {
                failed: self.failures,
            })
        }
    }

    /// The quote with the smallest EMI; first in list order on ties.
    pub fn lowest_installment(&self) -> Option<&LenderQuote> {
        self.quotes.iter().reduce(|best, q| {
            if q.monthly_installment < best.monthly_installment {
                q
            } else {
                best
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortization at one lender's rate, including its processing fee.
pub fn quote_lender(principal: Money, tenure_years: Years, lender: &Lender) -> LoanResult<AmortizationResult> {
    lender.validate()?;
    let terms = LoanTerms {
        principal,
        annual_rate_percent: lender.annual_rate_percent,
        tenure_years,
        processing_fee_percent: Some(lender.processing_fee_percent),
    };
    compute_amortization(&terms)
}

/// Quote every lender for the same principal and tenure.
///
/// Invalid principal or tenure fails the whole call; an invalid lender only
/// fails its own entry.
pub fn compare_lenders(principal: Money, tenure_years: Years, lenders: &[Lender]) -> LoanResult<LenderComparison> {
    validate_positive("principal", principal)?;
    validate_positive("tenure_years", tenure_years)?;
    if lenders.is_empty() {
        return Err(LoanError::InsufficientData(
            "Comparison requires at least one lender".into(),
        ));
    }

    let mut quotes = Vec::with_capacity(lenders.len());
    let mut failures = Vec::new();

    for lender in lenders {
        match quote_lender(principal, tenure_years, lender) {
            Ok(r) => quotes.push(LenderQuote {
                lender: lender.clone(),
                monthly_installment: r.monthly_installment,
                total_payment: r.total_payment,
                total_interest: r.total_interest,
                processing_fee: r.processing_fee,
            }),
            Err(e) => failures.push(LenderFailure {
                lender: lender.name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(LenderComparison { quotes, failures })
}

/// Compare lenders and wrap the result with methodology and warnings.
pub fn compare_across_lenders(
    input: &ComparisonInput,
) -> LoanResult<ComputationOutput<LenderComparison>> {
    let start = Instant::now();
    let comparison = compare_lenders(input.principal, input.tenure_years, &input.lenders)?;

    let mut warnings = recommended_range_warnings(input.principal, input.tenure_years);

    let mut seen = HashSet::new();
    for lender in &input.lenders {
        if !seen.insert(lender.name_key()) {
            warnings.push(format!("Lender '{}' appears more than once", lender.name));
        }
    }

    if !comparison.is_complete() {
        warnings.push(format!(
            "{} of {} lenders could not be quoted",
            comparison.failures.len(),
            input.lenders.len()
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate EMI comparison across lenders (catalog order)",
        input,
        warnings,
        elapsed,
        comparison,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn catalog_input() -> ComparisonInput {
        ComparisonInput {
            principal: dec!(5_000_000),
            tenure_years: dec!(20),
            lenders: default_catalog(),
        }
    }

    #[test]
    fn test_quote_lender_includes_fee() {
        let axis = Lender::new("Axis Bank", dec!(8.9), dec!(1.0));
        let r = quote_lender(dec!(5_000_000), dec!(20), &axis).unwrap();
        assert_eq!(r.processing_fee, dec!(50_000));
        assert!((r.monthly_installment - dec!(44665.233)).abs() < dec!(0.001));
    }

    #[test]
    fn test_complete_catalog_comparison() {
        let out = compare_across_lenders(&catalog_input()).unwrap();
        assert!(out.result.is_complete());
        assert_eq!(out.result.quotes.len(), 6);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_bad_lender_fails_alone() {
        let mut input = catalog_input();
        input.lenders.insert(2, Lender::new("Broken", Decimal::ZERO, dec!(0.5)));
        let out = compare_across_lenders(&input).unwrap();

        assert_eq!(out.result.quotes.len(), 6);
        assert_eq!(out.result.failures.len(), 1);
        assert_eq!(out.result.failures[0].lender, "Broken");
        assert!(out.result.failures[0].reason.contains("annual_rate_percent"));
        assert!(out.warnings.iter().any(|w| w.contains("1 of 7")));
    }

    #[test]
    fn test_require_complete_surfaces_partial_failure() {
        let lenders = vec![
            Lender::new("Good", dec!(9), dec!(0.5)),
            Lender::new("Negative Fee", dec!(9), dec!(-1)),
        ];
        let comparison = compare_lenders(dec!(1_000_000), dec!(10), &lenders).unwrap();
        match comparison.require_complete() {
            Err(LoanError::PartialComparisonFailure { failed }) => {
                assert_eq!(failed.len(), 1);
                assert_eq!(failed[0].lender, "Negative Fee");
            }
            other => panic!("expected PartialComparisonFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_principal_aborts_comparison() {
        let err = compare_lenders(Decimal::ZERO, dec!(20), &default_catalog()).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));
    }

    #[test]
    fn test_empty_lender_list() {
        let err = compare_lenders(dec!(1_000_000), dec!(20), &[]).unwrap_err();
        assert!(matches!(err, LoanError::InsufficientData(_)));
    }

    #[test]
    fn test_duplicate_names_warned() {
        let mut input = catalog_input();
        input.lenders.push(Lender::new("SBI", dec!(8.4), dec!(0.5)));
        let out = compare_across_lenders(&input).unwrap();
        assert_eq!(out.result.quotes.len(), 7);
        assert!(out.warnings.iter().any(|w| w.contains("'SBI'")));
    }

    #[test]
    fn test_duplicate_names_differing_in_case_warned() {
        let mut input = catalog_input();
        input.lenders.push(Lender::new("sbi ", dec!(8.4), dec!(0.5)));
        let out = compare_across_lenders(&input).unwrap();
        assert_eq!(out.result.quotes.len(), 7);
        assert!(out.warnings.iter().any(|w| w.contains("'sbi '") && w.contains("more than once")));
    }

    #[test]
    fn test_fee_beyond_decimal_range_fails_that_lender() {
        let lenders = vec![
            Lender::new("Big Fee", dec!(8.5), dec!(2)),
            Lender::new("Small Fee", dec!(8.5), dec!(0.5)),
        ];
        let comparison =
            compare_lenders(dec!(50_000_000_000_000_000_000_000_000_000), dec!(1), &lenders).unwrap();
        assert_eq!(comparison.quotes.len(), 1);
        assert_eq!(comparison.quotes[0].lender.name, "Small Fee");
        assert_eq!(comparison.failures.len(), 1);
        assert_eq!(comparison.failures[0].lender, "Big Fee");
        assert!(comparison.failures[0].reason.contains("processing_fee_percent"));
    }

    #[test]
    fn test_tenure_beyond_decimal_range_fails_each_lender() {
        let comparison = compare_lenders(dec!(1_000_000), Decimal::MAX, &default_catalog()).unwrap();
        assert!(comparison.quotes.is_empty());
        assert_eq!(comparison.failures.len(), 6);
    }

    #[test]
    fn test_lowest_installment_is_lowest_rate() {
        let comparison = compare_lenders(dec!(5_000_000), dec!(20), &default_catalog()).unwrap();
        assert_eq!(comparison.lowest_installment().unwrap().lender.name, "SBI");
    }

    #[test]
    fn test_input_defaults_to_catalog() {
        let input: ComparisonInput =
            serde_json::from_str(r#"{"principal": 5000000, "tenure_years": 20}"#).unwrap();
        assert_eq!(input.lenders, default_catalog());
    }
}
