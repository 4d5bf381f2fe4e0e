use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::Percent;
use crate::LoanResult;

/// A home loan lender and the terms it advertises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lender {
    pub name: String,
    /// Advertised annual rate (e.g., 8.5 = 8.5% p.a.).
    pub annual_rate_percent: Percent,
    /// Fee on the principal at disbursal (e.g., 0.5 = 0.5%).
    pub processing_fee_percent: Percent,
}

impl Lender {
    pub fn new(name: impl Into<String>, annual_rate_percent: Percent, processing_fee_percent: Percent) -> Self {
        Lender {
            name: name.into(),
            annual_rate_percent,
            processing_fee_percent,
        }
    }

    /// Check the lender's own fields. Loan-level validation happens when quoting.
    pub fn validate(&self) -> LoanResult<()> {
        if self.name.trim().is_empty() {
            return Err(LoanError::invalid("name", "Lender name must not be empty"));
        }
        if self.annual_rate_percent <= Decimal::ZERO {
            return Err(LoanError::invalid(
                "annual_rate_percent",
                "Lender rate must be greater than zero",
            ));
        }
        if self.processing_fee_percent < Decimal::ZERO || self.processing_fee_percent > dec!(100) {
            return Err(LoanError::invalid(
                "processing_fee_percent",
                "Processing fee must be between 0% and 100%",
            ));
        }
        Ok(())
    }

    /// Name used to match lenders: trimmed, ASCII case folded.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// The six lenders offered by default, in display order.
pub fn default_catalog() -> Vec<Lender> {
    vec![
        Lender::new("SBI", dec!(8.50), dec!(0.50)),
        Lender::new("HDFC", dec!(8.75), dec!(0.50)),
        Lender::new("ICICI", dec!(8.65), dec!(0.75)),
        Lender::new("Axis Bank", dec!(8.90), dec!(1.00)),
        Lender::new("Kotak Mahindra", dec!(8.70), dec!(0.50)),
        Lender::new("Punjab National Bank", dec!(8.55), dec!(0.35)),
    ]
}

/// Look up a lender by name, ignoring ASCII case.
pub fn find_lender<'a>(lenders: &'a [Lender], name: &str) -> Option<&'a Lender> {
    let key = name_key(name);
    lenders.iter().find(|l| l.name_key() == key)
}
