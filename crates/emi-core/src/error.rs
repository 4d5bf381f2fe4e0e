use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lender that could not be quoted during a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenderFailure {
    pub lender: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Comparison incomplete: {} lender(s) could not be quoted ({})", .failed.len(), failed_names(.failed))]
    PartialComparisonFailure { failed: Vec<LenderFailure> },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn failed_names(failed: &[LenderFailure]) -> String {
    failed
        .iter()
        .map(|f| format!("{}: {}", f.lender, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
