pub mod amortization;
pub mod error;
pub mod lenders;
pub mod types;

#[cfg(feature = "display")]
pub mod display;

pub use error::{LenderFailure, LoanError};
pub use types::*;

/// Standard result type for all loan calculations
pub type LoanResult<T> = Result<T, LoanError>;
