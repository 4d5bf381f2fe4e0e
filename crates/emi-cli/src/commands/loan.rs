use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::amortization::emi::{self, LoanTerms};

use crate::input;

/// Arguments for a single-loan EMI calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Processing fee in percent of principal (e.g. 0.5)
    #[arg(long)]
    pub processing_fee: Option<Decimal>,

    /// Include the principal/interest breakdown
    #[arg(long)]
    pub breakdown: bool,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = args.tenure.ok_or("--tenure is required (or provide --input)")?;

        let terms = LoanTerms::new(principal, rate, tenure)?;
        match args.processing_fee {
            Some(fee) => terms.with_processing_fee(fee)?,
            None => terms,
        }
    };

    let output = emi::amortize(&terms)?;
    let mut value = serde_json::to_value(&output)?;
    if args.breakdown {
        value["breakdown"] = serde_json::to_value(output.result.breakdown()?)?;
    }
    Ok(value)
}
