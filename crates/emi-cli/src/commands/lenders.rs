use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use emi_core::lenders::catalog::{default_catalog, find_lender, Lender};
use emi_core::lenders::comparison::{self, ComparisonInput};

use crate::input;

fn load_lenders(path: Option<&str>) -> Result<Vec<Lender>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => input::file::read_input(p),
        None => Ok(default_catalog()),
    }
}

/// Arguments for a lender comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML comparison input (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// JSON/YAML file with a list of lenders (defaults to the built-in catalog)
    #[arg(long)]
    pub lenders: Option<String>,

    /// Exit with an error if any lender could not be quoted
    #[arg(long)]
    pub strict: bool,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: ComparisonInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let tenure = args.tenure.ok_or("--tenure is required (or provide --input)")?;

        ComparisonInput {
            principal,
            tenure_years: tenure,
            lenders: load_lenders(args.lenders.as_deref())?,
        }
    };

    let output = comparison::compare_across_lenders(&cmp_input)?;
    if args.strict {
        output.result.clone().require_complete()?;
    }
    Ok(serde_json::to_value(output)?)
}

/// Arguments for quoting a single lender
#[derive(Args)]
pub struct QuoteArgs {
    /// Lender name as listed by `emi lenders` (case-insensitive)
    #[arg(long)]
    pub lender: String,

    /// Loan amount
    #[arg(long)]
    pub principal: Decimal,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Decimal,

    /// JSON/YAML file with a list of lenders (defaults to the built-in catalog)
    #[arg(long)]
    pub lenders: Option<String>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lenders = load_lenders(args.lenders.as_deref())?;
    let lender = find_lender(&lenders, &args.lender)
        .ok_or_else(|| format!("Unknown lender '{}'", args.lender))?;

    let result = comparison::quote_lender(args.principal, args.tenure, lender)?;
    let breakdown = result.breakdown()?;
    Ok(json!({
        "lender": lender,
        "result": result,
        "breakdown": breakdown,
    }))
}

/// Arguments for listing lenders
#[derive(Args)]
pub struct LendersArgs {
    /// JSON/YAML file with a list of lenders (defaults to the built-in catalog)
    #[arg(long)]
    pub lenders: Option<String>,
}

pub fn run_lenders(args: LendersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lenders = load_lenders(args.lenders.as_deref())?;
    Ok(serde_json::to_value(lenders)?)
}
