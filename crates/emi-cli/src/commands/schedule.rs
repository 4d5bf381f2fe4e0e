use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::amortization::emi::LoanTerms;
use emi_core::amortization::schedule::{self, ScheduleInput};

use crate::input;

/// Arguments for a repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years (must be a whole number of months)
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Due date of the first installment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Only print the per-year roll-up
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sched_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = args.tenure.ok_or("--tenure is required (or provide --input)")?;

        ScheduleInput {
            terms: LoanTerms::new(principal, rate, tenure)?,
            start_date: args.start_date,
        }
    };

    let mut output = schedule::build_schedule(&sched_input)?;
    if args.yearly {
        output.result.rows.clear();
    }
    Ok(serde_json::to_value(output)?)
}
