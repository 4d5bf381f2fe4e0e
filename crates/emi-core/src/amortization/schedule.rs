//! Month-by-month repayment schedule for a fixed-rate loan.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::emi::{compute_amortization, recommended_range_warnings, LoanTerms};
use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanResult;

/// Longest schedule that will be expanded row by row (100 years).
const MAX_SCHEDULE_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    /// Due date of the first installment; later installments fall one
    /// calendar month apart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// A single month in the repayment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Twelve-month roll-up of the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub monthly_installment: Money,
    pub rows: Vec<ScheduleRow>,
    pub years: Vec<YearSummary>,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
}

/// Build the full repayment schedule.
///
/// The final installment repays whatever balance remains, so the loan
/// closes at exactly zero.
pub fn build_schedule(input: &ScheduleInput) -> LoanResult<ComputationOutput<RepaymentSchedule>> {
    let start = Instant::now();
    let terms = &input.terms;
    let amortization = compute_amortization(terms)?;

    let months = whole_months(amortization.number_of_months)?;
    let rate = amortization.monthly_rate;
    let emi = amortization.monthly_installment;

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = terms.principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut total_principal_paid = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = opening * rate;
        let principal = if month == months {
            opening
        } else {
            (emi - interest).min(opening)
        };
        balance = opening - principal;
        total_interest_paid += interest;
        total_principal_paid += principal;

        rows.push(ScheduleRow {
            month,
            due_date: due_date(input.start_date, month)?,
            opening_balance: opening,
            installment: interest + principal,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    let years = rows
        .chunks(12)
        .enumerate()
        .map(|(i, chunk)| YearSummary {
            year: i as u32 + 1,
            interest_paid: chunk.iter().map(|r| r.interest).sum(),
            principal_paid: chunk.iter().map(|r| r.principal).sum(),
            closing_balance: chunk.last().map(|r| r.closing_balance).unwrap_or_default(),
        })
        .collect();

    let output = RepaymentSchedule {
        monthly_installment: emi,
        rows,
        years,
        total_interest_paid,
        total_principal_paid,
    };

    let warnings = recommended_range_warnings(terms.principal, terms.tenure_years);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate EMI repayment schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn whole_months(months: Decimal) -> LoanResult<u32> {
    if !months.fract().is_zero() {
        return Err(LoanError::invalid(
            "tenure_years",
            format!("Schedule needs a whole number of months, got {months}"),
        ));
    }
    match months.to_u32() {
        Some(n) if n <= MAX_SCHEDULE_MONTHS => Ok(n),
        _ => Err(LoanError::invalid(
            "tenure_years",
            format!("Schedule is limited to {MAX_SCHEDULE_MONTHS} months"),
        )),
    }
}

fn due_date(first: Option<NaiveDate>, month: u32) -> LoanResult<Option<NaiveDate>> {
    match first {
        None => Ok(None),
        Some(d) => d
            .checked_add_months(chrono::Months::new(month - 1))
            .map(Some)
            .ok_or_else(|| LoanError::invalid("start_date", "Due date out of calendar range")),
    }
}
