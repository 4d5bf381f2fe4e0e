//! Presentation rounding for currency figures.
//!
//! The engine never rounds; callers use these helpers at the edge.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::Money;

const LAKH: Decimal = dec!(100_000);

/// Round half away from zero to `dp` decimal places.
pub fn round_currency(value: Money, dp: u32) -> Money {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole currency units with a comma every three digits ("43,391").
pub fn format_grouped(value: Money) -> String {
    let rounded = round_currency(value, 0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rupee amount in whole units ("₹43,391").
pub fn format_rupees(value: Money) -> String {
    let grouped = format_grouped(value);
    match grouped.strip_prefix('-') {
        Some(abs) => format!("-₹{abs}"),
        None => format!("₹{grouped}"),
    }
}

/// Amount in lakhs to two places ("54.14L").
pub fn format_lakhs(value: Money) -> String {
    format!("{:.2}L", round_currency(value / LAKH, 2))
}

/// Percentage rounded to whole units ("52%").
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", round_currency(value, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_currency(dec!(43391.5), 0), dec!(43392));
        assert_eq!(round_currency(dec!(-43391.5), 0), dec!(-43392));
        assert_eq!(round_currency(dec!(43391.1617), 0), dec!(43391));
        assert_eq!(round_currency(dec!(2.345), 2), dec!(2.35));
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(dec!(43391.1617)), "43,391");
        assert_eq!(format_grouped(dec!(10413878.80)), "10,413,879");
        assert_eq!(format_grouped(dec!(999)), "999");
        assert_eq!(format_grouped(dec!(1000)), "1,000");
        assert_eq!(format_grouped(dec!(0.4)), "0");
        assert_eq!(format_grouped(dec!(-1234567)), "-1,234,567");
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(dec!(25000)), "₹25,000");
        assert_eq!(format_rupees(dec!(-25000)), "-₹25,000");
    }

    #[test]
    fn test_format_lakhs() {
        assert_eq!(format_lakhs(dec!(5_000_000)), "50.00L");
        assert_eq!(format_lakhs(dec!(5413878.80)), "54.14L");
        assert_eq!(format_lakhs(dec!(10413878.80)), "104.14L");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(51.987)), "52%");
        assert_eq!(format_percent(dec!(48.013)), "48%");
    }
}
