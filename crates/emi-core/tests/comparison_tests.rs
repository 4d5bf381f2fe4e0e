use emi_core::lenders::catalog::{default_catalog, find_lender, Lender};
use emi_core::lenders::comparison::{self, ComparisonInput};
use emi_core::LoanError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn catalog_names() -> Vec<String> {
    default_catalog().into_iter().map(|l| l.name).collect()
}

#[test]
fn test_catalog_comparison_preserves_order() {
    let input = ComparisonInput {
        principal: dec!(5_000_000),
        tenure_years: dec!(20),
        lenders: default_catalog(),
    };
    let out = comparison::compare_across_lenders(&input).unwrap();
    let names: Vec<String> = out.result.quotes.iter().map(|q| q.lender.name.clone()).collect();
    assert_eq!(names, catalog_names());
}

#[test]
fn test_catalog_installments_rise_with_rate() {
    let comparison =
        comparison::compare_lenders(dec!(5_000_000), dec!(20), &default_catalog()).unwrap();
    let mut quotes = comparison.require_complete().unwrap();
    assert_eq!(quotes.len(), 6);

    quotes.sort_by(|a, b| a.lender.annual_rate_percent.cmp(&b.lender.annual_rate_percent));
    for pair in quotes.windows(2) {
        assert!(
            pair[1].monthly_installment > pair[0].monthly_installment,
            "{} ({}%) should cost more than {} ({}%)",
            pair[1].lender.name,
            pair[1].lender.annual_rate_percent,
            pair[0].lender.name,
            pair[0].lender.annual_rate_percent,
        );
    }
}

#[test]
fn test_catalog_quote_figures() {
    let comparison =
        comparison::compare_lenders(dec!(5_000_000), dec!(20), &default_catalog()).unwrap();
    let expected = [
        ("SBI", dec!(43391.16), dec!(25_000)),
        ("HDFC", dec!(44185.54), dec!(25_000)),
        ("ICICI", dec!(43867.01), dec!(37_500)),
        ("Axis Bank", dec!(44665.23), dec!(50_000)),
        ("Kotak Mahindra", dec!(44026.15), dec!(25_000)),
        ("Punjab National Bank", dec!(43549.52), dec!(17_500)),
    ];
    for (quote, (name, emi, fee)) in comparison.quotes.iter().zip(expected) {
        assert_eq!(quote.lender.name, name);
        assert!((quote.monthly_installment - emi).abs() < dec!(0.01), "{name}");
        assert_eq!(quote.processing_fee, fee);
        assert_eq!(quote.total_interest, quote.total_payment - dec!(5_000_000));
    }
}

#[test]
fn test_quote_matches_comparison_entry() {
    let catalog = default_catalog();
    let hdfc = find_lender(&catalog, "HDFC").unwrap();
    let single = comparison::quote_lender(dec!(5_000_000), dec!(20), hdfc).unwrap();
    let all = comparison::compare_lenders(dec!(5_000_000), dec!(20), &catalog).unwrap();
    assert_eq!(single.monthly_installment, all.quotes[1].monthly_installment);
    assert_eq!(single.total_interest, all.quotes[1].total_interest);
}

#[test]
fn test_malformed_entries_do_not_hide_valid_quotes() {
    let mut lenders = default_catalog();
    lenders.push(Lender::new("", dec!(8.5), dec!(0.5)));
    lenders.push(Lender::new("Zero Rate Co", Decimal::ZERO, dec!(0.5)));

    let comparison = comparison::compare_lenders(dec!(5_000_000), dec!(20), &lenders).unwrap();
    assert_eq!(comparison.quotes.len(), 6);
    let failed: Vec<&str> = comparison.failures.iter().map(|f| f.lender.as_str()).collect();
    assert_eq!(failed, vec!["", "Zero Rate Co"]);

    let err = comparison.require_complete().unwrap_err();
    assert!(matches!(err, LoanError::PartialComparisonFailure { ref failed } if failed.len() == 2));
    assert!(err.to_string().contains("Zero Rate Co"));
}

#[test]
fn test_comparison_rejects_zero_tenure() {
    let err = comparison::compare_lenders(dec!(5_000_000), Decimal::ZERO, &default_catalog())
        .unwrap_err();
    assert!(matches!(err, LoanError::InvalidInput { ref field, .. } if field == "tenure_years"));
}

#[test]
fn test_comparison_input_accepts_strings_and_numbers() {
    let input: ComparisonInput = serde_json::from_str(
        r#"{
            "principal": "2500000",
            "tenure_years": 15,
            "lenders": [
                {"name": "Credit Union", "annual_rate_percent": 8.1, "processing_fee_percent": 0}
            ]
        }"#,
    )
    .unwrap();
    let out = comparison::compare_across_lenders(&input).unwrap();
    assert_eq!(out.result.quotes.len(), 1);
    assert_eq!(out.result.quotes[0].processing_fee, Decimal::ZERO);
}
