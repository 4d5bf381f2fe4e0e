use emi_core::display::format_grouped;
use rust_decimal::Decimal;
use serde_json::Value;

/// Print just the headline figure(s).
///
/// A comparison prints one `lender: EMI` line per quote; a lender list
/// prints names; otherwise the first well-known field found.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(quotes)) = result_obj.get("quotes") {
        for q in quotes {
            println!(
                "{}: {}",
                q["lender"]["name"].as_str().unwrap_or("?"),
                format_minimal(&q["monthly_installment"])
            );
        }
        return;
    }

    if let Value::Array(items) = result_obj {
        for item in items {
            match item.get("name") {
                Some(name) => println!("{}", format_minimal(name)),
                None => println!("{}", format_minimal(item)),
            }
        }
        return;
    }

    let priority_keys = [
        "monthly_installment",
        "total_interest",
        "total_payment",
        "total_interest_paid",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

/// Money strings are rounded to whole units with separators.
fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => format_grouped(d),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
