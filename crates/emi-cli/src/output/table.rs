use emi_core::display::round_currency;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_object, object_arrays};

const MONEY_PLACES: u32 = 2;
/// Monthly rates are fractions (0.0070833 at 8.5% p.a.) and need more places.
const RATE_PLACES: u32 = 8;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{value}");
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_flat_object(res_map);
        for (name, rows) in object_arrays(res_map) {
            println!("\n{}:", name);
            print_array_table(rows);
        }
    } else {
        println!("{}", format_value("result", result));
    }

    // Companion sections such as "lender" or "breakdown"
    for (key, val) in envelope {
        if let Value::Object(extra) = val {
            if !matches!(key.as_str(), "result" | "assumptions" | "metadata") {
                println!("\n{}:", key);
                print_flat_object(extra);
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

/// Scalar fields as a two-column table; arrays are rendered separately.
fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_object(map) {
        if val.is_array() {
            continue;
        }
        let shown = format_value(&key, &val);
        builder.push_record([key, shown]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = flatten_object(first).into_iter().map(|(k, _)| k).collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let flat: Map<String, Value> = flatten_object(map).into_iter().collect();
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| flat.get(h).map(|v| format_value(h, v)).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value("", item));
        }
    }
}

/// Decimal strings are shown to two places, rates to eight; everything
/// else verbatim. `key` is the (possibly dotted) field name.
fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => round_currency(d, display_places(key)).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(key, v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn display_places(key: &str) -> u32 {
    let field = key.rsplit('.').next().unwrap_or(key);
    if field.ends_with("rate") {
        RATE_PLACES
    } else {
        MONEY_PLACES
    }
}
