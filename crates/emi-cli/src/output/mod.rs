pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted keys ("lender.name").
/// Arrays are left in place for the caller to render.
pub(crate) fn flatten_object(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::with_capacity(map.len());
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (k, v) in flatten_object(inner) {
                    out.push((format!("{key}.{k}"), v));
                }
            }
            _ => out.push((key.clone(), val.clone())),
        }
    }
    out
}

/// Arrays of objects inside a result (quotes, failures, schedule rows).
pub(crate) fn object_arrays(map: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    map.iter()
        .filter_map(|(key, val)| match val {
            Value::Array(arr) if arr.first().map(Value::is_object).unwrap_or(false) => {
                Some((key.as_str(), arr.as_slice()))
            }
            _ => None,
        })
        .collect()
}
