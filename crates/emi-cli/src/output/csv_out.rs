use serde_json::{Map, Value};
use std::io;

use super::{flatten_object, object_arrays};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let _ = write_csv(stdout.lock(), value);
}

/// Write output as CSV.
///
/// A result holding lists (comparison quotes and failures, schedule rows and
/// years) is written one row per entry. With more than one list, each is
/// preceded by a one-field record naming it, and failures come last. Anything
/// else is written as field/value pairs.
pub fn write_csv<W: io::Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                let mut sections = object_arrays(result);
                sections.sort_by_key(|(name, _)| *name == "failures");
                match sections.as_slice() {
                    [] => write_fields_csv(&mut wtr, result)?,
                    [(_, rows)] => write_array_csv(&mut wtr, rows)?,
                    _ => {
                        for (name, rows) in &sections {
                            wtr.write_record([*name])?;
                            write_array_csv(&mut wtr, rows)?;
                        }
                    }
                }
            }
            _ => write_fields_csv(&mut wtr, map)?,
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr)?,
        _ => wtr.write_record([&format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields_csv<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten_object(map) {
        wtr.write_record([key.as_str(), &format_csv_value(&val)])?;
    }
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = flatten_object(first).into_iter().map(|(k, _)| k).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let flat: Map<String, Value> = flatten_object(map).into_iter().collect();
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| flat.get(h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_string(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_comparison_writes_quotes_then_failures() {
        let value = json!({
            "result": {
                "quotes": [{"lender": {"name": "SBI"}, "monthly_installment": "43391.16"}],
                "failures": [{"lender": "Broken", "reason": "Invalid input: annual_rate_percent"}],
            },
            "warnings": ["1 of 2 lenders could not be quoted"],
        });
        let out = csv_string(&value);

        let quotes_at = out.find("quotes\n").unwrap();
        let failures_at = out.find("failures\n").unwrap();
        assert!(quotes_at < failures_at, "{out}");
        assert!(out.contains("lender.name,monthly_installment\nSBI,43391.16\n"), "{out}");
        assert!(out.contains("lender,reason\nBroken,Invalid input: annual_rate_percent\n"), "{out}");
    }

    #[test]
    fn test_single_list_has_no_section_label() {
        let value = json!({"result": {"quotes": [{"name": "SBI"}], "failures": []}});
        assert_eq!(csv_string(&value), "name\nSBI\n");
    }

    #[test]
    fn test_plain_result_written_as_fields() {
        let value = json!({"result": {"monthly_installment": "43391.16"}});
        assert_eq!(csv_string(&value), "field,value\nmonthly_installment,43391.16\n");
    }
}
