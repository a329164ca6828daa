use serde_json::Value;
use std::io;

use super::{format_cell, is_row_array, row_headers};

/// Write output as CSV to stdout.
///
/// A result carrying a schedule is written as one row per period; other
/// objects fall back to two-column field/value records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match body {
        Value::Object(map) => match map.get("schedule") {
            Some(schedule @ Value::Array(rows)) if is_row_array(schedule) => {
                write_rows(&mut wtr, rows)
            }
            _ => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_cell(val)]);
                }
            }
        },
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([&format_cell(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let headers = row_headers(rows);
    if headers.is_empty() {
        for item in rows {
            let _ = wtr.write_record([&format_cell(item)]);
        }
        return;
    }

    let _ = wtr.write_record(&headers);
    for item in rows {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(format_cell).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}
