use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, is_row_array, row_headers};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => print_table(other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalars go in a Field/Value table; row arrays (the schedule) follow as
/// their own tables.
fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested = Vec::new();
    for (key, val) in map {
        if is_row_array(val) {
            nested.push((key, val));
        } else {
            builder.push_record([key.clone(), format_cell(val)]);
        }
    }
    println!("{}", Table::from(builder));

    for (key, val) in nested {
        if let Value::Array(rows) = val {
            println!("\n{}:", key);
            print_rows(rows);
        }
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    if !matches!(rows.first(), Some(Value::Object(_))) {
        for item in rows {
            println!("{}", format_cell(item));
        }
        return;
    }

    let headers = row_headers(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in rows {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(format_cell).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
