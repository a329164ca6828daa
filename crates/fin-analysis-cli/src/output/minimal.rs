use serde_json::Value;

use super::format_cell;

/// Key answer fields, in priority order.
const PRIORITY_KEYS: [&str; 4] = ["monthlyPayment", "totalPayments", "totalInterest", "name"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            for key in &PRIORITY_KEYS {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        return format_cell(val);
                    }
                }
            }
            match map.iter().next() {
                Some((key, val)) => format!("{}: {}", key, format_cell(val)),
                None => String::new(),
            }
        }
        // Tool listings: one name per line
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("name") {
                Some(name) => format_cell(name),
                None => format_cell(item),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => format_cell(other),
    }
}
