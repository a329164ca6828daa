pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// True for a non-empty array whose first element is an object: rendered
/// as rows rather than as a single cell.
pub(crate) fn is_row_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if matches!(items.first(), Some(Value::Object(_))))
}

/// Schedule columns in reading order; any other keys follow alphabetically.
const ROW_COLUMNS: [&str; 5] = ["month", "payment", "principal", "interest", "balance"];

/// Column headers for an array of row objects.
pub(crate) fn row_headers(rows: &[Value]) -> Vec<String> {
    let Some(Value::Object(first)) = rows.first() else {
        return Vec::new();
    };
    let mut headers: Vec<String> = ROW_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    headers.extend(
        first
            .keys()
            .filter(|k| !ROW_COLUMNS.contains(&k.as_str()))
            .cloned(),
    );
    headers
}

/// Render a scalar (or compact JSON for nested values) for a single cell.
pub(crate) fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
