pub mod amortization;
pub mod lease;
pub mod rpc;
pub mod tools;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::input;

/// Resolve the request body: `--input` file, then piped stdin, then flags.
pub fn resolve_body(
    path: Option<&str>,
    from_flags: impl FnOnce() -> Result<Value, Box<dyn std::error::Error>>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return input::file::read_input_value(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        tracing::debug!("reading input from stdin");
        return Ok(data);
    }
    from_flags()
}

/// Insert a decimal flag as a JSON number so it goes through the same
/// validation as a JSON body.
pub fn insert_decimal(
    body: &mut Map<String, Value>,
    key: &str,
    value: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let number: Value = serde_json::from_str(&value.to_string())?;
    body.insert(key.to_string(), number);
    Ok(())
}
