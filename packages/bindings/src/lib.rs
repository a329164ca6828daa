use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::Value;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse(input_json: &str) -> NapiResult<Value> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Analyzers
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_amortization(input_json: String) -> NapiResult<String> {
    let input = parse(&input_json)?;
    let output = fin_analysis_core::amortization::analyze_amortization_value(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_lease(input_json: String) -> NapiResult<String> {
    let input = parse(&input_json)?;
    let output =
        fin_analysis_core::lease::analyze_lease_value(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tool catalog
// ---------------------------------------------------------------------------

#[napi]
pub fn list_tools() -> NapiResult<String> {
    serde_json::to_string(&fin_analysis_core::tools::list_tools()).map_err(to_napi_error)
}

#[napi]
pub fn call_tool(name: String, arguments_json: String) -> NapiResult<String> {
    let arguments = parse(&arguments_json)?;
    let output =
        fin_analysis_core::tools::call_tool(&name, &arguments).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// One JSON-RPC message in, one response out. Never throws: protocol
/// errors come back as error responses.
#[napi]
pub fn handle_rpc(message: String) -> String {
    fin_analysis_core::tools::handle_message(&message)
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

#[napi]
pub fn stable_hash(input_json: String) -> NapiResult<String> {
    let value = parse(&input_json)?;
    Ok(fin_analysis_core::stable_json::stable_hash(&value))
}
