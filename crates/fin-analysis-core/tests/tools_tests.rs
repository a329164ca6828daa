use fin_analysis_core::stable_json::{stable_hash, to_stable_string};
use fin_analysis_core::tools::{self, protocol};
use fin_analysis_core::validation::is_valid_financial_input;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn rpc(message: Value) -> Value {
    let out = tools::handle_message(&message.to_string());
    serde_json::from_str(&out).unwrap()
}

#[test]
fn test_session_initialize_list_call() {
    let init = rpc(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}));
    assert_eq!(init["result"]["protocolVersion"], json!("2024-11-05"));

    let list = rpc(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));
    let names: Vec<&str> = list["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["analyze_lease", "analyze_amortization"]);

    let call = rpc(json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {
            "name": "analyze_amortization",
            "arguments": {"principal": 10000, "annualRate": 0.06, "termMonths": 24}
        }
    }));
    assert_eq!(call["id"], json!(3));
    assert_eq!(call["result"]["monthlyPayment"], json!(443.21));
    assert_eq!(call["result"]["schedule"][23]["balance"], json!(0.0));
}

#[test]
fn test_result_field_names_on_the_wire() {
    let call = rpc(json!({
        "jsonrpc": "2.0",
        "id": "lease-1",
        "method": "tools/call",
        "params": {
            "name": "analyze_lease",
            "arguments": {"principal": 50000, "annualRate": 0.05, "termMonths": 60, "residualValue": 10000}
        }
    }));
    let result = call["result"].as_object().unwrap();
    let mut keys: Vec<&String> = result.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["monthlyPayment", "schedule", "totalInterest", "totalPayments"]);

    let row = call["result"]["schedule"][0].as_object().unwrap();
    let mut row_keys: Vec<&String> = row.keys().collect();
    row_keys.sort();
    assert_eq!(row_keys, vec!["balance", "interest", "month", "payment", "principal"]);
    assert_eq!(call["result"]["schedule"][59]["balance"], json!(10000.0));
}

#[test]
fn test_invalid_arguments_map_to_issue_list() {
    let call = rpc(json!({
        "jsonrpc": "2.0",
        "id": 9,
        "method": "tools/call",
        "params": {"name": "analyze_lease", "arguments": {"principal": -1, "annualRate": 2, "termMonths": 0}}
    }));
    assert_eq!(call["error"]["code"], json!(protocol::INVALID_PARAMS));
    let issues = call["error"]["data"]["issues"].as_array().unwrap();
    let paths: Vec<&str> = issues.iter().filter_map(|i| i["path"].as_str()).collect();
    assert_eq!(paths, vec!["principal", "annualRate", "termMonths"]);
    assert!(issues.iter().all(|i| i["code"].is_string() && i["message"].is_string()));
}

#[test]
fn test_unknown_tool_is_invalid_params() {
    let call = rpc(json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "tools/call",
        "params": {"name": "analyze_cashflow", "arguments": {}}
    }));
    assert_eq!(call["error"]["code"], json!(protocol::INVALID_PARAMS));
    assert_eq!(call["error"]["message"], json!("Tool analyze_cashflow not found"));
}

#[test]
fn test_unrepresentable_schedule_is_an_error_response() {
    let call = rpc(json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "tools/call",
        "params": {
            "name": "analyze_amortization",
            "arguments": {"principal": 1e27, "annualRate": 1, "termMonths": 1200}
        }
    }));
    assert_eq!(call["id"], json!(5));
    assert_eq!(call["error"]["code"], json!(protocol::INVALID_PARAMS));
    assert!(call["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Arithmetic overflow"));
    assert!(call.get("result").is_none());

    // The session keeps answering afterwards
    let list = rpc(json!({"jsonrpc": "2.0", "id": 6, "method": "tools/list"}));
    assert_eq!(list["result"]["tools"].as_array().map(|t| t.len()), Some(2));
}

#[test]
fn test_tool_results_match_direct_calls() {
    let args = json!({"principal": 30000, "annualRate": 0.04, "termMonths": 36});
    let via_tool = tools::call_tool("analyze_amortization", &args).unwrap();
    let direct = fin_analysis_core::amortization::analyze_amortization_value(&args).unwrap();
    assert_eq!(via_tool, direct);
}

#[test]
fn test_stable_rendering_of_tool_input() {
    let a = json!({"termMonths": 12, "principal": 1000, "annualRate": 0.05});
    assert_eq!(
        to_stable_string(&a),
        r#"{"annualRate":0.05,"principal":1000,"termMonths":12}"#
    );
    let b: Value = serde_json::from_str(r#"{"principal":1000,"annualRate":0.05,"termMonths":12}"#).unwrap();
    assert_eq!(stable_hash(&a), stable_hash(&b));
}

#[test]
fn test_financial_input_predicate() {
    assert!(is_valid_financial_input(&json!({"principal": 1, "annualRate": 0, "termMonths": 1})));
    assert!(!is_valid_financial_input(&json!({"principal": 1, "annualRate": 0, "termMonths": 1.5})));
    assert!(!is_valid_financial_input(&json!({"principal": 1, "annualRate": 0})));
}
