//! Named analysis tools with JSON-Schema-like input descriptions, so the
//! analyzers can be listed and invoked generically by name.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::amortization::analyze_amortization_value;
use crate::error::FinAnalysisError;
use crate::lease::analyze_lease_value;
use crate::types::AnalysisResult;
use crate::FinAnalysisResult;

pub const ANALYZE_LEASE: &str = "analyze_lease";
pub const ANALYZE_AMORTIZATION: &str = "analyze_amortization";

/// Public description of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// All registered tools, lease first.
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: ANALYZE_LEASE.to_string(),
            description: "Analyze lease agreement financials".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "principal": { "type": "number", "description": "Principal amount" },
                    "annualRate": { "type": "number", "description": "Annual interest rate (0-1)" },
                    "termMonths": { "type": "number", "description": "Term in months" },
                    "residualValue": { "type": "number", "description": "Residual value", "default": 0 }
                },
                "required": ["principal", "annualRate", "termMonths"]
            }),
        },
        ToolDescriptor {
            name: ANALYZE_AMORTIZATION.to_string(),
            description: "Analyze loan amortization schedule".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "principal": { "type": "number", "description": "Principal amount" },
                    "annualRate": { "type": "number", "description": "Annual interest rate (0-1)" },
                    "termMonths": { "type": "number", "description": "Term in months" }
                },
                "required": ["principal", "annualRate", "termMonths"]
            }),
        },
    ]
}

/// Validate `arguments` for the named tool and run it.
pub fn call_tool(name: &str, arguments: &Value) -> FinAnalysisResult<AnalysisResult> {
    match name {
        ANALYZE_LEASE => analyze_lease_value(arguments),
        ANALYZE_AMORTIZATION => analyze_amortization_value(arguments),
        other => Err(FinAnalysisError::UnknownTool(other.to_string())),
    }
}
