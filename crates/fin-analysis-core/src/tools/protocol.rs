//! JSON-RPC 2.0 dispatch over the tool catalog (`initialize`, `tools/list`,
//! `tools/call`). Transport-agnostic: callers feed requests and get
//! responses back, one message at a time.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FinAnalysisError;
use crate::tools::catalog::{call_tool, list_tools};
use crate::FinAnalysisResult;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "financial-analysis-mcp";

const MAX_METHOD_LEN: usize = 100;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(serde_json::Number),
    String(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    /// `None` only when the request id could not be read
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<RequestId>, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Run one method against the tool catalog.
pub fn dispatch(method: &str, params: Option<&Value>) -> FinAnalysisResult<Value> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": true } },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })),
        "tools/list" => Ok(json!({ "tools": list_tools() })),
        "tools/call" => {
            let params = params
                .ok_or_else(|| FinAnalysisError::InvalidParams("tools/call requires params".into()))?;
            let call: CallParams = serde_json::from_value(params.clone())
                .map_err(|e| FinAnalysisError::InvalidParams(e.to_string()))?;
            let result = call_tool(&call.name, &call.arguments)?;
            Ok(serde_json::to_value(result)?)
        }
        other => Err(FinAnalysisError::MethodNotFound(other.to_string())),
    }
}

/// Check the envelope and dispatch a parsed request.
pub fn respond(request: &RpcRequest) -> RpcResponse {
    let outcome = check_envelope(request)
        .and_then(|()| dispatch(&request.method, request.params.as_ref()));
    match outcome {
        Ok(result) => RpcResponse::success(request.id.clone(), result),
        Err(e) => RpcResponse::failure(Some(request.id.clone()), to_rpc_error(&e)),
    }
}

/// Handle one serialized message and return the serialized response.
pub fn handle_message(message: &str) -> String {
    let response = match serde_json::from_str::<Value>(message) {
        Err(e) => RpcResponse::failure(
            None,
            RpcError {
                code: PARSE_ERROR,
                message: format!("Parse error: {e}"),
                data: None,
            },
        ),
        Ok(value) => match serde_json::from_value::<RpcRequest>(value.clone()) {
            Ok(request) => respond(&request),
            Err(e) => RpcResponse::failure(
                value
                    .get("id")
                    .and_then(|id| serde_json::from_value(id.clone()).ok()),
                RpcError {
                    code: INVALID_REQUEST,
                    message: format!("Invalid request: {e}"),
                    data: None,
                },
            ),
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":{INTERNAL_ERROR},"message":{}}}}}"#,
            Value::String(e.to_string())
        )
    })
}

fn check_envelope(request: &RpcRequest) -> FinAnalysisResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(FinAnalysisError::InvalidRequest(format!(
            "jsonrpc must be \"{JSONRPC_VERSION}\""
        )));
    }
    if request.method.is_empty() || request.method.len() > MAX_METHOD_LEN {
        return Err(FinAnalysisError::InvalidRequest(format!(
            "method must be 1 to {MAX_METHOD_LEN} characters"
        )));
    }
    Ok(())
}

fn to_rpc_error(e: &FinAnalysisError) -> RpcError {
    let (code, data) = match e {
        FinAnalysisError::Validation { issues } => (
            INVALID_PARAMS,
            serde_json::to_value(issues).ok().map(|issues| json!({ "issues": issues })),
        ),
        FinAnalysisError::UnknownTool(_)
        | FinAnalysisError::InvalidParams(_)
        | FinAnalysisError::Overflow { .. } => (INVALID_PARAMS, None),
        FinAnalysisError::MethodNotFound(_) => (METHOD_NOT_FOUND, None),
        FinAnalysisError::InvalidRequest(_) => (INVALID_REQUEST, None),
        FinAnalysisError::InvalidInput { .. } | FinAnalysisError::SerializationError(_) => {
            (INTERNAL_ERROR, None)
        }
    };
    RpcError {
        code,
        message: e.to_string(),
        data,
    }
}
