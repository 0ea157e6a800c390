//! Protocol Dispatcher
//!
//! Turns a raw request body into a response envelope: parse, validate the
//! shape, route by `method`, and wrap the handler's output. Protocol faults
//! become `error` envelopes; tool domain failures stay inside `result`.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::errors::RpcFault;
use super::helpers::{panic_message, rpc_fault, rpc_success};
use super::models::{
    METHOD_EXECUTE_TOOL, METHOD_GET_TOOLS, METHOD_INITIALIZE, SERVER_NAME, SERVER_VENDOR,
    SERVER_VERSION,
};
use super::registry::registry;
use super::tools::execute_tool;
use crate::weather::AppState;

/// Dispatches one raw request body and returns the response envelope.
pub async fn dispatch(state: &AppState, body: &[u8]) -> Value {
    let request = match parse_request(body) {
        Ok(request) => request,
        Err(fault) => {
            warn!(code = fault.code(), "{}", fault);
            return rpc_fault(Value::Null, &fault);
        }
    };

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");
    let params = request.get("params").cloned().unwrap_or(Value::Null);

    info!(method = method, id = %id, "rpc call");

    let outcome = AssertUnwindSafe(dispatch_method(state, method, params))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(RpcFault::Internal(panic_message(&*payload))));

    match outcome {
        Ok(result) => rpc_success(id, result),
        Err(fault) => {
            warn!(method = method, code = fault.code(), "{}", fault);
            rpc_fault(id, &fault)
        }
    }
}

/// Parses the body and checks it is a JSON object.
fn parse_request(body: &[u8]) -> Result<serde_json::Map<String, Value>, RpcFault> {
    if body.is_empty() {
        return Err(RpcFault::Parse("empty request body".to_string()));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        // Valid JSON that is not an object cannot be correlated to an id.
        Ok(_) => Err(RpcFault::Internal(
            "request must be a JSON object".to_string(),
        )),
        Err(e) => Err(RpcFault::Parse(e.to_string())),
    }
}

async fn dispatch_method(state: &AppState, method: &str, params: Value) -> Result<Value, RpcFault> {
    match method {
        METHOD_INITIALIZE => Ok(handle_initialize()),
        METHOD_GET_TOOLS => Ok(handle_get_tools()),
        METHOD_EXECUTE_TOOL => handle_execute_tool(state, params).await,
        other => Err(RpcFault::MethodNotFound(other.to_string())),
    }
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    debug!("initializing connection");
    json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION,
        "vendor": SERVER_VENDOR,
        "capabilities": {
            "tools": true
        }
    })
}

/// Handles `getTools` request.
fn handle_get_tools() -> Value {
    json!({ "tools": registry().to_json() })
}

/// Handles `executeTool` request.
async fn handle_execute_tool(state: &AppState, params: Value) -> Result<Value, RpcFault> {
    let tool_name = params
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| RpcFault::InvalidParams("missing tool name".to_string()))?;

    let tool = registry()
        .get(tool_name)
        .ok_or_else(|| RpcFault::InvalidParams(format!("unknown tool: {}", tool_name)))?;

    let parameters = params.get("parameters").cloned().unwrap_or(Value::Null);
    info!(tool = tool.name, "executing tool");

    AssertUnwindSafe(execute_tool(state, tool.kind, parameters))
        .catch_unwind()
        .await
        .map(|outcome| outcome.into_result())
        .map_err(|payload| {
            RpcFault::Internal(format!(
                "tool execution failed: {}",
                panic_message(&*payload)
            ))
        })
}
