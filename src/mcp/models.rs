//! MCP Protocol Models and Constants
//!
//! This module contains the envelope shapes, error codes and server identity
//! shared by the dispatcher and the client driver.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// MCP Constants
// =============================================================================

/// Name of the weather lookup tool
pub const GET_WEATHER_TOOL: &str = "get_weather";
/// Name of the city listing tool
pub const LIST_CITIES_TOOL: &str = "list_cities";
/// Server identifier
pub const SERVER_NAME: &str = "morocco-weather-mcp-server";
/// Server version advertised by `initialize`
pub const SERVER_VERSION: &str = "1.0.0";
/// Vendor advertised by `initialize`
pub const SERVER_VENDOR: &str = "example";
/// JSON-RPC protocol marker
pub const JSONRPC_VERSION: &str = "2.0";

/// RPC method names
pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_GET_TOOLS: &str = "getTools";
pub const METHOD_EXECUTE_TOOL: &str = "executeTool";

// Standard JSON-RPC error codes. Fixed meanings, never renumbered.
pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    pub jsonrpc: String,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    #[serde(default)]
    pub params: Value,

    /// Request identifier
    pub id: Value,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: impl Into<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

/// Error member of a response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorObject {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What a tool executor produced.
///
/// Executors are total: a recognised tool call always yields one of these,
/// and both variants travel inside a successful envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Normal result payload
    Success(Value),

    /// Business failure, rendered as `{"error": message}`
    DomainFault(String),
}

impl ToolOutcome {
    /// The value placed under the envelope's `result` member.
    pub fn into_result(self) -> Value {
        match self {
            ToolOutcome::Success(value) => value,
            ToolOutcome::DomainFault(message) => json!({ "error": message }),
        }
    }
}
