//! Protocol-level faults.
//!
//! A fault here means the request itself could not be dispatched. Business
//! failures of a recognised tool call are not faults; see
//! [`ToolOutcome`](super::models::ToolOutcome).

use thiserror::Error;

use super::models::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};

/// Dispatch failure reported through the envelope's `error` member.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcFault {
    /// The body was empty or not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The `method` member named no known handler.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// The method was known but its params were unusable.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A handler failed unexpectedly.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcFault {
    /// The fixed JSON-RPC code for this fault.
    pub fn code(&self) -> i32 {
        match self {
            RpcFault::Parse(_) => PARSE_ERROR,
            RpcFault::MethodNotFound(_) => METHOD_NOT_FOUND,
            RpcFault::InvalidParams(_) => INVALID_PARAMS,
            RpcFault::Internal(_) => INTERNAL_ERROR,
        }
    }
}
