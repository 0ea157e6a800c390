//! Model Context Protocol (MCP) Module
//!
//! This module contains the protocol implementation, including:
//! - Protocol models (envelopes, error codes, constants) and faults
//! - RPC helpers (success/error envelopes)
//! - The tool registry and its executors
//! - The dispatcher, the heartbeat stream and the HTTP handlers

pub mod dispatcher;
pub mod errors;
pub mod handlers;
pub mod heartbeat;
pub mod helpers;
pub mod models;
pub mod registry;
pub mod tools;

// Re-export commonly used types and functions
pub use dispatcher::dispatch;
pub use errors::RpcFault;
pub use handlers::routes;
pub use models::ToolOutcome;
