//! MCP client error types.

use thiserror::Error;

/// Placeholder used when an error envelope carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The single failure type surfaced by the client driver.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, or any other transport failure.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// The response body was not a JSON-RPC envelope.
    #[error("invalid response body: {reason}")]
    InvalidBody { reason: String },

    /// The envelope carried an `error` member (or no `result`).
    #[error("server error: {message}")]
    Server { code: Option<i32>, message: String },

    /// A `getTools` result without a `tools` member.
    #[error("server response is missing the tools list")]
    MissingTools,

    /// Every `initialize` attempt failed.
    #[error("could not connect to the MCP server after {attempts} attempts: {reason}")]
    InitializationFailed { attempts: u32, reason: String },
}
