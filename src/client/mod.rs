//! MCP Client Module
//!
//! This module contains the client side of the gateway:
//! - The request driver with its initialize-on-demand handshake
//! - The bounded retry policy and delay strategy
//! - Client errors
//! - The interactive terminal application

pub mod app;
pub mod driver;
pub mod errors;
pub mod retry;

pub use app::WeatherApp;
pub use driver::McpClient;
pub use errors::ClientError;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
