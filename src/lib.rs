//! Morocco Weather MCP Library
//!
//! This library provides a small JSON-RPC tool gateway over HTTP: a server
//! exposing weather tools for Moroccan cities and a client that discovers
//! and invokes them.

// Domain modules
pub mod mcp;
pub mod weather;

// Client side
pub mod client;

// Infrastructure
pub mod config;
pub mod router;
