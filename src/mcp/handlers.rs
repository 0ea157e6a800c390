//! MCP (Model Context Protocol) route handlers
//!
//! HTTP surface of the gateway: `POST` carries JSON-RPC on any path, `GET /sse`
//! opens the finite heartbeat stream, any other `GET` answers with a
//! method-not-found envelope. `OPTIONS` is answered by the CORS layer in
//! [`crate::router`].

use super::{
    dispatcher::dispatch,
    heartbeat::heartbeat_stream,
    helpers::rpc_error,
    models::METHOD_NOT_FOUND,
};
use crate::weather::SharedState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response, Sse},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_rpc).get(handle_unsupported_get))
        .route("/sse", get(handle_sse))
        .fallback(handle_fallback)
}

/// Endpoint: POST /
/// Handles the JSON-RPC communication. The body is read raw so that empty and
/// non-JSON bodies are reported as parse errors rather than HTTP rejections.
async fn handle_rpc(State(state): State<SharedState>, body: Bytes) -> Response {
    Json(dispatch(&state, &body).await).into_response()
}

/// Endpoint: GET /sse
async fn handle_sse(State(state): State<SharedState>) -> impl IntoResponse {
    Sse::new(heartbeat_stream(state.heartbeat))
}

/// Any GET other than `/sse`.
async fn handle_unsupported_get() -> Response {
    Json(rpc_error(
        Value::Null,
        METHOD_NOT_FOUND,
        "GET is not supported. Use POST for JSON-RPC requests.",
    ))
    .into_response()
}

/// Paths without an explicit route behave like `/`.
async fn handle_fallback(state: State<SharedState>, method: Method, body: Bytes) -> Response {
    match method {
        Method::POST => handle_rpc(state, body).await,
        Method::GET => handle_unsupported_get().await,
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
