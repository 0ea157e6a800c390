//! Client Request Driver
//!
//! Builds request envelopes, posts them with a per-call timeout and
//! classifies the answer. The client starts uninitialized; `getTools` and
//! `executeTool` run the `initialize` handshake first when needed. Only the
//! handshake retries.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::errors::{ClientError, UNKNOWN_ERROR};
use super::retry::{run_with_retry, RetryPolicy, Sleeper, TokioSleeper};
use crate::mcp::models::{
    ErrorObject, JsonRpcRequest, METHOD_EXECUTE_TOOL, METHOD_GET_TOOLS, METHOD_INITIALIZE,
};

/// Correlation id used by the handshake.
const INITIALIZE_ID: u64 = 1;

/// JSON-RPC client for the weather gateway.
pub struct McpClient<S: Sleeper = TokioSleeper> {
    server_url: String,
    http: HttpClient,
    initialized: bool,
    next_id: u64,
    retry: RetryPolicy,
    sleeper: S,
}

impl McpClient<TokioSleeper> {
    /// Creates a client with the default retry policy.
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_retry(server_url, RetryPolicy::default(), TokioSleeper)
    }
}

impl<S: Sleeper> McpClient<S> {
    /// Creates a client with an explicit retry policy and delay strategy.
    pub fn with_retry(
        server_url: impl Into<String>,
        retry: RetryPolicy,
        sleeper: S,
    ) -> Result<Self, ClientError> {
        let server_url = server_url.into();
        let http = build_http_client(&server_url, retry.call_timeout)?;

        Ok(Self {
            server_url,
            http,
            initialized: false,
            next_id: INITIALIZE_ID + 1,
            retry,
            sleeper,
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Performs the `initialize` handshake, retrying per the policy.
    ///
    /// Each attempt uses a fresh HTTP client, hence a fresh connection.
    /// Returns the server identity descriptor.
    pub async fn initialize(&mut self) -> Result<Value, ClientError> {
        let request = JsonRpcRequest::new(METHOD_INITIALIZE, json!({}), INITIALIZE_ID);
        let url = self.server_url.as_str();
        let policy = self.retry;

        let result = run_with_retry(&policy, &self.sleeper, |attempt| {
            let request = &request;
            async move {
                info!(attempt, max_attempts = policy.max_attempts, url = url, "connecting");
                let http = build_http_client(url, policy.attempt_timeout)?;
                post_envelope(&http, url, request).await
            }
        })
        .await?;

        self.initialized = true;
        Ok(result)
    }

    /// Fetches the tool registry as a `{name: descriptor}` mapping.
    pub async fn get_tools(&mut self) -> Result<Value, ClientError> {
        self.ensure_initialized().await?;
        let mut result = self.send_request(METHOD_GET_TOOLS, json!({})).await?;
        result
            .get_mut("tools")
            .map(Value::take)
            .ok_or(ClientError::MissingTools)
    }

    /// Invokes a tool and returns its result payload.
    ///
    /// A domain failure comes back as `Ok` with an `error` member in the
    /// payload; callers must inspect it.
    pub async fn execute_tool(
        &mut self,
        name: &str,
        parameters: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.ensure_initialized().await?;
        let params = json!({
            "name": name,
            "parameters": parameters.unwrap_or_else(|| json!({})),
        });
        self.send_request(METHOD_EXECUTE_TOOL, params).await
    }

    /// Sends one request with no retry and returns the unwrapped `result`.
    pub async fn send_request(&mut self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id;
        self.next_id += 1;
        let request = JsonRpcRequest::new(method, params, id);
        post_envelope(&self.http, &self.server_url, &request).await
    }

    async fn ensure_initialized(&mut self) -> Result<(), ClientError> {
        if !self.initialized {
            self.initialize().await?;
        }
        Ok(())
    }
}

fn build_http_client(url: &str, timeout: Duration) -> Result<HttpClient, ClientError> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Transport {
            url: url.to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })
}

async fn post_envelope(
    http: &HttpClient,
    url: &str,
    request: &JsonRpcRequest,
) -> Result<Value, ClientError> {
    debug!(method = %request.method, id = %request.id, "sending request");

    let transport = |e: reqwest::Error| ClientError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let response = http.post(url).json(request).send().await.map_err(transport)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(transport)?;

    classify_response(status, &body)
}

/// Classifies a raw HTTP answer.
///
/// Non-2xx and unparsable bodies are transport faults; an envelope with
/// `result` is a success; anything else is a server fault whose message falls
/// back to a placeholder.
pub fn classify_response(status: u16, body: &[u8]) -> Result<Value, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::HttpStatus { status });
    }

    let parsed: Value = serde_json::from_slice(body).map_err(|e| ClientError::InvalidBody {
        reason: e.to_string(),
    })?;
    let Value::Object(mut envelope) = parsed else {
        return Err(ClientError::InvalidBody {
            reason: "response is not a JSON object".to_string(),
        });
    };

    // Presence of the member decides success, even when it holds `null`.
    if let Some(result) = envelope.remove("result") {
        return Ok(result);
    }

    let error = envelope
        .remove("error")
        .and_then(|e| serde_json::from_value::<ErrorObject>(e).ok());
    let (code, message) = match error {
        Some(error) => (error.code, error.message),
        None => (None, None),
    };
    Err(ClientError::Server {
        code,
        message: message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
    })
}
