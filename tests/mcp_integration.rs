//! Integration tests for the weather MCP server
//!
//! These tests drive the full router and verify:
//! - Server initialization and tool discovery
//! - Tool execution (list_cities, get_weather) and domain errors
//! - Protocol error codes and id correlation
//! - The heartbeat stream and the non-RPC HTTP surface

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

use morocco_weather_mcp::router::create_app_router;
use morocco_weather_mcp::weather::{
    AppState, HeartbeatConfig, WeatherError, WeatherProvider, WeatherRecord,
};

/// Provider returning a fixed observation for any city
struct StubProvider;

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        Ok(WeatherRecord {
            city: city.to_string(),
            country: "Maroc".to_string(),
            temperature: 24.5,
            feels_like: 25.1,
            humidity: 40,
            pressure: 1012,
            weather_condition: "Clear".to_string(),
            description: "ciel dégagé".to_string(),
            wind_speed: 3.6,
            clouds: 0,
            timestamp: 1_718_000_000,
        })
    }
}

/// Provider that fails like an unreachable upstream
struct FailingProvider;

#[async_trait]
impl WeatherProvider for FailingProvider {
    async fn current_weather(&self, _city: &str) -> Result<WeatherRecord, WeatherError> {
        Err(WeatherError::Status { status: 503 })
    }
}

/// Provider with a bug
struct PanickingProvider;

#[async_trait]
impl WeatherProvider for PanickingProvider {
    async fn current_weather(&self, _city: &str) -> Result<WeatherRecord, WeatherError> {
        panic!("provider exploded")
    }
}

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    app_with_provider(Arc::new(StubProvider))
}

fn app_with_provider(provider: Arc<dyn WeatherProvider>) -> axum::Router {
    let state = AppState::with_provider(provider).with_heartbeat(HeartbeatConfig {
        pings: 3,
        interval: Duration::from_millis(1),
    });
    create_app_router(Arc::new(state))
}

/// Helper function to send a raw request and get the response body
async fn send_raw(app: &axum::Router, method: &str, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body_bytes.to_vec())
}

/// Helper function to send a JSON-RPC request and get the response
async fn send_jsonrpc_request(
    app: &axum::Router,
    method: &str,
    params: Option<Value>,
    id: Value,
) -> (StatusCode, Value) {
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    });

    let (status, bytes) = send_raw(app, "POST", "/", Body::from(request_body.to_string())).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(json!({}));

    (status, body)
}

async fn execute_tool(app: &axum::Router, params: Value, id: i64) -> Value {
    let (status, body) = send_jsonrpc_request(app, "executeTool", Some(params), json!(id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    body
}

#[tokio::test]
async fn test_initialize() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "initialize", Some(json!({})), json!(1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);

    let result = &body["result"];
    assert_eq!(result["name"], "morocco-weather-mcp-server");
    assert_eq!(result["version"], "1.0.0");
    assert_eq!(result["vendor"], "example");
    assert_eq!(result["capabilities"]["tools"], true);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_get_tools() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "getTools", None, json!(2)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let tools = body["result"]["tools"].as_object().unwrap();
    let mut names: Vec<_> = tools.keys().cloned().collect();
    names.sort();
    assert_eq!(names, vec!["get_weather", "list_cities"]);

    let weather = &tools["get_weather"];
    assert!(!weather["description"].as_str().unwrap().is_empty());
    assert_eq!(weather["parameters"]["properties"]["city"]["type"], "string");
    assert!(tools["list_cities"]["parameters"]["properties"]
        .as_object()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_list_cities_is_stable() {
    let app = create_test_app();

    let first = execute_tool(&app, json!({ "name": "list_cities", "parameters": {} }), 3).await;
    // A weather call in between must not affect the list.
    execute_tool(
        &app,
        json!({ "name": "get_weather", "parameters": { "city": "Agadir" } }),
        4,
    )
    .await;
    let second = execute_tool(&app, json!({ "name": "list_cities" }), 5).await;

    let cities = first["result"]["cities"].as_array().unwrap();
    assert_eq!(cities.len(), 30);
    assert_eq!(cities[0], "Casablanca");
    assert_eq!(cities[3], "Fès");
    assert_eq!(cities[29], "Chefchaouen");
    assert_eq!(first["result"], second["result"]);
}

#[tokio::test]
async fn test_get_weather_success() {
    let app = create_test_app();

    let body = execute_tool(
        &app,
        json!({ "name": "get_weather", "parameters": { "city": "casablanca" } }),
        6,
    )
    .await;

    let result = &body["result"];
    assert!(result.get("error").is_none());
    assert_eq!(result["city"], "casablanca");
    assert_eq!(result["country"], "Maroc");
    assert_eq!(result["temperature"], 24.5);
    assert_eq!(result["weather_condition"], "Clear");
    assert_eq!(result["timestamp"], 1_718_000_000);
}

#[tokio::test]
async fn test_get_weather_unknown_city_is_domain_error() {
    let app = create_test_app();

    let body = execute_tool(
        &app,
        json!({ "name": "get_weather", "parameters": { "city": "Atlantis" } }),
        3,
    )
    .await;

    assert!(body.get("error").is_none());
    let message = body["result"]["error"].as_str().unwrap();
    assert!(message.contains("Atlantis"));
    assert!(message.contains("list_cities"));
}

#[tokio::test]
async fn test_get_weather_missing_city_is_domain_error() {
    let app = create_test_app();

    for (id, parameters) in [
        (7, json!({})),
        (8, json!({ "city": "" })),
        (9, json!({ "city": 42 })),
        (10, json!(["Atlantis"])),
        (11, json!("Rabat")),
    ] {
        let body = execute_tool(
            &app,
            json!({ "name": "get_weather", "parameters": parameters }),
            id,
        )
        .await;

        assert!(body.get("error").is_none());
        assert_eq!(body["result"]["error"], "City name is required");
    }
}

#[tokio::test]
async fn test_get_weather_upstream_failure_is_domain_error() {
    let app = app_with_provider(Arc::new(FailingProvider));

    let body = execute_tool(
        &app,
        json!({ "name": "get_weather", "parameters": { "city": "Rabat" } }),
        10,
    )
    .await;

    assert!(body.get("error").is_none());
    assert!(body["result"]["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_executor_panic_is_internal_error() {
    let app = app_with_provider(Arc::new(PanickingProvider));

    let body = execute_tool(
        &app,
        json!({ "name": "get_weather", "parameters": { "city": "Rabat" } }),
        11,
    )
    .await;

    assert!(body.get("result").is_none());
    assert_eq!(body["error"]["code"], -32603);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("provider exploded"));
}

#[tokio::test]
async fn test_execute_tool_missing_name() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(
        &app,
        "executeTool",
        Some(json!({ "parameters": { "city": "Rabat" } })),
        json!(12),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 12);
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_execute_tool_unknown_tool() {
    let app = create_test_app();

    let (_, body) = send_jsonrpc_request(
        &app,
        "executeTool",
        Some(json!({ "name": "get_forecast", "parameters": {} })),
        json!(13),
    )
    .await;

    assert_eq!(body["id"], 13);
    assert_eq!(body["error"]["code"], -32602);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("get_forecast"));
}

#[tokio::test]
async fn test_unknown_method() {
    let app = create_test_app();

    let (status, body) = send_jsonrpc_request(&app, "tools/list", None, json!("abc")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "abc");
    assert_eq!(body["error"]["code"], -32601);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_missing_method() {
    let app = create_test_app();

    let (_, bytes) = send_raw(&app, "POST", "/", Body::from(r#"{"jsonrpc":"2.0","id":14}"#)).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["id"], 14);
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn test_invalid_json() {
    let app = create_test_app();

    let (status, bytes) = send_raw(&app, "POST", "/", Body::from("invalid json {{{")).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_empty_body() {
    let app = create_test_app();

    let (status, bytes) = send_raw(&app, "POST", "/", Body::empty()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_non_object_body() {
    let app = create_test_app();

    let (_, bytes) = send_raw(&app, "POST", "/", Body::from("[1, 2, 3]")).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"]["code"], -32603);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_post_on_any_path_is_rpc() {
    let app = create_test_app();

    let request = json!({ "jsonrpc": "2.0", "method": "initialize", "params": {}, "id": 15 });
    let (status, bytes) = send_raw(&app, "POST", "/mcp", Body::from(request.to_string())).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 15);
    assert_eq!(body["result"]["name"], "morocco-weather-mcp-server");
}

#[tokio::test]
async fn test_get_on_other_paths_is_method_not_found() {
    let app = create_test_app();

    for uri in ["/", "/tools", "/mcp/"] {
        let (status, bytes) = send_raw(&app, "GET", uri, Body::empty()).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], -32601);
        assert!(body["id"].is_null());
    }
}

#[tokio::test]
async fn test_options_is_permissive() {
    let app = create_test_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .contains_key("access-control-allow-methods"));

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body_bytes.is_empty());
}

#[tokio::test]
async fn test_sse_heartbeat_is_finite() {
    let app = create_test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/sse")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(content_type, "text/event-stream");

    // Completes because the stream ends after the configured ping count.
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();

    assert!(body_str.starts_with(r#"data: {"jsonrpc":"2.0","method":"ready","params":{}}"#));
    assert_eq!(body_str.matches(": ping").count(), 3);
}
