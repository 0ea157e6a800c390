//! Tool Executors
//!
//! Per-tool business logic. Every input yields a [`ToolOutcome`]; failures of
//! the weather domain are reported as [`ToolOutcome::DomainFault`], never as
//! protocol faults.

use serde_json::{json, Value};
use tracing::{info, warn};

use super::models::ToolOutcome;
use super::registry::ToolKind;
use crate::weather::{cities, AppState, WeatherError};

/// Runs the executor for `kind` with the caller's parameter mapping.
pub async fn execute_tool(state: &AppState, kind: ToolKind, parameters: Value) -> ToolOutcome {
    let outcome = match kind {
        ToolKind::GetWeather => execute_get_weather(state, parameters).await,
        ToolKind::ListCities => Ok(execute_list_cities()),
    };

    match outcome {
        Ok(value) => ToolOutcome::Success(value),
        Err(e) => {
            warn!(tool = ?kind, error = %e, "tool returned a domain error");
            ToolOutcome::DomainFault(e.to_string())
        }
    }
}

/// Handles the get_weather tool functionality
async fn execute_get_weather(state: &AppState, parameters: Value) -> Result<Value, WeatherError> {
    // Only an object with a non-empty string `city` names a city.
    let city = parameters
        .as_object()
        .and_then(|p| p.get("city"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .ok_or(WeatherError::MissingCity)?
        .to_string();

    if !cities::is_supported_city(&city) {
        return Err(WeatherError::UnknownCity(city));
    }

    info!(city = %city, "fetching weather");
    let record = state.provider.current_weather(&city).await?;

    serde_json::to_value(record).map_err(|e| WeatherError::Payload {
        reason: e.to_string(),
    })
}

/// Handles the list_cities tool functionality
fn execute_list_cities() -> Value {
    json!({ "cities": cities::available_cities() })
}
