//! Upstream weather provider.
//!
//! The [`WeatherProvider`] trait is the seam between the tool executors and
//! the network. [`OpenWeatherProvider`] talks to the OpenWeather "current
//! weather" endpoint; tests substitute their own implementations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::errors::WeatherError;
use super::models::{OpenWeatherPayload, WeatherRecord};

/// Default OpenWeather endpoint.
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// ISO country code appended to every city query.
const COUNTRY_CODE: &str = "ma";

/// Unit system requested from the upstream (Celsius, m/s).
const UNITS: &str = "metric";

/// Language for condition descriptions.
const LANGUAGE: &str = "fr";

/// Upstream request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of current weather observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the current conditions for an already validated city.
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError>;
}

/// [`WeatherProvider`] backed by the OpenWeather HTTP API.
pub struct OpenWeatherProvider {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherProvider {
    /// Creates a provider. A missing key is not an error here; it is reported
    /// on each request instead.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Points the provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let query = format!("{city},{COUNTRY_CODE}");

        debug!(city = city, "requesting current weather");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("appid", api_key),
                ("units", UNITS),
                ("lang", LANGUAGE),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let payload: OpenWeatherPayload =
            serde_json::from_slice(&body).map_err(|e| WeatherError::Payload {
                reason: e.to_string(),
            })?;

        WeatherRecord::from_payload(city, payload).ok_or_else(|| WeatherError::Payload {
            reason: "missing weather condition entry".to_string(),
        })
    }
}
