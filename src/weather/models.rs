//! Weather Domain Models
//!
//! This module contains the Weather Record returned by `get_weather` and the
//! subset of the OpenWeather payload it is remapped from.

use serde::{Deserialize, Serialize};

// =============================================================================
// Weather Domain Models
// =============================================================================

/// Country label attached to every record.
pub const COUNTRY_LABEL: &str = "Maroc";

/// Current conditions for a supported city, built fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    /// City name as requested by the caller
    pub city: String,

    /// Country label
    pub country: String,

    /// Temperature in degrees Celsius
    pub temperature: f64,

    /// Perceived temperature in degrees Celsius
    pub feels_like: f64,

    /// Relative humidity, percent
    pub humidity: i64,

    /// Atmospheric pressure, hPa
    pub pressure: i64,

    /// Short condition group (e.g. "Clouds")
    pub weather_condition: String,

    /// Localised condition description
    pub description: String,

    /// Wind speed, m/s
    pub wind_speed: f64,

    /// Cloud cover, percent
    pub clouds: i64,

    /// Observation time, unix seconds
    pub timestamp: i64,
}

// =============================================================================
// Upstream Payload
// =============================================================================

/// The fields of an OpenWeather "current weather" response that we consume.
#[derive(Debug, Deserialize)]
pub struct OpenWeatherPayload {
    pub main: MainReadings,
    pub weather: Vec<ConditionEntry>,
    pub wind: WindReadings,
    pub clouds: CloudReadings,
    pub dt: i64,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct CloudReadings {
    pub all: i64,
}

impl WeatherRecord {
    /// Remaps an upstream payload into a record for `city`.
    ///
    /// Returns `None` when the payload carries no condition entry.
    pub fn from_payload(city: &str, payload: OpenWeatherPayload) -> Option<Self> {
        let condition = payload.weather.into_iter().next()?;
        Some(Self {
            city: city.to_string(),
            country: COUNTRY_LABEL.to_string(),
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            weather_condition: condition.main,
            description: condition.description,
            wind_speed: payload.wind.speed,
            clouds: payload.clouds.all,
            timestamp: payload.dt,
        })
    }
}
