//! Weather domain error types.
//!
//! These never become protocol faults: the tool executors render them as an
//! `{"error": <message>}` payload inside a successful result envelope.

use thiserror::Error;

/// Business-level failures of the weather tools.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The `city` parameter was absent or empty.
    #[error("City name is required")]
    MissingCity,

    /// The requested city is not in the supported list.
    #[error("'{0}' is not a supported Moroccan city. Use list_cities to see the available cities.")]
    UnknownCity(String),

    /// No API key was configured for the upstream provider.
    #[error("OpenWeather API key is not configured. Set the OPENWEATHER_API_KEY environment variable.")]
    MissingApiKey,

    /// The upstream request could not be completed.
    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("Weather API returned HTTP {status}")]
    Status { status: u16 },

    /// The upstream payload did not have the expected shape.
    #[error("Failed to process weather data: {reason}")]
    Payload { reason: String },
}
